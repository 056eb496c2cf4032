//! Merkle root reconstruction.

use bump_primitives::chainhash::Hash;
use tracing::trace;

use super::{MerklePath, PathElement};
use crate::error::MerklePathError;
use crate::merkle_tree_parent::merkle_tree_parent;

impl MerklePath {
    /// Compute the Merkle root for a transaction id.
    ///
    /// If `txid` is `None`, the first level 0 element with a hash is used.
    ///
    /// Starting from the txid's level 0 offset, each level must hold the
    /// sibling of the current node: `offset ^ 1`. A duplicate sibling
    /// mirrors the current hash. The parent is the double SHA-256 of the
    /// even-offset child followed by the odd-offset child.
    ///
    /// # Errors
    /// `UnknownTxid` if the txid is not a level 0 hash, `MissingSibling` if
    /// a level lacks the needed sibling.
    pub fn compute_root(&self, txid: Option<&Hash>) -> Result<Hash, MerklePathError> {
        let leaves = self.path.first().ok_or_else(|| {
            MerklePathError::MalformedPath("merkle path has no levels".to_string())
        })?;

        let tx_leaf = match txid {
            Some(t) => leaves
                .iter()
                .find(|l| l.hash.as_ref() == Some(t))
                .ok_or(MerklePathError::UnknownTxid(*t))?,
            None => leaves.iter().find(|l| l.hash.is_some()).ok_or_else(|| {
                MerklePathError::MalformedPath("no hash found at level 0".to_string())
            })?,
        };
        let Some(working_hash) = tx_leaf.hash else {
            return Err(MerklePathError::MalformedPath(
                "level 0 element has no hash".to_string(),
            ));
        };

        // A block with a single transaction has that transaction as its root.
        if self.path.len() == 1 && leaves.len() == 1 {
            return Ok(working_hash);
        }

        let root = self.climb(tx_leaf.offset, working_hash, |height, offset| {
            self.path[height].iter().find(|l| l.offset == offset)
        })?;

        trace!(block_height = self.block_height, root = %root, "computed merkle root");
        Ok(root)
    }

    /// Hash upward from the level 0 node at `offset` to the root.
    ///
    /// `sibling_at(level, offset)` looks up a stored node; callers pick the
    /// lookup strategy that suits how their levels are laid out.
    pub(crate) fn climb<'a, F>(
        &'a self,
        mut offset: u64,
        mut working_hash: Hash,
        sibling_at: F,
    ) -> Result<Hash, MerklePathError>
    where
        F: Fn(usize, u64) -> Option<&'a PathElement>,
    {
        for height in 0..self.path.len() {
            let sibling_offset = offset ^ 1;
            let missing = MerklePathError::MissingSibling {
                level: height,
                offset: sibling_offset,
            };
            let sibling = sibling_at(height, sibling_offset).ok_or(missing.clone())?;

            let sibling_hash = if sibling.duplicate {
                working_hash
            } else {
                sibling.hash.ok_or(missing)?
            };

            working_hash = if offset % 2 == 0 {
                merkle_tree_parent(&working_hash, &sibling_hash)
            } else {
                merkle_tree_parent(&sibling_hash, &working_hash)
            };
            offset >>= 1;
        }
        Ok(working_hash)
    }

    /// Compute root from a display-order hex txid, returning display-order hex.
    pub fn compute_root_hex(&self, txid_str: Option<&str>) -> Result<String, MerklePathError> {
        let txid = txid_str.map(parse_txid).transpose()?;
        let root = self.compute_root(txid.as_ref())?;
        Ok(root.to_string())
    }
}

/// Parse a display-order txid, reporting bad text as a malformed input.
pub(crate) fn parse_txid(s: &str) -> Result<Hash, MerklePathError> {
    Hash::from_hex(s)
        .map_err(|e| MerklePathError::MalformedPath(format!("invalid txid hex: {}", e)))
}
