//! Merkle path (BUMP) types.
//!
//! Implements the BRC-74 model: a block height plus, for each tree level from
//! the leaves upward, the sparse set of nodes needed to climb to the root.
//! Wire encoding lives in `codec`, root reconstruction in `root`, merging in
//! `combine` and chain-tracker verification in `verify`.

mod codec;
mod combine;
mod root;
mod verify;

#[cfg(test)]
pub(crate) mod test_support;

use bump_primitives::chainhash::Hash;
use serde::{Deserialize, Serialize};

use crate::error::MerklePathError;

/// Flag bit marking an element whose value mirrors its sibling.
pub const FLAG_DUPLICATE: u8 = 0x01;
/// Flag bit marking a level 0 element as a target transaction id.
pub const FLAG_TXID: u8 = 0x02;

/// Tallest tree a path may describe. Offsets are 64-bit, so a block has at
/// most 2^64 leaves and 64 levels below the root.
pub const MAX_TREE_HEIGHT: u8 = 64;

fn is_false(b: &bool) -> bool {
    !*b
}

/// A single node contribution at one level of a Merkle path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathElement {
    /// Position of the node among all nodes at this level, from the left.
    pub offset: u64,
    /// Node hash in internal byte order; absent when `duplicate` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<Hash>,
    /// Set on level 0 elements whose hash is a txid this path proves.
    #[serde(default, skip_serializing_if = "is_false")]
    pub txid: bool,
    /// The node equals its sibling (last node of an odd-sized level).
    #[serde(default, skip_serializing_if = "is_false")]
    pub duplicate: bool,
}

impl PathElement {
    /// A node with a known hash.
    pub fn hashed(offset: u64, hash: Hash) -> Self {
        PathElement {
            offset,
            hash: Some(hash),
            txid: false,
            duplicate: false,
        }
    }

    /// A level 0 node for a transaction id the path proves.
    pub fn target(offset: u64, txid: Hash) -> Self {
        PathElement {
            txid: true,
            ..Self::hashed(offset, txid)
        }
    }

    /// A node that mirrors its sibling.
    pub fn duplicate(offset: u64) -> Self {
        PathElement {
            offset,
            hash: None,
            txid: false,
            duplicate: true,
        }
    }

    /// The wire flag byte for this element.
    pub fn flags(&self) -> u8 {
        let mut flags = 0u8;
        if self.duplicate || self.hash.is_none() {
            flags |= FLAG_DUPLICATE;
        }
        if self.txid {
            flags |= FLAG_TXID;
        }
        flags
    }

    /// Check that exactly one of `hash` / `duplicate` is set and that a
    /// target is never a duplicate placeholder.
    fn validate(&self, level: usize) -> Result<(), MerklePathError> {
        match (self.hash.is_some(), self.duplicate) {
            (true, true) => Err(MerklePathError::MalformedPath(format!(
                "element at level {} offset {} has both a hash and the duplicate flag",
                level, self.offset
            ))),
            (false, false) => Err(MerklePathError::MalformedPath(format!(
                "element at level {} offset {} has neither a hash nor the duplicate flag",
                level, self.offset
            ))),
            _ if self.txid && self.duplicate => Err(MerklePathError::MalformedPath(format!(
                "target element at level {} offset {} cannot be a duplicate",
                level, self.offset
            ))),
            _ => Ok(()),
        }
    }
}

/// A Merkle path (BUMP) tying one or more transactions to a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerklePath {
    /// Height of the block the path is anchored to.
    pub block_height: u32,
    /// Levels from the leaves (index 0) up to just below the root, each
    /// sorted ascending by offset.
    pub path: Vec<Vec<PathElement>>,
}

impl MerklePath {
    /// Create a new MerklePath without validating it.
    pub fn new(block_height: u32, path: Vec<Vec<PathElement>>) -> Self {
        MerklePath { block_height, path }
    }

    /// Number of levels, i.e. the height of the block's Merkle tree.
    pub fn tree_height(&self) -> usize {
        self.path.len()
    }

    /// Check the structural invariants.
    ///
    /// There must be between 1 and [`MAX_TREE_HEIGHT`] levels, every level must be
    /// non-empty with strictly ascending offsets, and every element must
    /// carry either a hash or the duplicate flag, never both.
    pub fn validate(&self) -> Result<(), MerklePathError> {
        if self.path.is_empty() {
            return Err(MerklePathError::MalformedPath(
                "merkle path has no levels".to_string(),
            ));
        }
        if self.path.len() > MAX_TREE_HEIGHT as usize {
            return Err(MerklePathError::MalformedPath(format!(
                "merkle path has {} levels, at most {} are allowed",
                self.path.len(),
                MAX_TREE_HEIGHT
            )));
        }
        for (height, level) in self.path.iter().enumerate() {
            if level.is_empty() {
                return Err(MerklePathError::MalformedPath(format!(
                    "level {} has no elements",
                    height
                )));
            }
            for elem in level {
                elem.validate(height)?;
            }
            if let Some(pair) = level.windows(2).find(|w| w[0].offset >= w[1].offset) {
                return Err(MerklePathError::MalformedPath(format!(
                    "level {} offsets are not strictly ascending ({} then {})",
                    height, pair[0].offset, pair[1].offset
                )));
            }
        }
        Ok(())
    }

    /// Find the element at `offset` in the given level.
    pub fn find_leaf_by_offset(&self, level: usize, offset: u64) -> Option<&PathElement> {
        self.path.get(level)?.iter().find(|l| l.offset == offset)
    }

    /// Transaction ids flagged as targets at level 0.
    pub fn txids(&self) -> impl Iterator<Item = &Hash> + '_ {
        self.path
            .first()
            .into_iter()
            .flatten()
            .filter(|e| e.txid)
            .filter_map(|e| e.hash.as_ref())
    }

    /// Whether `txid` is one of the level 0 hashes.
    pub fn contains_txid(&self, txid: &Hash) -> bool {
        self.path
            .first()
            .is_some_and(|level| level.iter().any(|e| e.hash.as_ref() == Some(txid)))
    }
}
