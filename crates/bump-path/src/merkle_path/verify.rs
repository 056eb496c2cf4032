//! SPV verification against a chain tracker.

use bump_primitives::chainhash::Hash;
use tracing::debug;

use super::root::parse_txid;
use super::MerklePath;
use crate::chain_tracker::ChainTracker;
use crate::error::MerklePathError;

impl MerklePath {
    /// Verify that `txid` is included in the block at this path's height.
    ///
    /// Computes the root for `txid` and asks the tracker whether it is the
    /// root of block `block_height`. The tracker's answer is returned as is.
    ///
    /// # Errors
    /// Root computation errors (`UnknownTxid`, `MissingSibling`) and tracker
    /// failures are propagated; a rejected root is `Ok(false)`.
    pub fn verify<T>(&self, txid: &Hash, chain_tracker: &T) -> Result<bool, MerklePathError>
    where
        T: ChainTracker + ?Sized,
    {
        let root = self.compute_root(Some(txid))?;
        let valid = chain_tracker.is_valid_root_for_height(&root, self.block_height)?;
        debug!(
            txid = %txid,
            root = %root,
            block_height = self.block_height,
            valid,
            "verified merkle path"
        );
        Ok(valid)
    }

    /// Verify a display-order hex txid.
    pub fn verify_hex<T>(&self, txid_str: &str, chain_tracker: &T) -> Result<bool, MerklePathError>
    where
        T: ChainTracker + ?Sized,
    {
        self.verify(&parse_txid(txid_str)?, chain_tracker)
    }
}
