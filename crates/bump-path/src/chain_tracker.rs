//! Chain tracker capability for SPV verification.

use std::collections::HashMap;

use bump_primitives::chainhash::Hash;

use crate::error::MerklePathError;

/// Trait for checking Merkle roots against trusted block headers.
///
/// Implementors decide where headers come from (a local header store, a
/// network service, a fixed table). Verification calls this exactly once
/// per check and does no caching or retrying around it.
pub trait ChainTracker {
    /// Check whether `root` is the Merkle root of the block at `height`.
    ///
    /// # Returns
    /// `Ok(true)` if the root matches, `Ok(false)` if it does not, and
    /// `Err(MerklePathError::ChainTracker)` if the tracker could not decide.
    fn is_valid_root_for_height(&self, root: &Hash, height: u32) -> Result<bool, MerklePathError>;
}

impl<T: ChainTracker + ?Sized> ChainTracker for &T {
    fn is_valid_root_for_height(&self, root: &Hash, height: u32) -> Result<bool, MerklePathError> {
        (**self).is_valid_root_for_height(root, height)
    }
}

impl<T: ChainTracker + ?Sized> ChainTracker for Box<T> {
    fn is_valid_root_for_height(&self, root: &Hash, height: u32) -> Result<bool, MerklePathError> {
        (**self).is_valid_root_for_height(root, height)
    }
}

/// A chain tracker backed by a fixed table of trusted roots.
///
/// Heights missing from the table are answered with `false`.
#[derive(Debug, Clone, Default)]
pub struct StaticChainTracker {
    roots: HashMap<u32, Hash>,
}

impl StaticChainTracker {
    /// Create a tracker that knows no roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the trusted root for a block height, replacing any previous one.
    pub fn insert(&mut self, height: u32, root: Hash) -> Option<Hash> {
        self.roots.insert(height, root)
    }

    /// Builder-style variant of [`insert`](Self::insert).
    pub fn with_root(mut self, height: u32, root: Hash) -> Self {
        self.roots.insert(height, root);
        self
    }

    /// The trusted root at `height`, if known.
    pub fn root_at(&self, height: u32) -> Option<&Hash> {
        self.roots.get(&height)
    }
}

impl FromIterator<(u32, Hash)> for StaticChainTracker {
    fn from_iter<I: IntoIterator<Item = (u32, Hash)>>(iter: I) -> Self {
        StaticChainTracker {
            roots: iter.into_iter().collect(),
        }
    }
}

impl ChainTracker for StaticChainTracker {
    fn is_valid_root_for_height(&self, root: &Hash, height: u32) -> Result<bool, MerklePathError> {
        Ok(self.roots.get(&height) == Some(root))
    }
}
