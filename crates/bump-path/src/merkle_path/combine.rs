//! Merging two Merkle paths for the same block.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use bump_primitives::chainhash::Hash;
use tracing::debug;

use super::{MerklePath, PathElement};
use crate::error::MerklePathError;

impl MerklePath {
    /// Combine another MerklePath into this one.
    ///
    /// Both paths must be structurally valid and anchored to the same block
    /// height. The result holds, per level, the union of both paths'
    /// elements, so every txid either path could prove is provable from the
    /// result. Where one path is shorter, the missing levels come from the
    /// longer one. Elements at the same offset must agree, and every leaf the
    /// merged path can resolve must reach the same root.
    ///
    /// On error `self` is left unchanged.
    pub fn combine(&mut self, other: &MerklePath) -> Result<(), MerklePathError> {
        if self.block_height != other.block_height {
            return Err(MerklePathError::HeightMismatch {
                left: self.block_height,
                right: other.block_height,
            });
        }
        self.validate()?;
        other.validate()?;

        let max_len = self.path.len().max(other.path.len());
        let mut combined: Vec<BTreeMap<u64, PathElement>> = vec![BTreeMap::new(); max_len];
        for mp in [&*self, other] {
            for (height, level) in mp.path.iter().enumerate() {
                for elem in level {
                    merge_element(&mut combined[height], height, elem)?;
                }
            }
        }

        let merged = MerklePath {
            block_height: self.block_height,
            path: combined
                .into_iter()
                .map(|level| level.into_values().collect())
                .collect(),
        };
        merged.check_single_root()?;

        debug!(
            block_height = merged.block_height,
            levels = merged.path.len(),
            leaves = merged.path[0].len(),
            "combined merkle paths"
        );
        *self = merged;
        Ok(())
    }

    /// Non-mutating form of [`combine`](Self::combine).
    pub fn combined(&self, other: &MerklePath) -> Result<MerklePath, MerklePathError> {
        let mut merged = self.clone();
        merged.combine(other)?;
        Ok(merged)
    }

    /// Check that every level 0 hash the path can carry to the top
    /// arrives at the same root.
    ///
    /// Leaves without a complete sibling chain are skipped; a partial
    /// path does not have to resolve every element it stores. Levels must
    /// be sorted by offset, as `combine` builds them, so each sibling is a
    /// binary search away.
    fn check_single_root(&self) -> Result<(), MerklePathError> {
        let sibling_at = |height: usize, offset: u64| {
            let level = &self.path[height];
            level
                .binary_search_by_key(&offset, |e| e.offset)
                .ok()
                .map(|i| &level[i])
        };

        let mut first_root: Option<Hash> = None;
        for leaf in &self.path[0] {
            let Some(hash) = leaf.hash else { continue };
            let Ok(root) = self.climb(leaf.offset, hash, &sibling_at) else {
                continue;
            };
            match first_root {
                None => first_root = Some(root),
                Some(seen) if seen != root => {
                    return Err(MerklePathError::InconsistentPath(format!(
                        "paths resolve to different roots: {}, {}",
                        seen, root
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

fn merge_element(
    level: &mut BTreeMap<u64, PathElement>,
    height: usize,
    elem: &PathElement,
) -> Result<(), MerklePathError> {
    match level.entry(elem.offset) {
        Entry::Vacant(slot) => {
            slot.insert(elem.clone());
        }
        Entry::Occupied(mut slot) => {
            let existing = slot.get_mut();
            if existing.duplicate != elem.duplicate || existing.hash != elem.hash {
                return Err(MerklePathError::InconsistentPath(format!(
                    "conflicting elements at level {} offset {}",
                    height, elem.offset
                )));
            }
            existing.txid |= elem.txid;
        }
    }
    Ok(())
}
