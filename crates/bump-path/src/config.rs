//! Decode limits for untrusted Merkle path input.

use crate::merkle_path::MAX_TREE_HEIGHT;

/// Default cap on the number of levels a decoded path may declare.
///
/// Equal to the structural bound, so every path that validates also decodes.
pub const DEFAULT_MAX_TREE_HEIGHT: u8 = MAX_TREE_HEIGHT;

/// Default cap on the element count a single level may declare.
pub const DEFAULT_MAX_LEVEL_WIDTH: u64 = 1 << 20;

/// Limits checked while decoding, before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLimits {
    /// Largest accepted `treeHeight` byte.
    pub max_tree_height: u8,
    /// Largest accepted per-level element count.
    pub max_level_width: u64,
}

impl PathLimits {
    /// Limits that accept anything the wire format can express.
    pub fn unbounded() -> Self {
        PathLimits {
            max_tree_height: u8::MAX,
            max_level_width: u64::MAX,
        }
    }
}

impl Default for PathLimits {
    fn default() -> Self {
        PathLimits {
            max_tree_height: DEFAULT_MAX_TREE_HEIGHT,
            max_level_width: DEFAULT_MAX_LEVEL_WIDTH,
        }
    }
}
