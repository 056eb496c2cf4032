#![deny(missing_docs)]

//! BRC-74 Merkle paths (BUMP).
//!
//! Decodes and encodes the compact binary/hex Merkle path format, rebuilds
//! the block Merkle root from a transaction id, merges partial paths for
//! the same block, and verifies inclusion against a [`ChainTracker`].
//!
//! # Example
//!
//! ```no_run
//! use bump_path::{MerklePath, StaticChainTracker};
//! use bump_primitives::chainhash::Hash;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let path = MerklePath::from_hex("fe8a6a0c000c04fde80b...")?;
//! let tracker = StaticChainTracker::new()
//!     .with_root(813706, "57aab6e6fb1b697174ffb64e062c4728f2ffd33ddcfa02a43b64d8cd29b483b4".parse()?);
//! let txid: Hash = "304e737fdfcb017a1a322e78b067ecebb5e07b44f0a36ed1f01264d2014f7711".parse()?;
//! assert!(path.verify(&txid, &tracker)?);
//! # Ok(())
//! # }
//! ```

pub mod chain_tracker;
pub mod config;
pub mod error;
pub mod merkle_path;
pub mod merkle_tree_parent;

pub use chain_tracker::{ChainTracker, StaticChainTracker};
pub use config::PathLimits;
pub use error::MerklePathError;
pub use merkle_path::{MerklePath, PathElement};
pub use merkle_tree_parent::merkle_tree_parent;
