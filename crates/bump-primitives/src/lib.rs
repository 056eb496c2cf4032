//! BRC-74 Merkle path primitives.
//!
//! The building blocks shared by the path codec and verifier:
//! - Digest functions (SHA-256, SHA-256d)
//! - Chain hash type for transaction ids and Merkle nodes
//! - Variable-length integer encoding
//! - Cursor-style byte reader and writer for wire formats

pub mod hash;
pub mod chainhash;
pub mod util;

mod error;
pub use error::PrimitivesError;
