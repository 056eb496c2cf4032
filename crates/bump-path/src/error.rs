//! Error types for Merkle path operations.

use bump_primitives::chainhash::Hash;
use bump_primitives::PrimitivesError;

/// Error types for Merkle path decoding, root computation and combination.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MerklePathError {
    /// The buffer ended before a field was complete.
    #[error("truncated input while reading {field}")]
    TruncatedInput {
        /// The field being read when the input ran out.
        field: &'static str,
    },

    /// The bytes or text do not describe a well-formed path.
    #[error("malformed merkle path: {0}")]
    MalformedPath(String),

    /// The requested txid is not one of the level 0 hashes.
    #[error("the merkle path does not contain the txid {0}")]
    UnknownTxid(Hash),

    /// The path lacks the sibling needed to climb from this level.
    #[error("missing sibling at level {level}, offset {offset}")]
    MissingSibling {
        /// Level at which the sibling is missing.
        level: usize,
        /// Offset of the missing sibling.
        offset: u64,
    },

    /// Two paths anchored to different blocks cannot be combined.
    #[error("cannot combine merkle paths with different block heights ({left} != {right})")]
    HeightMismatch {
        /// Block height of the path being combined into.
        left: u32,
        /// Block height of the other path.
        right: u32,
    },

    /// Two paths disagree about a node or about the root.
    #[error("inconsistent merkle paths: {0}")]
    InconsistentPath(String),

    /// The chain tracker could not answer.
    #[error("chain tracker error: {0}")]
    ChainTracker(String),
}

impl MerklePathError {
    /// True when the path is well formed but cannot prove the requested txid.
    pub fn is_insufficient_proof(&self) -> bool {
        matches!(self, Self::UnknownTxid(_) | Self::MissingSibling { .. })
    }

    /// True when the input bytes or text are corrupt.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::TruncatedInput { .. } | Self::MalformedPath(_))
    }

    /// Wrap a cursor error raised while reading `field`.
    pub(crate) fn reading(field: &'static str, err: PrimitivesError) -> Self {
        match err {
            PrimitivesError::UnexpectedEof { .. } => Self::TruncatedInput { field },
            other => Self::MalformedPath(format!("reading {}: {}", field, other)),
        }
    }
}

impl From<hex::FromHexError> for MerklePathError {
    fn from(e: hex::FromHexError) -> Self {
        MerklePathError::MalformedPath(format!("invalid hex: {}", e))
    }
}
