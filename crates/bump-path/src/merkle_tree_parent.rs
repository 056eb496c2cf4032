//! Merkle tree parent computation.

use bump_primitives::chainhash::{double_hash_h, Hash, HASH_SIZE};

/// Compute the Merkle tree parent of two children.
///
/// Both hashes are in internal byte order; they are concatenated
/// left-then-right and double-SHA256'd.
pub fn merkle_tree_parent(left: &Hash, right: &Hash) -> Hash {
    let mut concatenated = [0u8; HASH_SIZE * 2];
    concatenated[..HASH_SIZE].copy_from_slice(left.as_bytes());
    concatenated[HASH_SIZE..].copy_from_slice(right.as_bytes());
    double_hash_h(&concatenated)
}
