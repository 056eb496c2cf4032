//! BRC-74 binary and hex encoding.
//!
//! Layout: block height (VarInt), tree height (u8), then per level a VarInt
//! element count followed by `offset (VarInt) | flags (u8) | hash (32 bytes,
//! internal order, omitted for duplicates)` for each element.

use bump_primitives::util::{ByteReader, ByteWriter, VarInt};
use tracing::{debug, trace};

use super::{MerklePath, PathElement, FLAG_DUPLICATE, FLAG_TXID};
use crate::config::PathLimits;
use crate::error::MerklePathError;

/// Smallest possible encoding of one element: 1-byte offset and flags.
const MIN_ELEMENT_SIZE: usize = 2;

impl MerklePath {
    /// Parse a MerklePath from a hex string (BRC-74 binary format).
    pub fn from_hex(hex_data: &str) -> Result<Self, MerklePathError> {
        Self::from_hex_with_limits(hex_data, &PathLimits::default())
    }

    /// Parse a MerklePath from hex, enforcing the given decode limits.
    pub fn from_hex_with_limits(hex_data: &str, limits: &PathLimits) -> Result<Self, MerklePathError> {
        let bin = hex::decode(hex_data)?;
        Self::from_bytes_with_limits(&bin, limits)
    }

    /// Parse a MerklePath from binary data (BRC-74).
    ///
    /// The whole slice must be consumed; trailing bytes are an error.
    pub fn from_bytes(data: &[u8]) -> Result<Self, MerklePathError> {
        Self::from_bytes_with_limits(data, &PathLimits::default())
    }

    /// Parse a MerklePath from binary data, enforcing the given decode limits.
    pub fn from_bytes_with_limits(data: &[u8], limits: &PathLimits) -> Result<Self, MerklePathError> {
        let mut reader = ByteReader::new(data);
        let mp = Self::from_reader(&mut reader, limits)?;
        if !reader.is_empty() {
            return Err(MerklePathError::MalformedPath(format!(
                "{} trailing bytes after the last level",
                reader.remaining()
            )));
        }
        Ok(mp)
    }

    /// Parse a MerklePath from a reader positioned at its first byte.
    ///
    /// Bytes after the path are left in the reader for the caller.
    pub fn from_reader(reader: &mut ByteReader, limits: &PathLimits) -> Result<Self, MerklePathError> {
        let block_height = reader
            .read_varint()
            .map_err(|e| MerklePathError::reading("block height", e))?
            .value();
        let block_height = u32::try_from(block_height).map_err(|_| {
            MerklePathError::MalformedPath(format!("block height {} exceeds u32", block_height))
        })?;

        let tree_height = reader
            .read_u8()
            .map_err(|e| MerklePathError::reading("tree height", e))?;
        if tree_height == 0 {
            return Err(MerklePathError::MalformedPath(
                "tree height must be at least 1".to_string(),
            ));
        }
        if tree_height > limits.max_tree_height {
            return Err(MerklePathError::MalformedPath(format!(
                "tree height {} exceeds limit {}",
                tree_height, limits.max_tree_height
            )));
        }

        let mut path = Vec::with_capacity(tree_height as usize);
        for height in 0..tree_height as usize {
            path.push(read_level(reader, height, limits)?);
        }

        debug!(block_height, tree_height, "decoded merkle path");
        Ok(MerklePath { block_height, path })
    }

    /// Serialize to BRC-74 binary format.
    ///
    /// Never fails. An element carrying neither hash nor duplicate flag is
    /// written as a duplicate; call [`validate`](Self::validate) first to
    /// rule such paths out.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        self.write_to(&mut writer);
        writer.into_bytes()
    }

    /// Append the BRC-74 encoding to an existing writer.
    pub fn write_to(&self, writer: &mut ByteWriter) {
        writer.write_varint(VarInt::from(self.block_height));
        writer.write_u8(self.path.len() as u8);

        for level in &self.path {
            writer.write_varint(VarInt::from(level.len()));
            for leaf in level {
                writer.write_varint(VarInt(leaf.offset));
                let flags = leaf.flags();
                writer.write_u8(flags);
                if flags & FLAG_DUPLICATE == 0 {
                    if let Some(ref hash) = leaf.hash {
                        writer.write_hash(hash);
                    }
                }
            }
        }
    }

    /// Serialize to lowercase hex (BRC-74).
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }
}

fn read_level(
    reader: &mut ByteReader,
    height: usize,
    limits: &PathLimits,
) -> Result<Vec<PathElement>, MerklePathError> {
    let n_leaves = reader
        .read_varint()
        .map_err(|e| MerklePathError::reading("leaf count", e))?
        .value();
    if n_leaves == 0 {
        return Err(MerklePathError::MalformedPath(format!(
            "level {} declares no elements",
            height
        )));
    }
    if n_leaves > limits.max_level_width {
        return Err(MerklePathError::MalformedPath(format!(
            "level {} declares {} elements, limit is {}",
            height, n_leaves, limits.max_level_width
        )));
    }

    // Never trust the declared count further than the bytes that back it.
    let capacity = (n_leaves as usize).min(reader.remaining() / MIN_ELEMENT_SIZE);
    let mut level = Vec::with_capacity(capacity);
    for _ in 0..n_leaves {
        level.push(read_element(reader, height)?);
    }

    level.sort_by_key(|e| e.offset);
    if let Some(pair) = level.windows(2).find(|w| w[0].offset == w[1].offset) {
        return Err(MerklePathError::MalformedPath(format!(
            "level {} repeats offset {}",
            height, pair[0].offset
        )));
    }

    trace!(height, elements = level.len(), "decoded level");
    Ok(level)
}

fn read_element(reader: &mut ByteReader, height: usize) -> Result<PathElement, MerklePathError> {
    let offset = reader
        .read_varint()
        .map_err(|e| MerklePathError::reading("offset", e))?
        .value();
    let flags = reader
        .read_u8()
        .map_err(|e| MerklePathError::reading("flags", e))?;

    if flags & !(FLAG_DUPLICATE | FLAG_TXID) != 0 {
        return Err(MerklePathError::MalformedPath(format!(
            "unknown flag bits {:#04x} at level {} offset {}",
            flags, height, offset
        )));
    }
    let duplicate = flags & FLAG_DUPLICATE != 0;
    let txid = flags & FLAG_TXID != 0;
    if duplicate && txid {
        return Err(MerklePathError::MalformedPath(format!(
            "target at level {} offset {} is flagged as a duplicate",
            height, offset
        )));
    }

    let hash = if duplicate {
        None
    } else {
        Some(reader.read_hash().map_err(|e| MerklePathError::reading("hash", e))?)
    };

    Ok(PathElement {
        offset,
        hash,
        txid,
        duplicate,
    })
}
