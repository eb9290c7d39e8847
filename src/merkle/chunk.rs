//! Chunk packer: turns serialized leaf data into 32-byte Merkle leaves.

use crate::hash::{Chunk, DIGEST_SIZE, ZERO_CHUNK};
use crate::schema::BasicKind;
use crate::ser::{write_basic, SszResult};
use crate::value::{Bits, Value};

/// Splits `bytes` into chunks, zero-padding the final partial chunk.
///
/// Empty input yields no chunks; the Merkleizer substitutes the zero
/// subtree for the missing leaves.
pub fn pack_bytes(bytes: &[u8]) -> Vec<Chunk> {
    bytes
        .chunks(DIGEST_SIZE)
        .map(|part| {
            let mut chunk = ZERO_CHUNK;
            chunk[..part.len()].copy_from_slice(part);
            chunk
        })
        .collect()
}

/// Packs a run of scalars back to back.
pub fn pack_basic(items: &[Value], kind: BasicKind) -> SszResult<Vec<Chunk>> {
    let mut bytes = Vec::with_capacity(items.len() * kind.byte_len());
    for item in items {
        write_basic(&mut bytes, item, kind)?;
    }
    Ok(pack_bytes(&bytes))
}

/// Packs the data bits of a bitvector or bitlist, without any sentinel.
pub fn pack_bits(bits: &Bits) -> Vec<Chunk> {
    pack_bytes(bits.as_bytes())
}

/// A single scalar as its own leaf.
pub fn basic_chunk(value: &Value, kind: BasicKind) -> SszResult<Chunk> {
    let mut bytes = Vec::with_capacity(kind.byte_len());
    write_basic(&mut bytes, value, kind)?;
    let mut chunk = ZERO_CHUNK;
    chunk[..bytes.len()].copy_from_slice(&bytes);
    Ok(chunk)
}

/// Element count as a little-endian 32-byte chunk.
pub fn length_chunk(length: usize) -> Chunk {
    let mut chunk = ZERO_CHUNK;
    chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    chunk
}
