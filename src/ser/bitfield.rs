//! Bitvector and bitlist wire layouts.
//!
//! Both pack bits low-bit-first. A bitlist appends one sentinel bit right
//! after its last data bit so the decoder can recover the bit length from
//! the bytes alone; the sentinel spills into an extra byte when the data
//! fills its last byte completely.

use super::error::{SszError, SszResult};
use crate::schema::TypeKind;
use crate::value::Bits;

/// Encoded length of a bitlist holding `len` bits, sentinel included.
pub const fn bitlist_byte_len(len: usize) -> usize {
    len / 8 + 1
}

/// Writes a bitvector of exactly `length` bits.
pub fn write_bitvector(out: &mut Vec<u8>, bits: &Bits, length: usize) -> SszResult<()> {
    if bits.len() != length {
        return Err(SszError::length_mismatch(
            TypeKind::Bitvector,
            length,
            bits.len(),
        ));
    }
    out.extend_from_slice(bits.as_bytes());
    Ok(())
}

/// Writes a bitlist with its sentinel bit.
pub fn write_bitlist(out: &mut Vec<u8>, bits: &Bits, limit: usize) -> SszResult<()> {
    if bits.len() > limit {
        return Err(SszError::capacity_exceeded(
            TypeKind::Bitlist,
            limit,
            bits.len(),
        ));
    }
    let start = out.len();
    out.extend_from_slice(bits.as_bytes());
    let used = bits.len() % 8;
    if used == 0 {
        out.push(0x01);
    } else {
        let last = start + bits.len() / 8;
        out[last] |= 1 << used;
    }
    Ok(())
}

/// Reads a bitvector of exactly `length` bits.
pub fn read_bitvector(bytes: &[u8], length: usize) -> SszResult<Bits> {
    let expected = length.div_ceil(8);
    if bytes.len() < expected {
        return Err(SszError::truncated(
            TypeKind::Bitvector,
            expected,
            bytes.len(),
        ));
    }
    if bytes.len() > expected {
        return Err(SszError::length_mismatch(
            TypeKind::Bitvector,
            expected,
            bytes.len(),
        ));
    }
    Bits::from_packed(bytes.to_vec(), length).ok_or(SszError::InvalidBitvectorPadding { length })
}

/// Reads a bitlist, recovering its length from the sentinel bit.
pub fn read_bitlist(bytes: &[u8], limit: usize) -> SszResult<Bits> {
    let sentinel_error = SszError::InvalidBitlistSentinel {
        byte_length: bytes.len(),
    };
    let Some((&last, body)) = bytes.split_last() else {
        return Err(sentinel_error);
    };
    if last == 0 {
        return Err(sentinel_error);
    }
    let marker = 7 - last.leading_zeros() as usize;
    let length = body.len() * 8 + marker;
    if length > limit {
        return Err(SszError::capacity_exceeded(TypeKind::Bitlist, limit, length));
    }

    let mut packed = Vec::with_capacity(length.div_ceil(8));
    packed.extend_from_slice(body);
    if marker > 0 {
        packed.push(last & !(1 << marker));
    }
    Bits::from_packed(packed, length).ok_or(sentinel_error)
}
