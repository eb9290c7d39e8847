//! Canonical decoder.
//!
//! Decoding is strict: every length, offset and sentinel is validated
//! against the descriptor before any sub-range is materialised, and the
//! first irregularity aborts the whole decode.

use super::basic::read_basic;
use super::bitfield::{read_bitlist, read_bitvector};
use super::cursor::ByteReader;
use super::error::{ExpectedLength, OffsetIssue, SszError, SszResult};
use super::offsets::variable_ranges;
use crate::schema::{Field, TypeDescriptor, TypeKind, BYTES_PER_LENGTH_OFFSET};
use crate::value::Value;

/// Decodes `bytes` as a value of shape `desc`.
pub fn decode(bytes: &[u8], desc: &TypeDescriptor) -> SszResult<Value> {
    read_value(bytes, desc)
}

/// Decodes a value occupying exactly `bytes`.
pub fn read_value(bytes: &[u8], desc: &TypeDescriptor) -> SszResult<Value> {
    match desc {
        TypeDescriptor::Basic(kind) => read_basic(bytes, *kind),
        TypeDescriptor::Vector { elem, length } => {
            read_vector(bytes, elem, *length).map(Value::Vector)
        }
        TypeDescriptor::List { elem, limit } => read_list(bytes, elem, *limit).map(Value::List),
        TypeDescriptor::Bitvector { length } => read_bitvector(bytes, *length).map(Value::Bitvector),
        TypeDescriptor::Bitlist { limit } => read_bitlist(bytes, *limit).map(Value::Bitlist),
        TypeDescriptor::Container { fields, .. } => {
            read_container(bytes, desc, fields).map(Value::Container)
        }
    }
}

fn expect_exact(bytes: &[u8], expected: usize, kind: TypeKind) -> SszResult<()> {
    if bytes.len() < expected {
        return Err(SszError::truncated(kind, expected, bytes.len()));
    }
    if bytes.len() > expected {
        return Err(SszError::length_mismatch(kind, expected, bytes.len()));
    }
    Ok(())
}

fn read_vector(bytes: &[u8], elem: &TypeDescriptor, length: usize) -> SszResult<Vec<Value>> {
    let kind = TypeKind::Vector;
    match elem.fixed_byte_length() {
        Some(size) => {
            expect_exact(bytes, size.saturating_mul(length), kind)?;
            read_fixed_elements(bytes, elem, size, length)
        }
        None => {
            if length == 0 {
                expect_exact(bytes, 0, kind)?;
                return Ok(Vec::new());
            }
            let table_len = length.saturating_mul(BYTES_PER_LENGTH_OFFSET);
            if bytes.len() < table_len {
                return Err(SszError::truncated(kind, table_len, bytes.len()));
            }
            read_variable_elements(bytes, elem, length, kind)
        }
    }
}

fn read_list(bytes: &[u8], elem: &TypeDescriptor, limit: usize) -> SszResult<Vec<Value>> {
    let kind = TypeKind::List;
    match elem.fixed_byte_length() {
        Some(0) => {
            // Zero-width elements leave no trace in the encoding.
            expect_exact(bytes, 0, kind)?;
            Ok(Vec::new())
        }
        Some(size) => {
            if bytes.len() % size != 0 {
                return Err(SszError::LengthMismatch {
                    kind,
                    expected: ExpectedLength::MultipleOf(size),
                    got: bytes.len(),
                });
            }
            let count = bytes.len() / size;
            if count > limit {
                return Err(SszError::capacity_exceeded(kind, limit, count));
            }
            read_fixed_elements(bytes, elem, size, count)
        }
        None => {
            if bytes.is_empty() {
                return Ok(Vec::new());
            }
            let first = ByteReader::new(bytes).read_offset(kind)?;
            if first == 0 || first % BYTES_PER_LENGTH_OFFSET != 0 {
                return Err(SszError::malformed_offsets(
                    kind,
                    OffsetIssue::MisalignedFirstOffset { offset: first },
                ));
            }
            if first > bytes.len() {
                return Err(SszError::malformed_offsets(
                    kind,
                    OffsetIssue::OutOfRange {
                        index: 0,
                        offset: first,
                        end: bytes.len(),
                    },
                ));
            }
            let count = first / BYTES_PER_LENGTH_OFFSET;
            if count > limit {
                return Err(SszError::capacity_exceeded(kind, limit, count));
            }
            read_variable_elements(bytes, elem, count, kind)
        }
    }
}

fn read_fixed_elements(
    bytes: &[u8],
    elem: &TypeDescriptor,
    size: usize,
    count: usize,
) -> SszResult<Vec<Value>> {
    if size == 0 {
        return (0..count).map(|_| read_value(&[], elem)).collect();
    }
    bytes
        .chunks_exact(size)
        .map(|chunk| read_value(chunk, elem))
        .collect()
}

fn read_variable_elements(
    bytes: &[u8],
    elem: &TypeDescriptor,
    count: usize,
    kind: TypeKind,
) -> SszResult<Vec<Value>> {
    let mut cursor = ByteReader::new(bytes);
    let mut offsets = Vec::with_capacity(count);
    for _ in 0..count {
        offsets.push(cursor.read_offset(kind)?);
    }
    let fixed_len = count * BYTES_PER_LENGTH_OFFSET;
    let ranges = variable_ranges(&offsets, fixed_len, bytes.len(), kind)?;
    ranges
        .into_iter()
        .map(|range| read_value(&bytes[range], elem))
        .collect()
}

fn read_container(
    bytes: &[u8],
    desc: &TypeDescriptor,
    fields: &[Field],
) -> SszResult<Vec<Value>> {
    let kind = TypeKind::Container;
    let fixed_len = desc.fixed_part_length();
    if desc.is_fixed_size() {
        expect_exact(bytes, fixed_len, kind)?;
    } else if bytes.len() < fixed_len {
        return Err(SszError::truncated(kind, fixed_len, bytes.len()));
    }

    let mut cursor = ByteReader::new(bytes);
    let mut slots: Vec<Option<Value>> = Vec::with_capacity(fields.len());
    let mut offsets = Vec::new();
    let mut variable_fields = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        match field.ty.fixed_byte_length() {
            Some(size) => {
                let part = cursor.read_exact(size, kind)?;
                slots.push(Some(read_value(part, &field.ty)?));
            }
            None => {
                offsets.push(cursor.read_offset(kind)?);
                variable_fields.push(index);
                slots.push(None);
            }
        }
    }

    let ranges = variable_ranges(&offsets, fixed_len, bytes.len(), kind)?;
    for (index, range) in variable_fields.into_iter().zip(ranges) {
        slots[index] = Some(read_value(&bytes[range], &fields[index].ty)?);
    }
    Ok(slots.into_iter().flatten().collect())
}
