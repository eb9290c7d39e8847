//! Value-against-descriptor shape checks shared by the encoder, the size
//! calculator and the Merkleizer.

use super::error::{SszError, SszResult};
use crate::schema::{TypeDescriptor, TypeKind};
use crate::value::{Bits, Value};

pub(crate) fn vector_items(value: &Value, length: usize) -> SszResult<&[Value]> {
    match value {
        Value::Vector(items) if items.len() == length => Ok(items),
        Value::Vector(items) => Err(SszError::length_mismatch(
            TypeKind::Vector,
            length,
            items.len(),
        )),
        other => Err(SszError::type_mismatch(TypeKind::Vector, other.kind())),
    }
}

pub(crate) fn list_items(value: &Value, limit: usize) -> SszResult<&[Value]> {
    match value {
        Value::List(items) if items.len() <= limit => Ok(items),
        Value::List(items) => Err(SszError::capacity_exceeded(
            TypeKind::List,
            limit,
            items.len(),
        )),
        other => Err(SszError::type_mismatch(TypeKind::List, other.kind())),
    }
}

/// List items that have a canonical encoding.
///
/// Zero-width elements write no bytes, so only the empty list of them can be
/// recovered by the decoder.
pub(crate) fn encodable_list_items<'a>(
    value: &'a Value,
    elem: &TypeDescriptor,
    limit: usize,
) -> SszResult<&'a [Value]> {
    let items = list_items(value, limit)?;
    if !items.is_empty() && elem.fixed_byte_length() == Some(0) {
        return Err(SszError::length_mismatch(TypeKind::List, 0, items.len()));
    }
    Ok(items)
}

pub(crate) fn container_values(value: &Value, field_count: usize) -> SszResult<&[Value]> {
    match value {
        Value::Container(values) if values.len() == field_count => Ok(values),
        Value::Container(values) => Err(SszError::length_mismatch(
            TypeKind::Container,
            field_count,
            values.len(),
        )),
        other => Err(SszError::type_mismatch(TypeKind::Container, other.kind())),
    }
}

pub(crate) fn bitvector_bits(value: &Value, length: usize) -> SszResult<&Bits> {
    match value {
        Value::Bitvector(bits) if bits.len() == length => Ok(bits),
        Value::Bitvector(bits) => Err(SszError::length_mismatch(
            TypeKind::Bitvector,
            length,
            bits.len(),
        )),
        other => Err(SszError::type_mismatch(TypeKind::Bitvector, other.kind())),
    }
}

pub(crate) fn bitlist_bits(value: &Value, limit: usize) -> SszResult<&Bits> {
    match value {
        Value::Bitlist(bits) if bits.len() <= limit => Ok(bits),
        Value::Bitlist(bits) => Err(SszError::capacity_exceeded(
            TypeKind::Bitlist,
            limit,
            bits.len(),
        )),
        other => Err(SszError::type_mismatch(TypeKind::Bitlist, other.kind())),
    }
}
