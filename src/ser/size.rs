use super::bitfield::bitlist_byte_len;
use super::error::{SszError, SszResult};
use super::shape;
use crate::schema::{TypeDescriptor, TypeKind, BYTES_PER_LENGTH_OFFSET};
use crate::value::Value;

/// Exact length of the canonical encoding of `value`.
///
/// Performs the same shape and capacity checks as the encoder, so a value
/// that sizes successfully also encodes successfully (barring offset
/// overflow past four bytes).
pub fn serialized_size(value: &Value, desc: &TypeDescriptor) -> SszResult<usize> {
    match desc {
        TypeDescriptor::Basic(kind) => {
            if value.kind() != TypeKind::Basic(*kind) {
                return Err(SszError::type_mismatch(desc.kind(), value.kind()));
            }
            Ok(kind.byte_len())
        }
        TypeDescriptor::Vector { elem, length } => {
            sequence_size(shape::vector_items(value, *length)?, elem)
        }
        TypeDescriptor::List { elem, limit } => {
            sequence_size(shape::encodable_list_items(value, elem, *limit)?, elem)
        }
        TypeDescriptor::Bitvector { length } => {
            shape::bitvector_bits(value, *length)?;
            Ok(length.div_ceil(8))
        }
        TypeDescriptor::Bitlist { limit } => {
            let bits = shape::bitlist_bits(value, *limit)?;
            Ok(bitlist_byte_len(bits.len()))
        }
        TypeDescriptor::Container { fields, .. } => {
            let values = shape::container_values(value, fields.len())?;
            fields
                .iter()
                .zip(values)
                .try_fold(0usize, |acc, (field, value)| {
                    Ok(acc.saturating_add(part_size(value, &field.ty)?))
                })
        }
    }
}

fn sequence_size(items: &[Value], elem: &TypeDescriptor) -> SszResult<usize> {
    if let Some(size) = elem.fixed_byte_length() {
        for item in items {
            serialized_size(item, elem)?;
        }
        return Ok(size.saturating_mul(items.len()));
    }
    items.iter().try_fold(0usize, |acc, item| {
        Ok(acc.saturating_add(part_size(item, elem)?))
    })
}

fn part_size(value: &Value, desc: &TypeDescriptor) -> SszResult<usize> {
    let size = serialized_size(value, desc)?;
    if desc.is_fixed_size() {
        Ok(size)
    } else {
        Ok(size.saturating_add(BYTES_PER_LENGTH_OFFSET))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Bits;

    #[test]
    fn sizes_match_layout() {
        let desc = TypeDescriptor::container("Att")
            .field("bits", TypeDescriptor::bitlist(64))
            .field("slot", TypeDescriptor::uint64())
            .field("sigs", TypeDescriptor::list(TypeDescriptor::bytes_n(4), 8))
            .build();
        let value = Value::Container(vec![
            Value::Bitlist(Bits::zeroed(10)),
            Value::U64(1),
            Value::List(vec![Value::bytes_vector(&[0; 4]); 3]),
        ]);
        // 4 + 8 + 4 offsets/fixed, 2 bitlist bytes, 12 list bytes
        assert_eq!(serialized_size(&value, &desc).unwrap(), 30);
    }

    #[test]
    fn size_checks_capacity() {
        let desc = TypeDescriptor::bitlist(4);
        let err = serialized_size(&Value::Bitlist(Bits::zeroed(5)), &desc).unwrap_err();
        assert_eq!(err, SszError::capacity_exceeded(TypeKind::Bitlist, 4, 5));
    }
}
