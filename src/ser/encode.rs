//! Canonical encoder.
//!
//! Fixed-size fields are written in place. Each variable-size field gets a
//! four-byte slot in the fixed part that is patched with the field's start
//! (relative to the enclosing layout) once the fixed part is complete; the
//! variable parts then follow back to back in field order.

use super::basic::write_basic;
use super::bitfield::{write_bitlist, write_bitvector};
use super::error::SszResult;
use super::offsets::{patch_offset, reserve_offset};
use super::shape;
use crate::schema::TypeDescriptor;
use crate::value::Value;

/// Encodes `value` into a freshly allocated buffer.
///
/// The buffer is reserved from the descriptor's minimum length, which is exact
/// for fixed-size types; variable parts grow it while writing.
pub fn encode(value: &Value, desc: &TypeDescriptor) -> SszResult<Vec<u8>> {
    let mut out = Vec::with_capacity(desc.min_byte_length());
    write_value(&mut out, value, desc)?;
    Ok(out)
}

/// Encodes `value` into a reused buffer and returns the encoded length.
///
/// The buffer's length is reset before writing and its capacity is kept, so
/// repeated calls stop allocating once the buffer has grown to the largest
/// encoding seen. The encoding occupies `out[..len]`. When an error is
/// returned the buffer holds an unspecified prefix and must not be used.
pub fn encode_into(value: &Value, desc: &TypeDescriptor, out: &mut Vec<u8>) -> SszResult<usize> {
    out.clear();
    write_value(out, value, desc)?;
    Ok(out.len())
}

/// Appends the encoding of `value` to `out`.
pub fn write_value(out: &mut Vec<u8>, value: &Value, desc: &TypeDescriptor) -> SszResult<()> {
    match desc {
        TypeDescriptor::Basic(kind) => write_basic(out, value, *kind),
        TypeDescriptor::Vector { elem, length } => {
            let items = shape::vector_items(value, *length)?;
            write_sequence(out, items, elem)
        }
        TypeDescriptor::List { elem, limit } => {
            let items = shape::encodable_list_items(value, elem, *limit)?;
            write_sequence(out, items, elem)
        }
        TypeDescriptor::Bitvector { length } => {
            write_bitvector(out, shape::bitvector_bits(value, *length)?, *length)
        }
        TypeDescriptor::Bitlist { limit } => {
            write_bitlist(out, shape::bitlist_bits(value, *limit)?, *limit)
        }
        TypeDescriptor::Container { fields, .. } => {
            let values = shape::container_values(value, fields.len())?;
            write_layout(
                out,
                fields
                    .iter()
                    .map(|field| field.ty.as_ref())
                    .zip(values.iter()),
            )
        }
    }
}

fn write_sequence(out: &mut Vec<u8>, items: &[Value], elem: &TypeDescriptor) -> SszResult<()> {
    if elem.is_fixed_size() {
        for item in items {
            write_value(out, item, elem)?;
        }
        Ok(())
    } else {
        write_layout(out, items.iter().map(|item| (elem, item)))
    }
}

fn write_layout<'a, I>(out: &mut Vec<u8>, parts: I) -> SszResult<()>
where
    I: Iterator<Item = (&'a TypeDescriptor, &'a Value)>,
{
    let start = out.len();
    let mut pending = Vec::new();
    for (desc, value) in parts {
        if desc.is_fixed_size() {
            write_value(out, value, desc)?;
        } else {
            pending.push((reserve_offset(out), desc, value));
        }
    }
    for (slot, desc, value) in pending {
        let offset = out.len() - start;
        patch_offset(out, slot, offset)?;
        write_value(out, value, desc)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ser::SszError;
    use crate::schema::TypeKind;

    #[test]
    fn container_with_list_uses_offset() {
        let desc = TypeDescriptor::container("Pair")
            .field("a", TypeDescriptor::uint64())
            .field("b", TypeDescriptor::list(TypeDescriptor::uint8(), 4))
            .build();
        let value = Value::Container(vec![Value::U64(5), Value::bytes_list(&[1, 2, 3])]);
        let bytes = encode(&value, &desc).unwrap();
        assert_eq!(
            bytes,
            [5, 0, 0, 0, 0, 0, 0, 0, 0x0c, 0, 0, 0, 1, 2, 3]
        );
    }

    #[test]
    fn variable_elements_get_offsets() {
        let inner = TypeDescriptor::byte_list(4);
        let desc = TypeDescriptor::list(inner, 3);
        let value = Value::List(vec![Value::bytes_list(&[7]), Value::bytes_list(&[]), Value::bytes_list(&[8, 9])]);
        let bytes = encode(&value, &desc).unwrap();
        assert_eq!(
            bytes,
            [12, 0, 0, 0, 13, 0, 0, 0, 13, 0, 0, 0, 7, 8, 9]
        );
    }

    #[test]
    fn list_over_capacity_is_not_truncated() {
        let desc = TypeDescriptor::list(TypeDescriptor::uint16(), 2);
        let value = Value::List(vec![Value::U16(1), Value::U16(2), Value::U16(3)]);
        assert_eq!(
            encode(&value, &desc).unwrap_err(),
            SszError::capacity_exceeded(TypeKind::List, 2, 3)
        );
    }

    #[test]
    fn encode_into_reuses_buffer() {
        let desc = TypeDescriptor::byte_list(16);
        let mut buffer = Vec::new();
        let long = encode_into(&Value::bytes_list(&[1; 10]), &desc, &mut buffer).unwrap();
        assert_eq!(long, 10);
        let capacity = buffer.capacity();
        let short = encode_into(&Value::bytes_list(&[2, 3]), &desc, &mut buffer).unwrap();
        assert_eq!(short, 2);
        assert_eq!(&buffer[..short], &[2, 3]);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn populated_list_of_zero_width_elements_is_rejected() {
        let desc = TypeDescriptor::list(TypeDescriptor::bytes_n(0), 5);
        let value = Value::List(vec![Value::bytes_vector(&[]); 3]);
        let expected = SszError::length_mismatch(TypeKind::List, 0, 3);
        assert_eq!(encode(&value, &desc).unwrap_err(), expected);
        assert_eq!(
            encode_into(&value, &desc, &mut Vec::new()).unwrap_err(),
            expected
        );
        assert_eq!(crate::ser::serialized_size(&value, &desc).unwrap_err(), expected);

        let empty = Value::List(Vec::new());
        assert!(encode(&empty, &desc).unwrap().is_empty());
    }

    #[test]
    fn zero_width_vector_elements_keep_their_count() {
        let desc = TypeDescriptor::vector(TypeDescriptor::bytes_n(0), 3);
        let value = Value::Vector(vec![Value::bytes_vector(&[]); 3]);
        assert!(encode(&value, &desc).unwrap().is_empty());
        assert_eq!(crate::ser::decode(&[], &desc).unwrap(), value);
    }

    #[test]
    fn fixed_size_encoding_needs_no_regrowth() {
        let desc = TypeDescriptor::container("Checkpoint")
            .field("epoch", TypeDescriptor::uint64())
            .field("root", TypeDescriptor::bytes_n(32))
            .build();
        let value = Value::Container(vec![Value::U64(9), Value::bytes_vector(&[1; 32])]);
        let bytes = encode(&value, &desc).unwrap();
        assert_eq!(bytes.len(), 40);
        assert_eq!(bytes.capacity(), desc.min_byte_length());
    }

    #[test]
    fn wrong_vector_length_is_rejected() {
        let desc = TypeDescriptor::bytes_n(4);
        let err = encode(&Value::bytes_vector(&[1, 2]), &desc).unwrap_err();
        assert_eq!(err, SszError::length_mismatch(TypeKind::Vector, 4, 2));
    }
}
