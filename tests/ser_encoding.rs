use insta::assert_snapshot;
use rpp_ssz::{decode, encode, encode_into, serialized_size, Bits, SszError, TypeDescriptor, TypeKind, Value};

use _fixtures::{hex_bytes, pair, pair_value, state_value, STATE};

#[test]
fn pair_layout_is_fixed_part_then_variable_part() {
    let bytes = encode(&pair_value(5, &[1, 2, 3]), &pair()).unwrap();
    assert_eq!(bytes.len(), 15);
    assert_eq!(&bytes[8..12], &[0x0c, 0, 0, 0]);
    assert_snapshot!(hex_bytes(&bytes), @"05000000000000000c000000010203");
}

#[test]
fn scalars_are_little_endian() {
    let cases = [
        (Value::Bool(true), TypeDescriptor::boolean(), "01"),
        (Value::U8(0xab), TypeDescriptor::uint8(), "ab"),
        (Value::U16(0x0102), TypeDescriptor::uint16(), "0201"),
        (Value::U32(0xdead_beef), TypeDescriptor::uint32(), "efbeadde"),
        (Value::U64(1), TypeDescriptor::uint64(), "0100000000000000"),
    ];
    for (value, desc, expected) in cases {
        assert_eq!(hex_bytes(&encode(&value, &desc).unwrap()), expected);
    }
}

#[test]
fn bitlist_packs_low_bit_first_with_sentinel() {
    let desc = TypeDescriptor::bitlist(8);
    let bits = Bits::from_bools(&[true, false, true, true, false]);
    let bytes = encode(&Value::Bitlist(bits.clone()), &desc).unwrap();
    assert_eq!(bytes, vec![0x2d]);
    assert_eq!(decode(&bytes, &desc).unwrap(), Value::Bitlist(bits));
}

#[test]
fn bitlist_sentinel_lands_in_last_byte_at_every_boundary() {
    const LIMIT: usize = 16;
    let desc = TypeDescriptor::bitlist(LIMIT);
    for len in [0usize, 1, 7, 8, 9, LIMIT - 1, LIMIT] {
        let bits: Bits = (0..len).map(|i| i % 3 == 0).collect();
        let bytes = encode(&Value::Bitlist(bits.clone()), &desc).unwrap();
        assert_eq!(bytes.len(), len / 8 + 1, "len {len}");
        let last = *bytes.last().unwrap();
        assert_eq!(last >> (len % 8), 1, "sentinel position for len {len}");
        assert_eq!(decode(&bytes, &desc).unwrap(), Value::Bitlist(bits));
    }
}

#[test]
fn bitvector_uses_exact_byte_count() {
    let desc = TypeDescriptor::bitvector(10);
    let bits = Bits::from_bools(&[true, false, true, true, false, false, false, false, false, true]);
    let bytes = encode(&Value::Bitvector(bits), &desc).unwrap();
    assert_eq!(bytes, vec![0x0d, 0x02]);
}

#[test]
fn nested_variable_elements_get_their_own_offsets() {
    let desc = TypeDescriptor::list(TypeDescriptor::byte_list(8), 4);
    let value = Value::List(vec![
        Value::bytes_list(&[1, 2]),
        Value::bytes_list(&[]),
        Value::bytes_list(&[3]),
    ]);
    let bytes = encode(&value, &desc).unwrap();
    assert_snapshot!(hex_bytes(&bytes), @"0c0000000e0000000e000000010203");
    assert_eq!(decode(&bytes, &desc).unwrap(), value);
}

#[test]
fn empty_list_encodes_to_nothing() {
    let desc = TypeDescriptor::list(TypeDescriptor::uint32(), 10);
    assert!(encode(&Value::List(vec![]), &desc).unwrap().is_empty());
    assert_eq!(decode(&[], &desc).unwrap(), Value::List(vec![]));
}

#[test]
fn list_at_capacity_encodes_and_one_more_fails() {
    let desc = TypeDescriptor::list(TypeDescriptor::uint16(), 3);
    let full = Value::List(vec![Value::U16(1), Value::U16(2), Value::U16(3)]);
    assert_eq!(encode(&full, &desc).unwrap().len(), 6);

    let over = Value::List(vec![Value::U16(0); 4]);
    assert_eq!(
        encode(&over, &desc).unwrap_err(),
        SszError::capacity_exceeded(TypeKind::List, 3, 4)
    );
}

#[test]
fn zero_width_list_elements_are_not_silently_dropped() {
    let desc = TypeDescriptor::list(TypeDescriptor::bytes_n(0), 5);
    let value = Value::List(vec![Value::bytes_vector(&[]); 3]);
    assert_eq!(
        encode(&value, &desc).unwrap_err(),
        SszError::length_mismatch(TypeKind::List, 0, 3)
    );
    assert_eq!(decode(&[], &desc).unwrap(), Value::List(vec![]));

    let unit = TypeDescriptor::container("Unit").build();
    let desc = TypeDescriptor::list(unit, 4);
    assert!(encode(&Value::List(vec![Value::Container(vec![])]), &desc).is_err());
    assert!(encode(&Value::List(vec![]), &desc).unwrap().is_empty());
}

#[test]
fn value_shape_must_match_descriptor() {
    let err = encode(&Value::U32(1), &TypeDescriptor::uint64()).unwrap_err();
    assert!(matches!(err, SszError::TypeMismatch { .. }));

    let err = encode(&Value::bytes_vector(&[0; 31]), &TypeDescriptor::bytes_n(32)).unwrap_err();
    assert!(matches!(err, SszError::LengthMismatch { kind: TypeKind::Vector, .. }));
}

#[test]
fn buffer_is_reused_across_encodings() {
    let desc = pair();
    let mut buffer = Vec::new();
    let first = encode_into(&pair_value(1, &[1, 2, 3, 4]), &desc, &mut buffer).unwrap();
    assert_eq!(first, 16);
    let capacity = buffer.capacity();

    let second = encode_into(&pair_value(2, &[9]), &desc, &mut buffer).unwrap();
    assert_eq!(second, 13);
    assert_eq!(buffer.capacity(), capacity);
    assert_eq!(buffer, encode(&pair_value(2, &[9]), &desc).unwrap());
}

#[test]
fn state_sized_value_roundtrips() {
    let value = state_value(300);
    let bytes = encode(&value, &STATE).unwrap();
    assert_eq!(bytes.len(), serialized_size(&value, &STATE).unwrap());
    // fixed header: two u64, 64 roots, two offsets, one bitvector byte, checkpoint
    assert_eq!(&bytes[2064..2068], &[0x41, 0x08, 0, 0]);
    assert_eq!(bytes.len(), 2113 + 300 * 121 + 300 * 8);
    assert_eq!(decode(&bytes, &STATE).unwrap(), value);
}
