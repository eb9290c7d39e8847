use proptest::prelude::*;
use rpp_ssz::{
    decode, encode, encode_into, hash_tree_root, serialized_size, BasicKind, Bits, SszError,
    TypeDescriptor, TypeKind, Value,
};

fn arb_basic() -> impl Strategy<Value = BasicKind> {
    prop_oneof![
        Just(BasicKind::Bool),
        Just(BasicKind::U8),
        Just(BasicKind::U16),
        Just(BasicKind::U32),
        Just(BasicKind::U64),
    ]
}

fn arb_descriptor() -> impl Strategy<Value = TypeDescriptor> {
    let leaf = prop_oneof![
        arb_basic().prop_map(TypeDescriptor::basic),
        (0usize..40).prop_map(TypeDescriptor::bitvector),
        (0usize..40).prop_map(TypeDescriptor::bitlist),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), 0usize..4).prop_map(|(elem, len)| TypeDescriptor::vector(elem, len)),
            (inner.clone(), 0usize..6).prop_map(|(elem, limit)| TypeDescriptor::list(elem, limit)),
            proptest::collection::vec(inner, 0..4).prop_map(|fields| {
                fields
                    .into_iter()
                    .enumerate()
                    .fold(TypeDescriptor::container("Arb"), |builder, (i, ty)| {
                        builder.field(format!("f{i}"), ty)
                    })
                    .build()
            }),
        ]
    })
}

fn arb_scalar(kind: BasicKind) -> BoxedStrategy<Value> {
    match kind {
        BasicKind::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        BasicKind::U8 => any::<u8>().prop_map(Value::U8).boxed(),
        BasicKind::U16 => any::<u16>().prop_map(Value::U16).boxed(),
        BasicKind::U32 => any::<u32>().prop_map(Value::U32).boxed(),
        BasicKind::U64 => any::<u64>().prop_map(Value::U64).boxed(),
    }
}

fn arb_bits(len: impl Strategy<Value = usize>) -> impl Strategy<Value = Bits> {
    len.prop_flat_map(|n| proptest::collection::vec(any::<bool>(), n))
        .prop_map(|bools| Bits::from_bools(&bools))
}

fn arb_value(desc: &TypeDescriptor) -> BoxedStrategy<Value> {
    match desc {
        TypeDescriptor::Basic(kind) => arb_scalar(*kind),
        TypeDescriptor::Vector { elem, length } => {
            proptest::collection::vec(arb_value(elem), *length)
                .prop_map(Value::Vector)
                .boxed()
        }
        TypeDescriptor::List { elem, limit } => {
            proptest::collection::vec(arb_value(elem), 0..=*limit)
                .prop_map(Value::List)
                .boxed()
        }
        TypeDescriptor::Bitvector { length } => {
            arb_bits(Just(*length)).prop_map(Value::Bitvector).boxed()
        }
        TypeDescriptor::Bitlist { limit } => {
            arb_bits(0..=*limit).prop_map(Value::Bitlist).boxed()
        }
        TypeDescriptor::Container { fields, .. } => fields
            .iter()
            .map(|field| arb_value(&field.ty))
            .collect::<Vec<_>>()
            .prop_map(Value::Container)
            .boxed(),
    }
}

/// Whether `value` holds a non-empty list of zero-width elements anywhere.
fn has_lossy_list(value: &Value, desc: &TypeDescriptor) -> bool {
    match (desc, value) {
        (TypeDescriptor::List { elem, .. }, Value::List(items)) => {
            (!items.is_empty() && elem.fixed_byte_length() == Some(0))
                || items.iter().any(|item| has_lossy_list(item, elem))
        }
        (TypeDescriptor::Vector { elem, .. }, Value::Vector(items)) => {
            items.iter().any(|item| has_lossy_list(item, elem))
        }
        (TypeDescriptor::Container { fields, .. }, Value::Container(values)) => fields
            .iter()
            .zip(values)
            .any(|(field, value)| has_lossy_list(value, &field.ty)),
        _ => false,
    }
}

fn arb_typed_value() -> impl Strategy<Value = (TypeDescriptor, Value)> {
    arb_descriptor().prop_flat_map(|desc| {
        let value = arb_value(&desc);
        (Just(desc), value)
    })
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode((desc, value) in arb_typed_value()) {
        let bytes = match encode(&value, &desc) {
            Ok(bytes) => bytes,
            Err(err) => {
                prop_assert!(has_lossy_list(&value, &desc), "unexpected error: {}", err);
                let is_list_length_mismatch = matches!(err, SszError::LengthMismatch { kind: TypeKind::List, .. });
                prop_assert!(is_list_length_mismatch);
                return Ok(());
            }
        };
        prop_assert!(!has_lossy_list(&value, &desc));
        prop_assert_eq!(bytes.len(), serialized_size(&value, &desc).unwrap());
        prop_assert!(bytes.len() >= desc.min_byte_length());
        if let Some(max) = desc.max_byte_length() {
            prop_assert!(bytes.len() <= max);
        }
        let decoded = decode(&bytes, &desc).unwrap();
        prop_assert_eq!(&decoded, &value);
        prop_assert_eq!(encode(&decoded, &desc).unwrap(), bytes);
    }

    #[test]
    fn prop_root_is_deterministic((desc, value) in arb_typed_value()) {
        let first = hash_tree_root(&value, &desc).unwrap();
        let second = hash_tree_root(&value.clone(), &desc).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_reused_buffer_matches_fresh_encoding(
        (desc, value) in arb_typed_value(),
        junk in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        prop_assume!(!has_lossy_list(&value, &desc));
        let mut buffer = junk;
        let len = encode_into(&value, &desc, &mut buffer).unwrap();
        prop_assert_eq!(len, buffer.len());
        prop_assert_eq!(buffer, encode(&value, &desc).unwrap());
    }

    #[test]
    fn prop_truncated_encodings_never_decode_to_the_value(
        (desc, value) in arb_typed_value(),
        cut in 1usize..8,
    ) {
        prop_assume!(!has_lossy_list(&value, &desc));
        let bytes = encode(&value, &desc).unwrap();
        prop_assume!(bytes.len() >= cut);
        let short = &bytes[..bytes.len() - cut];
        if let Ok(decoded) = decode(short, &desc) {
            prop_assert_ne!(decoded, value);
        }
    }
}
