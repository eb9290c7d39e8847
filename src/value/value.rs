use super::bits::Bits;
use crate::schema::{BasicKind, TypeDescriptor, TypeKind};

/// In-memory value interpreted against a [`TypeDescriptor`].
///
/// The variant tags mirror the descriptor tags one to one. Container values
/// hold their fields positionally, in descriptor field order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Vector(Vec<Value>),
    List(Vec<Value>),
    Bitvector(Bits),
    Bitlist(Bits),
    Container(Vec<Value>),
}

impl Value {
    /// Shape tag of the value.
    pub fn kind(&self) -> TypeKind {
        match self {
            Value::Bool(_) => TypeKind::Basic(BasicKind::Bool),
            Value::U8(_) => TypeKind::Basic(BasicKind::U8),
            Value::U16(_) => TypeKind::Basic(BasicKind::U16),
            Value::U32(_) => TypeKind::Basic(BasicKind::U32),
            Value::U64(_) => TypeKind::Basic(BasicKind::U64),
            Value::Vector(_) => TypeKind::Vector,
            Value::List(_) => TypeKind::List,
            Value::Bitvector(_) => TypeKind::Bitvector,
            Value::Bitlist(_) => TypeKind::Bitlist,
            Value::Container(_) => TypeKind::Container,
        }
    }

    /// Zero value of a descriptor: zero scalars, zero bits, empty lists and
    /// default-filled vectors and containers.
    pub fn default_for(desc: &TypeDescriptor) -> Value {
        match desc {
            TypeDescriptor::Basic(kind) => Value::zero(*kind),
            TypeDescriptor::Vector { elem, length } => {
                Value::Vector(vec![Value::default_for(elem); *length])
            }
            TypeDescriptor::List { .. } => Value::List(Vec::new()),
            TypeDescriptor::Bitvector { length } => Value::Bitvector(Bits::zeroed(*length)),
            TypeDescriptor::Bitlist { .. } => Value::Bitlist(Bits::new()),
            TypeDescriptor::Container { fields, .. } => Value::Container(
                fields
                    .iter()
                    .map(|field| Value::default_for(&field.ty))
                    .collect(),
            ),
        }
    }

    /// Zero scalar of the given kind.
    pub fn zero(kind: BasicKind) -> Value {
        match kind {
            BasicKind::Bool => Value::Bool(false),
            BasicKind::U8 => Value::U8(0),
            BasicKind::U16 => Value::U16(0),
            BasicKind::U32 => Value::U32(0),
            BasicKind::U64 => Value::U64(0),
        }
    }

    /// Byte string as a vector of `uint8`.
    pub fn bytes_vector(bytes: &[u8]) -> Value {
        Value::Vector(bytes.iter().copied().map(Value::U8).collect())
    }

    /// Byte string as a list of `uint8`.
    pub fn bytes_list(bytes: &[u8]) -> Value {
        Value::List(bytes.iter().copied().map(Value::U8).collect())
    }

    /// Widens any unsigned scalar to `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::U8(v) => Some(u64::from(*v)),
            Value::U16(v) => Some(u64::from(*v)),
            Value::U32(v) => Some(u64::from(*v)),
            Value::U64(v) => Some(*v),
            _ => None,
        }
    }

    /// Boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Elements of a vector or list, or fields of a container.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Vector(items) | Value::List(items) | Value::Container(items) => Some(items),
            _ => None,
        }
    }

    /// Bits of a bitvector or bitlist.
    pub fn as_bits(&self) -> Option<&Bits> {
        match self {
            Value::Bitvector(bits) | Value::Bitlist(bits) => Some(bits),
            _ => None,
        }
    }

    /// Looks up a container field by name using the container's descriptor.
    pub fn field<'a>(&'a self, desc: &TypeDescriptor, name: &str) -> Option<&'a Value> {
        let index = desc.fields().iter().position(|field| field.name == name)?;
        match self {
            Value::Container(values) => values.get(index),
            _ => None,
        }
    }

    /// Collects the bytes of a `uint8` vector or list.
    pub fn to_byte_vec(&self) -> Option<Vec<u8>> {
        self.as_elements()?
            .iter()
            .map(|item| match item {
                Value::U8(byte) => Some(*byte),
                _ => None,
            })
            .collect()
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::U8(value)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::U16(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::U32(value)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::U64(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_descriptor_shape() {
        let desc = TypeDescriptor::container("State")
            .field("slot", TypeDescriptor::uint64())
            .field("root", TypeDescriptor::bytes_n(2))
            .field("votes", TypeDescriptor::list(TypeDescriptor::uint32(), 8))
            .field("bits", TypeDescriptor::bitvector(3))
            .field("agg", TypeDescriptor::bitlist(16))
            .build();
        let value = Value::default_for(&desc);
        assert_eq!(
            value,
            Value::Container(vec![
                Value::U64(0),
                Value::Vector(vec![Value::U8(0), Value::U8(0)]),
                Value::List(vec![]),
                Value::Bitvector(Bits::zeroed(3)),
                Value::Bitlist(Bits::new()),
            ])
        );
        assert_eq!(value.field(&desc, "slot"), Some(&Value::U64(0)));
        assert_eq!(value.field(&desc, "missing"), None);
    }

    #[test]
    fn byte_helpers_roundtrip() {
        let value = Value::bytes_list(&[1, 2, 3]);
        assert_eq!(value.kind(), TypeKind::List);
        assert_eq!(value.to_byte_vec(), Some(vec![1, 2, 3]));
        assert_eq!(Value::U16(7).as_u64(), Some(7));
        assert_eq!(Value::Bool(true).as_u64(), None);
    }
}
