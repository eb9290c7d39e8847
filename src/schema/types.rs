use core::fmt;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fixed-width scalar kinds supported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicKind {
    /// Boolean stored as a single `0x00`/`0x01` byte.
    Bool,
    /// Unsigned 8-bit integer.
    U8,
    /// Unsigned 16-bit integer, little-endian.
    U16,
    /// Unsigned 32-bit integer, little-endian.
    U32,
    /// Unsigned 64-bit integer, little-endian.
    U64,
}

impl BasicKind {
    /// Width of the scalar in bytes.
    pub const fn byte_len(self) -> usize {
        match self {
            BasicKind::Bool | BasicKind::U8 => 1,
            BasicKind::U16 => 2,
            BasicKind::U32 => 4,
            BasicKind::U64 => 8,
        }
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BasicKind::Bool => write!(f, "bool"),
            BasicKind::U8 => write!(f, "uint8"),
            BasicKind::U16 => write!(f, "uint16"),
            BasicKind::U32 => write!(f, "uint32"),
            BasicKind::U64 => write!(f, "uint64"),
        }
    }
}

/// Shape tag shared by descriptors and values, used for error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Basic(BasicKind),
    Vector,
    List,
    Bitvector,
    Bitlist,
    Container,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Basic(kind) => write!(f, "{kind}"),
            TypeKind::Vector => write!(f, "vector"),
            TypeKind::List => write!(f, "list"),
            TypeKind::Bitvector => write!(f, "bitvector"),
            TypeKind::Bitlist => write!(f, "bitlist"),
            TypeKind::Container => write!(f, "container"),
        }
    }
}

/// Named member of a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub ty: Arc<TypeDescriptor>,
}

impl Field {
    /// Named field of type `ty`.
    pub fn new(name: impl Into<String>, ty: impl Into<Arc<TypeDescriptor>>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Value-independent schema of a serializable shape.
///
/// Descriptors are immutable once built. Child descriptors are reference
/// counted so a single schema fragment (for example a checkpoint container)
/// can be reused by many parents and shared across threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDescriptor {
    /// Fixed-width scalar.
    Basic(BasicKind),
    /// Exactly `length` elements of `elem`.
    Vector {
        elem: Arc<TypeDescriptor>,
        length: usize,
    },
    /// At most `limit` elements of `elem`.
    List {
        elem: Arc<TypeDescriptor>,
        limit: usize,
    },
    /// Exactly `length` bits.
    Bitvector { length: usize },
    /// At most `limit` bits.
    Bitlist { limit: usize },
    /// Ordered, fixed set of named fields.
    Container { name: String, fields: Vec<Field> },
}

impl TypeDescriptor {
    /// Scalar of the given kind.
    pub const fn basic(kind: BasicKind) -> Self {
        TypeDescriptor::Basic(kind)
    }

    /// One-byte boolean.
    pub const fn boolean() -> Self {
        TypeDescriptor::Basic(BasicKind::Bool)
    }

    /// Unsigned 8-bit integer.
    pub const fn uint8() -> Self {
        TypeDescriptor::Basic(BasicKind::U8)
    }

    /// Unsigned 16-bit integer.
    pub const fn uint16() -> Self {
        TypeDescriptor::Basic(BasicKind::U16)
    }

    /// Unsigned 32-bit integer.
    pub const fn uint32() -> Self {
        TypeDescriptor::Basic(BasicKind::U32)
    }

    /// Unsigned 64-bit integer.
    pub const fn uint64() -> Self {
        TypeDescriptor::Basic(BasicKind::U64)
    }

    /// Exactly `length` elements of `elem`.
    pub fn vector(elem: impl Into<Arc<TypeDescriptor>>, length: usize) -> Self {
        TypeDescriptor::Vector {
            elem: elem.into(),
            length,
        }
    }

    /// Up to `limit` elements of `elem`.
    pub fn list(elem: impl Into<Arc<TypeDescriptor>>, limit: usize) -> Self {
        TypeDescriptor::List {
            elem: elem.into(),
            limit,
        }
    }

    /// Exactly `length` bits.
    pub const fn bitvector(length: usize) -> Self {
        TypeDescriptor::Bitvector { length }
    }

    /// Up to `limit` bits, length-delimited by a sentinel.
    pub const fn bitlist(limit: usize) -> Self {
        TypeDescriptor::Bitlist { limit }
    }

    /// Fixed-length byte string, e.g. `bytes_n(32)` for a root.
    pub fn bytes_n(length: usize) -> Self {
        Self::vector(TypeDescriptor::uint8(), length)
    }

    /// Byte string bounded by `limit`.
    pub fn byte_list(limit: usize) -> Self {
        Self::list(TypeDescriptor::uint8(), limit)
    }

    /// Starts a container definition; see [`ContainerBuilder`](super::ContainerBuilder).
    pub fn container(name: impl Into<String>) -> super::ContainerBuilder {
        super::ContainerBuilder::new(name)
    }

    /// Shape tag of the descriptor.
    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDescriptor::Basic(kind) => TypeKind::Basic(*kind),
            TypeDescriptor::Vector { .. } => TypeKind::Vector,
            TypeDescriptor::List { .. } => TypeKind::List,
            TypeDescriptor::Bitvector { .. } => TypeKind::Bitvector,
            TypeDescriptor::Bitlist { .. } => TypeKind::Bitlist,
            TypeDescriptor::Container { .. } => TypeKind::Container,
        }
    }

    /// Returns the scalar kind when the descriptor is basic.
    pub fn as_basic(&self) -> Option<BasicKind> {
        match self {
            TypeDescriptor::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the container fields, or an empty slice for other shapes.
    pub fn fields(&self) -> &[Field] {
        match self {
            TypeDescriptor::Container { fields, .. } => fields,
            _ => &[],
        }
    }
}
