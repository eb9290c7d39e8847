use core::fmt;
use serde::{Deserialize, Serialize};

use crate::schema::TypeKind;

/// Expected byte length reported by [`SszError::LengthMismatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpectedLength {
    /// The shape has exactly this many bytes (or elements).
    Exact(usize),
    /// The byte length must be a whole multiple of the element size.
    MultipleOf(usize),
}

impl fmt::Display for ExpectedLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedLength::Exact(len) => write!(f, "{len}"),
            ExpectedLength::MultipleOf(size) => write!(f, "a multiple of {size}"),
        }
    }
}

/// Specific irregularity found in an offset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OffsetIssue {
    /// The first offset does not point at the end of the fixed part.
    FirstOffsetMismatch { expected: usize, got: usize },
    /// The first offset of a variable-element collection does not describe
    /// a whole, non-empty table of offset slots.
    MisalignedFirstOffset { offset: usize },
    /// An offset is smaller than its predecessor.
    Decreasing {
        index: usize,
        previous: usize,
        offset: usize,
    },
    /// An offset points past the end of the enclosing buffer.
    OutOfRange { index: usize, offset: usize, end: usize },
}

impl fmt::Display for OffsetIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OffsetIssue::FirstOffsetMismatch { expected, got } => {
                write!(f, "first offset {got} does not match fixed part length {expected}")
            }
            OffsetIssue::MisalignedFirstOffset { offset } => {
                write!(f, "first offset {offset} is not a positive multiple of 4")
            }
            OffsetIssue::Decreasing {
                index,
                previous,
                offset,
            } => write!(
                f,
                "offset #{index} ({offset}) is smaller than the previous offset ({previous})"
            ),
            OffsetIssue::OutOfRange { index, offset, end } => {
                write!(f, "offset #{index} ({offset}) points past the end ({end})")
            }
        }
    }
}

/// Canonical error surfaced while encoding, decoding or merkleizing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SszError {
    /// A list or bitlist holds more elements than its declared capacity.
    CapacityExceeded {
        kind: TypeKind,
        limit: usize,
        length: usize,
    },
    /// Input ended before the expected number of bytes were available.
    TruncatedInput {
        kind: TypeKind,
        needed: usize,
        available: usize,
    },
    /// The offset table of a variable-size layout is inconsistent.
    MalformedOffsetTable { kind: TypeKind, issue: OffsetIssue },
    /// The bitlist length marker is missing or not in the final byte.
    InvalidBitlistSentinel { byte_length: usize },
    /// A fixed-shape value or encoding has the wrong length.
    LengthMismatch {
        kind: TypeKind,
        expected: ExpectedLength,
        got: usize,
    },
    /// A boolean byte other than `0x00` or `0x01`.
    InvalidBoolean { byte: u8 },
    /// Bits above the declared bitvector length are set.
    InvalidBitvectorPadding { length: usize },
    /// The value's shape disagrees with the descriptor.
    TypeMismatch { expected: TypeKind, got: TypeKind },
    /// A variable-part offset does not fit in four bytes.
    OffsetOverflow { offset: usize },
    /// The input exceeds the configured maximum size.
    InputTooLarge { limit: usize, got: usize },
    /// The descriptor nests deeper than the configured maximum.
    NestingTooDeep { limit: usize, depth: usize },
    /// A Merkle leaf index beyond the tree's capacity.
    IndexOutOfRange { index: u64, capacity: u128 },
    /// A Merkle capacity needing a tree deeper than the zero-hash tables.
    TreeTooDeep { depth: usize, max: usize },
    /// More leaf chunks than the Merkle tree was shaped for.
    TooManyChunks { chunks: usize, capacity: u128 },
}

impl SszError {
    /// Creates a capacity error helper.
    pub fn capacity_exceeded(kind: TypeKind, limit: usize, length: usize) -> Self {
        SszError::CapacityExceeded {
            kind,
            limit,
            length,
        }
    }

    /// Creates a truncated-input error helper.
    pub fn truncated(kind: TypeKind, needed: usize, available: usize) -> Self {
        SszError::TruncatedInput {
            kind,
            needed,
            available,
        }
    }

    /// Creates a malformed-offset error helper.
    pub fn malformed_offsets(kind: TypeKind, issue: OffsetIssue) -> Self {
        SszError::MalformedOffsetTable { kind, issue }
    }

    /// Creates an exact-length mismatch helper.
    pub fn length_mismatch(kind: TypeKind, expected: usize, got: usize) -> Self {
        SszError::LengthMismatch {
            kind,
            expected: ExpectedLength::Exact(expected),
            got,
        }
    }

    /// Creates a type-mismatch error helper.
    pub fn type_mismatch(expected: TypeKind, got: TypeKind) -> Self {
        SszError::TypeMismatch { expected, got }
    }

    /// Returns the shape the error was raised for, when one applies.
    pub fn kind(&self) -> Option<TypeKind> {
        match *self {
            SszError::CapacityExceeded { kind, .. }
            | SszError::TruncatedInput { kind, .. }
            | SszError::MalformedOffsetTable { kind, .. }
            | SszError::LengthMismatch { kind, .. } => Some(kind),
            SszError::TypeMismatch { expected, .. } => Some(expected),
            SszError::InvalidBitlistSentinel { .. } => Some(TypeKind::Bitlist),
            SszError::InvalidBitvectorPadding { .. } => Some(TypeKind::Bitvector),
            SszError::InvalidBoolean { .. } => {
                Some(TypeKind::Basic(crate::schema::BasicKind::Bool))
            }
            SszError::OffsetOverflow { .. }
            | SszError::InputTooLarge { .. }
            | SszError::NestingTooDeep { .. }
            | SszError::IndexOutOfRange { .. }
            | SszError::TreeTooDeep { .. }
            | SszError::TooManyChunks { .. } => None,
        }
    }
}

impl fmt::Display for SszError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SszError::CapacityExceeded {
                kind,
                limit,
                length,
            } => write!(f, "{kind} length {length} exceeds capacity {limit}"),
            SszError::TruncatedInput {
                kind,
                needed,
                available,
            } => write!(
                f,
                "truncated {kind} input: needed {needed} bytes, {available} available"
            ),
            SszError::MalformedOffsetTable { kind, issue } => {
                write!(f, "malformed {kind} offset table: {issue}")
            }
            SszError::InvalidBitlistSentinel { byte_length } => {
                write!(f, "bitlist of {byte_length} bytes has no valid sentinel bit")
            }
            SszError::LengthMismatch {
                kind,
                expected,
                got,
            } => write!(f, "{kind} length mismatch: expected {expected}, got {got}"),
            SszError::InvalidBoolean { byte } => write!(f, "invalid boolean byte 0x{byte:02x}"),
            SszError::InvalidBitvectorPadding { length } => {
                write!(f, "bitvector of {length} bits has non-zero padding")
            }
            SszError::TypeMismatch { expected, got } => {
                write!(f, "type mismatch: descriptor is {expected}, value is {got}")
            }
            SszError::OffsetOverflow { offset } => {
                write!(f, "offset {offset} does not fit in four bytes")
            }
            SszError::InputTooLarge { limit, got } => {
                write!(f, "input of {got} bytes exceeds the {limit} byte limit")
            }
            SszError::NestingTooDeep { limit, depth } => {
                write!(f, "descriptor depth {depth} exceeds the limit {limit}")
            }
            SszError::IndexOutOfRange { index, capacity } => {
                write!(f, "leaf index {index} out of range (capacity {capacity})")
            }
            SszError::TreeTooDeep { depth, max } => {
                write!(f, "merkle tree depth {depth} exceeds the maximum {max}")
            }
            SszError::TooManyChunks { chunks, capacity } => {
                write!(f, "{chunks} chunks do not fit a tree of {capacity} leaves")
            }
        }
    }
}

impl std::error::Error for SszError {}

/// Convenient alias for engine results.
pub type SszResult<T> = core::result::Result<T, SszError>;
