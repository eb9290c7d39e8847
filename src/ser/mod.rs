//! Canonical serialization for descriptor-typed values.
//!
//! Layout rules:
//!
//! * **Scalars** are written little-endian at their fixed width; booleans are
//!   a single `0x00`/`0x01` byte.
//! * **Fixed-size sequences** of fixed-size elements are the concatenation of
//!   the element encodings.
//! * **Variable-size layouts** (containers with a variable field, and
//!   sequences of variable-size elements) are `[fixed part][variable part]`.
//!   The fixed part holds fixed fields in place and a four-byte little-endian
//!   offset for each variable field; the variable part holds the variable
//!   fields back to back in field order. The first offset equals the fixed
//!   part length.
//! * **Bitvectors** pack bits low-bit-first into `ceil(N / 8)` bytes.
//! * **Bitlists** pack their bits the same way followed by a single sentinel
//!   bit marking the length.

mod basic;
mod bitfield;
mod cursor;
mod decode;
mod encode;
mod error;
mod offsets;
pub(crate) mod shape;
mod size;

pub use basic::{read_basic, write_basic, write_bool, write_u16, write_u32, write_u64, write_u8};
pub use bitfield::{bitlist_byte_len, read_bitlist, read_bitvector, write_bitlist, write_bitvector};
pub use cursor::ByteReader;
pub use decode::{decode, read_value};
pub use encode::{encode, encode_into, write_value};
pub use error::{ExpectedLength, OffsetIssue, SszError, SszResult};
pub use offsets::{ensure_offset, variable_ranges};
pub use size::serialized_size;
