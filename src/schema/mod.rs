//! Type descriptors for the canonical encoding.
//!
//! A [`TypeDescriptor`] is a tagged tree (basic, vector, list, bitvector,
//! bitlist, container). Encoder, decoder and Merkleizer all dispatch on the
//! tag and recurse into the child descriptors; no component ever needs a
//! value to answer layout questions.

mod builder;
mod layout;
mod types;

pub use builder::ContainerBuilder;
pub use layout::{BITS_PER_CHUNK, BYTES_PER_CHUNK, BYTES_PER_LENGTH_OFFSET};
pub use types::{BasicKind, Field, TypeDescriptor, TypeKind};
