//! Hash backends for Merkleization.
//!
//! The Merkleizer only needs a two-to-one compression of 32-byte chunks and a
//! table of zero-subtree roots. [`ChunkHasher`] captures both; the zero table
//! of each backend is built once per process behind a `once_cell` lazy
//! static and is read-only afterwards.

mod backend;
mod zero;

pub use backend::{Blake2sHasher, Chunk, ChunkHasher, Sha256Hasher, DIGEST_SIZE, ZERO_CHUNK};
pub use zero::MAX_TREE_DEPTH;
