//! Hash-tree-root computation.
//!
//! A value's root is the root of a binary tree over 32-byte leaves. Basic
//! sequences and bitfields pack their serialized data into leaves; composite
//! elements and container fields contribute their own roots as leaves. The
//! tree is always shaped by the descriptor's capacity
//! ([`TypeDescriptor::chunk_count`](crate::schema::TypeDescriptor::chunk_count)),
//! and lists and bitlists additionally mix their current length into the
//! root so that equal data with different lengths never collides.
//!
//! [`MerkleTree`] keeps the populated levels around for callers that need
//! branches rather than just the root.

pub mod chunk;
mod merkleize;
mod root;
mod tree;

pub use chunk::{basic_chunk, length_chunk, pack_basic, pack_bits, pack_bytes};
pub use merkleize::{merkleize, merkleize_with, mix_in_length, tree_depth};
pub use root::{hash_tree_root, LeafChunks, Merkleizer};
pub use tree::{compute_root_from_branch, MerkleTree};
