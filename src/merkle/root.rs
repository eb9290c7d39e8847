use std::marker::PhantomData;

use super::chunk::{basic_chunk, pack_basic, pack_bits};
use super::merkleize::{merkleize_with, mix_in_length};
use crate::config::ParallelismPolicy;
use crate::hash::{Chunk, ChunkHasher, Sha256Hasher};
use crate::schema::{Field, TypeDescriptor};
use crate::ser::shape::{bitlist_bits, bitvector_bits, container_values, list_items, vector_items};
use crate::ser::SszResult;
use crate::utils::try_map;
use crate::value::Value;

/// Leaves of a value's top-level tree before hashing.
///
/// `limit` is the leaf capacity the tree is shaped for and `length` is the
/// element count mixed into the root for lists and bitlists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafChunks {
    pub chunks: Vec<Chunk>,
    pub limit: u128,
    pub length: Option<usize>,
}

/// Computes hash-tree-roots with a fixed backend and parallelism policy.
#[derive(Debug, Clone, Copy)]
pub struct Merkleizer<H: ChunkHasher = Sha256Hasher> {
    policy: ParallelismPolicy,
    marker: PhantomData<H>,
}

impl<H: ChunkHasher> Default for Merkleizer<H> {
    fn default() -> Self {
        Self::new(ParallelismPolicy::SEQUENTIAL)
    }
}

impl<H: ChunkHasher> Merkleizer<H> {
    /// Merkleizer hashing under `policy`.
    pub fn new(policy: ParallelismPolicy) -> Self {
        Self {
            policy,
            marker: PhantomData,
        }
    }

    /// Parallelism policy in use.
    pub fn policy(&self) -> &ParallelismPolicy {
        &self.policy
    }

    /// Hash-tree-root of `value` under `desc`.
    pub fn hash_tree_root(&self, value: &Value, desc: &TypeDescriptor) -> SszResult<Chunk> {
        let leaves = self.leaf_chunks(value, desc)?;
        let root = merkleize_with::<H>(&leaves.chunks, leaves.limit, &self.policy)?;
        Ok(match leaves.length {
            Some(length) => mix_in_length::<H>(&root, length),
            None => root,
        })
    }

    /// Leaf chunks of the value's own tree; composite children are reduced
    /// to their roots.
    pub fn leaf_chunks(&self, value: &Value, desc: &TypeDescriptor) -> SszResult<LeafChunks> {
        let limit = desc.chunk_count();
        match desc {
            TypeDescriptor::Basic(kind) => Ok(LeafChunks {
                chunks: vec![basic_chunk(value, *kind)?],
                limit,
                length: None,
            }),
            TypeDescriptor::Vector { elem, length } => {
                let items = vector_items(value, *length)?;
                Ok(LeafChunks {
                    chunks: self.element_chunks(items, elem)?,
                    limit,
                    length: None,
                })
            }
            TypeDescriptor::List { elem, limit: cap } => {
                let items = list_items(value, *cap)?;
                Ok(LeafChunks {
                    chunks: self.element_chunks(items, elem)?,
                    limit,
                    length: Some(items.len()),
                })
            }
            TypeDescriptor::Bitvector { length } => Ok(LeafChunks {
                chunks: pack_bits(bitvector_bits(value, *length)?),
                limit,
                length: None,
            }),
            TypeDescriptor::Bitlist { limit: cap } => {
                let bits = bitlist_bits(value, *cap)?;
                Ok(LeafChunks {
                    chunks: pack_bits(bits),
                    limit,
                    length: Some(bits.len()),
                })
            }
            TypeDescriptor::Container { fields, .. } => {
                let values = container_values(value, fields.len())?;
                Ok(LeafChunks {
                    chunks: self.field_roots(values, fields)?,
                    limit,
                    length: None,
                })
            }
        }
    }

    fn element_chunks(&self, items: &[Value], elem: &TypeDescriptor) -> SszResult<Vec<Chunk>> {
        match elem.as_basic() {
            Some(kind) => pack_basic(items, kind),
            None => try_map(items, &self.policy, |item| self.hash_tree_root(item, elem)),
        }
    }

    fn field_roots(&self, values: &[Value], fields: &[Field]) -> SszResult<Vec<Chunk>> {
        values
            .iter()
            .zip(fields)
            .map(|(value, field)| self.hash_tree_root(value, &field.ty))
            .collect()
    }
}

/// SHA-256 hash-tree-root computed on the calling thread.
pub fn hash_tree_root(value: &Value, desc: &TypeDescriptor) -> SszResult<Chunk> {
    Merkleizer::<Sha256Hasher>::default().hash_tree_root(value, desc)
}
