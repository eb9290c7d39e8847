use std::marker::PhantomData;

use super::merkleize::{checked_capacity, mix_in_length};
use super::root::LeafChunks;
use crate::config::ParallelismPolicy;
use crate::hash::{Chunk, ChunkHasher};
use crate::ser::{SszError, SszResult};
use crate::utils::map_pairs;

/// Merkle tree that retains every populated level so branches can be
/// produced after the root is known.
///
/// Only the populated prefix of each level is stored; siblings that fall in
/// the unpopulated region are zero-subtree roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree<H: ChunkHasher> {
    levels: Vec<Vec<Chunk>>,
    depth: usize,
    limit: u128,
    length: Option<usize>,
    marker: PhantomData<H>,
}

impl<H: ChunkHasher> MerkleTree<H> {
    /// Builds the tree of `chunks` sized for `limit` leaves.
    pub fn from_chunks(chunks: Vec<Chunk>, limit: u128) -> SszResult<Self> {
        Self::build(chunks, limit, None, &ParallelismPolicy::SEQUENTIAL)
    }

    /// Builds the tree of a value's top-level leaves, remembering the
    /// length to mix in for lists and bitlists.
    pub fn from_leaf_chunks(leaves: LeafChunks, policy: &ParallelismPolicy) -> SszResult<Self> {
        Self::build(leaves.chunks, leaves.limit, leaves.length, policy)
    }

    fn build(
        chunks: Vec<Chunk>,
        limit: u128,
        length: Option<usize>,
        policy: &ParallelismPolicy,
    ) -> SszResult<Self> {
        let depth = checked_capacity(chunks.len(), limit)?;
        let mut levels = Vec::with_capacity(depth + 1);
        levels.push(chunks);
        for level in 0..depth {
            let mut layer = levels[level].clone();
            if layer.is_empty() {
                levels.push(Vec::new());
                continue;
            }
            if layer.len() % 2 == 1 {
                layer.push(H::zero_hash(level));
            }
            levels.push(map_pairs(&layer, policy, H::hash_pair));
        }
        Ok(Self {
            levels,
            depth,
            limit,
            length,
            marker: PhantomData,
        })
    }

    /// Root of the capacity-shaped tree, before any length mix-in.
    pub fn root(&self) -> Chunk {
        self.levels[self.depth]
            .first()
            .copied()
            .unwrap_or_else(|| H::zero_hash(self.depth))
    }

    /// Root with the element count mixed in when the tree carries one.
    pub fn hash_tree_root(&self) -> Chunk {
        match self.length {
            Some(length) => mix_in_length::<H>(&self.root(), length),
            None => self.root(),
        }
    }

    /// Number of levels above the leaves.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of populated leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels[0].len()
    }

    /// Number of leaves the tree is shaped for.
    pub fn capacity(&self) -> u128 {
        self.limit
    }

    /// Element count mixed into the root, if any.
    pub fn length(&self) -> Option<usize> {
        self.length
    }

    /// Populated leaf at `index`.
    pub fn leaf(&self, index: usize) -> Option<&Chunk> {
        self.levels[0].get(index)
    }

    /// Populated nodes of a level, `0` being the leaves.
    pub fn level(&self, level: usize) -> Option<&[Chunk]> {
        self.levels.get(level).map(Vec::as_slice)
    }

    /// Sibling path from leaf `index` up to (excluding) the root, bottom first.
    ///
    /// Indices past the populated leaves but within capacity are valid: the
    /// branch then proves a zero leaf.
    pub fn branch(&self, index: u64) -> SszResult<Vec<Chunk>> {
        let capacity = 1u128 << self.depth;
        if (index as u128) >= capacity.min(self.limit.max(1)) {
            return Err(SszError::IndexOutOfRange {
                index,
                capacity: self.limit,
            });
        }
        let mut branch = Vec::with_capacity(self.depth);
        let mut position = index;
        for level in 0..self.depth {
            let sibling = position ^ 1;
            let node = usize::try_from(sibling)
                .ok()
                .and_then(|at| self.levels[level].get(at))
                .copied()
                .unwrap_or_else(|| H::zero_hash(level));
            branch.push(node);
            position >>= 1;
        }
        Ok(branch)
    }
}

/// Recomputes a root from a leaf, its index and its branch.
pub fn compute_root_from_branch<H: ChunkHasher>(leaf: &Chunk, index: u64, branch: &[Chunk]) -> Chunk {
    let mut node = *leaf;
    let mut position = index;
    for sibling in branch {
        node = if position & 1 == 0 {
            H::hash_pair(&node, sibling)
        } else {
            H::hash_pair(sibling, &node)
        };
        position >>= 1;
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Sha256Hasher, ZERO_CHUNK};
    use crate::merkle::merkleize::merkleize;

    fn chunks(count: u8) -> Vec<Chunk> {
        (0..count).map(|i| [i + 1; 32]).collect()
    }

    #[test]
    fn root_matches_merkleize() {
        for (count, limit) in [(0u8, 0u128), (1, 1), (3, 4), (5, 16), (7, 1 << 30)] {
            let tree = MerkleTree::<Sha256Hasher>::from_chunks(chunks(count), limit).unwrap();
            assert_eq!(
                tree.root(),
                merkleize::<Sha256Hasher>(&chunks(count), limit).unwrap()
            );
        }
    }

    #[test]
    fn every_branch_verifies() {
        let tree = MerkleTree::<Sha256Hasher>::from_chunks(chunks(5), 8).unwrap();
        assert_eq!(tree.depth(), 3);
        for index in 0..8u64 {
            let branch = tree.branch(index).unwrap();
            let leaf = tree.leaf(index as usize).copied().unwrap_or(ZERO_CHUNK);
            assert_eq!(
                compute_root_from_branch::<Sha256Hasher>(&leaf, index, &branch),
                tree.root()
            );
        }
    }

    #[test]
    fn sparse_branch_uses_zero_subtrees() {
        let tree = MerkleTree::<Sha256Hasher>::from_chunks(chunks(1), 1 << 20).unwrap();
        let branch = tree.branch(0).unwrap();
        assert_eq!(branch.len(), 20);
        for (level, sibling) in branch.iter().enumerate() {
            assert_eq!(*sibling, Sha256Hasher::zero_hash(level));
        }
    }

    #[test]
    fn index_past_capacity_is_rejected() {
        let tree = MerkleTree::<Sha256Hasher>::from_chunks(chunks(2), 3).unwrap();
        assert!(tree.branch(2).is_ok());
        assert_eq!(
            tree.branch(3).unwrap_err(),
            SszError::IndexOutOfRange {
                index: 3,
                capacity: 3
            }
        );
    }

    #[test]
    fn overfull_tree_is_rejected() {
        assert_eq!(
            MerkleTree::<Sha256Hasher>::from_chunks(chunks(3), 2).unwrap_err(),
            SszError::TooManyChunks {
                chunks: 3,
                capacity: 2
            }
        );
    }
}
