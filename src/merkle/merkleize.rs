use super::chunk::length_chunk;
use crate::config::ParallelismPolicy;
use crate::hash::{Chunk, ChunkHasher, MAX_TREE_DEPTH};
use crate::ser::{SszError, SszResult};
use crate::utils::map_pairs;

/// Depth of the perfect binary tree that holds `limit` leaves.
///
/// A limit of zero or one yields a depth-zero tree (a single leaf).
pub fn tree_depth(limit: u128) -> usize {
    if limit <= 1 {
        0
    } else {
        (128 - (limit - 1).leading_zeros()) as usize
    }
}

/// [`tree_depth`] bounded by the precomputed zero-hash tables.
pub(crate) fn checked_depth(limit: u128) -> SszResult<usize> {
    let depth = tree_depth(limit);
    if depth > MAX_TREE_DEPTH {
        return Err(SszError::TreeTooDeep {
            depth,
            max: MAX_TREE_DEPTH,
        });
    }
    Ok(depth)
}

/// Checks that `chunks` leaves fit a tree sized for `limit` and returns its depth.
pub(crate) fn checked_capacity(chunks: usize, limit: u128) -> SszResult<usize> {
    if chunks as u128 > limit {
        return Err(SszError::TooManyChunks {
            chunks,
            capacity: limit,
        });
    }
    checked_depth(limit)
}

/// Merkle root of `chunks` in a tree sized for `limit` leaves.
pub fn merkleize<H: ChunkHasher>(chunks: &[Chunk], limit: u128) -> SszResult<Chunk> {
    merkleize_with::<H>(chunks, limit, &ParallelismPolicy::SEQUENTIAL)
}

/// [`merkleize`] with an explicit parallelism policy.
///
/// The tree is always shaped by `limit`, never by `chunks.len()`: missing
/// leaves are zero chunks, and whole missing subtrees are taken from the
/// precomputed zero-hash table instead of being hashed.
pub fn merkleize_with<H: ChunkHasher>(
    chunks: &[Chunk],
    limit: u128,
    policy: &ParallelismPolicy,
) -> SszResult<Chunk> {
    let depth = checked_capacity(chunks.len(), limit)?;
    if chunks.is_empty() {
        return Ok(H::zero_hash(depth));
    }

    let mut layer = chunks.to_vec();
    for level in 0..depth {
        if layer.len() % 2 == 1 {
            layer.push(H::zero_hash(level));
        }
        layer = map_pairs(&layer, policy, H::hash_pair);
    }
    Ok(layer[0])
}

/// Binds a capacity-shaped root to the current element count.
pub fn mix_in_length<H: ChunkHasher>(root: &Chunk, length: usize) -> Chunk {
    H::hash_pair(root, &length_chunk(length))
}
