use super::backend::{Chunk, ChunkHasher, ZERO_CHUNK};

/// Deepest tree the engine builds: a capacity of `2^64` leaves.
pub const MAX_TREE_DEPTH: usize = 64;

/// Builds the zero-subtree table for a backend.
///
/// Entry `d` is the root of a perfect tree of depth `d` whose leaves are all
/// [`ZERO_CHUNK`]. Only called from the per-backend lazy statics, so each
/// table is computed once per process and read-only afterwards.
pub(crate) fn build_zero_hashes<H: ChunkHasher>() -> Vec<Chunk> {
    let mut table = Vec::with_capacity(MAX_TREE_DEPTH + 1);
    table.push(ZERO_CHUNK);
    for depth in 0..MAX_TREE_DEPTH {
        let below = table[depth];
        table.push(H::hash_pair(&below, &below));
    }
    table
}
