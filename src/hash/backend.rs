use blake2::Blake2s256;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

use super::zero::build_zero_hashes;
use crate::config::HashFamily;

/// Width of every digest and Merkle leaf.
pub const DIGEST_SIZE: usize = 32;

/// A single 32-byte Merkle leaf or node.
pub type Chunk = [u8; DIGEST_SIZE];

/// The all-zero chunk used to pad packed leaves and absent subtrees.
pub const ZERO_CHUNK: Chunk = [0u8; DIGEST_SIZE];

/// Two-to-one compression used by the Merkleizer.
///
/// Implementors are stateless; every method is an associated function so the
/// backend can be chosen at compile time and shared freely across threads.
pub trait ChunkHasher: Send + Sync + 'static {
    /// Hashes `left || right` into a new chunk.
    fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk;

    /// Roots of all-zero subtrees, indexed by depth (`0` is the zero chunk).
    fn zero_hashes() -> &'static [Chunk];

    /// Hash family identifier, checked against the engine configuration.
    fn hash_family() -> HashFamily;

    /// Root of an all-zero subtree of the given depth.
    fn zero_hash(depth: usize) -> Chunk {
        Self::zero_hashes()[depth]
    }
}

/// SHA-256 backend; the canonical choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256Hasher;

static SHA256_ZERO_HASHES: Lazy<Vec<Chunk>> = Lazy::new(build_zero_hashes::<Sha256Hasher>);

impl ChunkHasher for Sha256Hasher {
    fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
        let mut hasher = Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }

    fn zero_hashes() -> &'static [Chunk] {
        &SHA256_ZERO_HASHES
    }

    fn hash_family() -> HashFamily {
        HashFamily::Sha256
    }
}

/// BLAKE2s-256 backend for deployments that commit with BLAKE2s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blake2sHasher;

static BLAKE2S_ZERO_HASHES: Lazy<Vec<Chunk>> = Lazy::new(build_zero_hashes::<Blake2sHasher>);

impl ChunkHasher for Blake2sHasher {
    fn hash_pair(left: &Chunk, right: &Chunk) -> Chunk {
        let mut hasher = Blake2s256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }

    fn zero_hashes() -> &'static [Chunk] {
        &BLAKE2S_ZERO_HASHES
    }

    fn hash_family() -> HashFamily {
        HashFamily::Blake2s
    }
}
