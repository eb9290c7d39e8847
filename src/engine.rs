//! Configured entry point.
//!
//! An [`Engine`] pairs a validated [`EngineConfig`] with a hash backend. It
//! holds no mutable state, so a single engine can be shared by reference (or
//! copied) across any number of threads.

use std::marker::PhantomData;

use crate::config::{validate, ConfigError, EngineConfig};
use crate::hash::{Chunk, ChunkHasher, Sha256Hasher};
use crate::merkle::{LeafChunks, MerkleTree, Merkleizer};
use crate::schema::TypeDescriptor;
use crate::ser::{self, SszError, SszResult};
use crate::value::Value;

/// Encoder, decoder and Merkleizer bound to one configuration.
#[derive(Debug, Clone, Copy)]
pub struct Engine<H: ChunkHasher = Sha256Hasher> {
    config: EngineConfig,
    marker: PhantomData<H>,
}

impl Default for Engine<Sha256Hasher> {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            marker: PhantomData,
        }
    }
}

impl<H: ChunkHasher> Engine<H> {
    /// Validates `config` and checks that it names the backend `H`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        validate(&config)?;
        if config.hash != H::hash_family() {
            return Err(ConfigError::HashFamilyMismatch {
                configured: config.hash,
                hasher: H::hash_family(),
            });
        }
        Ok(Self {
            config,
            marker: PhantomData,
        })
    }

    /// Validated configuration the engine runs with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Encodes `value` into a fresh buffer.
    pub fn encode(&self, value: &Value, desc: &TypeDescriptor) -> SszResult<Vec<u8>> {
        self.check_depth(desc)?;
        ser::encode(value, desc)
    }

    /// Encodes into `out`, reusing its allocation. Returns the written length.
    pub fn encode_into(
        &self,
        value: &Value,
        desc: &TypeDescriptor,
        out: &mut Vec<u8>,
    ) -> SszResult<usize> {
        self.check_depth(desc)?;
        let written = ser::encode_into(value, desc, out)?;
        tracing::trace!(kind = %desc.kind(), written, capacity = out.capacity(), "encoded into buffer");
        Ok(written)
    }

    /// Decodes `bytes`, rejecting input over the configured size limit.
    pub fn decode(&self, bytes: &[u8], desc: &TypeDescriptor) -> SszResult<Value> {
        self.check_depth(desc)?;
        let limit = self.config.limits.max_input_bytes;
        if bytes.len() > limit {
            tracing::debug!(len = bytes.len(), limit, "rejecting oversized input");
            return Err(SszError::InputTooLarge {
                limit,
                got: bytes.len(),
            });
        }
        ser::decode(bytes, desc).map_err(|err| {
            tracing::debug!(kind = %desc.kind(), error = %err, "decode failed");
            err
        })
    }

    /// Merkle root of `value` under the engine's backend.
    pub fn hash_tree_root(&self, value: &Value, desc: &TypeDescriptor) -> SszResult<Chunk> {
        self.check_depth(desc)?;
        let _span = tracing::debug_span!(
            "hash_tree_root",
            kind = %desc.kind(),
            hash = %self.config.hash
        )
        .entered();
        self.merkleizer().hash_tree_root(value, desc)
    }

    /// Top-level leaves of `value` before merkleization.
    pub fn leaf_chunks(&self, value: &Value, desc: &TypeDescriptor) -> SszResult<LeafChunks> {
        self.check_depth(desc)?;
        self.merkleizer().leaf_chunks(value, desc)
    }

    /// Top-level tree of `value`, retained for branch extraction.
    pub fn merkle_tree(&self, value: &Value, desc: &TypeDescriptor) -> SszResult<MerkleTree<H>> {
        let leaves = self.leaf_chunks(value, desc)?;
        MerkleTree::from_leaf_chunks(leaves, &self.config.parallelism)
    }

    fn merkleizer(&self) -> Merkleizer<H> {
        Merkleizer::new(self.config.parallelism)
    }

    fn check_depth(&self, desc: &TypeDescriptor) -> SszResult<()> {
        let limit = self.config.limits.max_nesting_depth;
        let depth = desc.nesting_depth();
        if depth > limit {
            return Err(SszError::NestingTooDeep { limit, depth });
        }
        Ok(())
    }
}
