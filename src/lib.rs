//! Canonical binary serialization and Merkle hash-tree-roots for
//! schema-described values.
//!
//! Values are described at runtime by a [`TypeDescriptor`] tree. Three
//! operations are defined over a `(value, descriptor)` pair:
//!
//! * [`encode`] produces the unique canonical byte string,
//! * [`decode`] strictly parses that byte string back, rejecting every
//!   non-canonical or malformed input,
//! * [`hash_tree_root`] computes the 32-byte Merkle commitment.
//!
//! The free functions use SHA-256 and default limits. An [`Engine`] binds a
//! validated [`EngineConfig`] (hash backend, input limits, parallelism) for
//! callers that need control over those knobs.
//!
//! ```
//! use rpp_ssz::{decode, encode, hash_tree_root, TypeDescriptor, Value};
//!
//! let desc = TypeDescriptor::container("Pair")
//!     .field("a", TypeDescriptor::uint64())
//!     .field("b", TypeDescriptor::byte_list(4))
//!     .build();
//! let value = Value::Container(vec![Value::U64(5), Value::bytes_list(&[1, 2, 3])]);
//!
//! let bytes = encode(&value, &desc).unwrap();
//! assert_eq!(bytes.len(), 15);
//! assert_eq!(decode(&bytes, &desc).unwrap(), value);
//! let _root = hash_tree_root(&value, &desc).unwrap();
//! ```

pub mod config;
pub mod engine;
pub mod hash;
pub mod merkle;
pub mod schema;
pub mod ser;
pub mod utils;
pub mod value;

pub use config::{
    BuiltinProfile, ConfigError, EngineConfig, EngineConfigBuilder, HashFamily,
    ParallelismPolicy, ResourceLimits,
};
pub use engine::Engine;
pub use hash::{Blake2sHasher, Chunk, ChunkHasher, Sha256Hasher};
pub use merkle::{compute_root_from_branch, hash_tree_root, LeafChunks, MerkleTree, Merkleizer};
pub use schema::{BasicKind, Field, TypeDescriptor, TypeKind};
pub use ser::{decode, encode, encode_into, serialized_size, SszError, SszResult};
pub use value::{Bits, Value};
