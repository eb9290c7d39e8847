//! Engine configuration.
//!
//! A configuration bundles the hash family the Merkleizer commits with, the
//! resource limits applied to untrusted input and the parallelism policy used
//! when the `parallel` feature is enabled. Configurations are plain data: they
//! are built once through [`EngineConfigBuilder`], validated, and then shared
//! read-only by every call made through an [`Engine`](crate::Engine).
//!
//! | Field | Standard | Strict |
//! |-------|----------|--------|
//! | `hash` | SHA-256 | SHA-256 |
//! | `limits.max_input_bytes` | 1 GiB | 16 MiB |
//! | `limits.max_nesting_depth` | 32 | 16 |
//! | `parallelism.enabled` | `true` | `false` |
//! | `parallelism.min_parallel_items` | 1024 | 1024 |

use core::fmt;
use serde::{Deserialize, Serialize};

/// Default ceiling on decoded input size (1 GiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1 << 30;

/// Default ceiling on descriptor nesting.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Default number of items below which hashing stays sequential.
pub const DEFAULT_MIN_PARALLEL_ITEMS: usize = 1024;

/// Hash family used for hash-tree-roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashFamily {
    Sha256,
    Blake2s,
}

impl fmt::Display for HashFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashFamily::Sha256 => write!(f, "sha256"),
            HashFamily::Blake2s => write!(f, "blake2s"),
        }
    }
}

/// Bounds applied to untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Largest byte slice the decoder accepts.
    pub max_input_bytes: usize,
    /// Deepest descriptor any entry point accepts.
    pub max_nesting_depth: usize,
}

impl Default for ResourceLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// When to fan hashing work out to the rayon pool.
///
/// Has no effect unless the crate is built with the `parallel` feature.
/// Parallel and sequential hashing produce identical roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParallelismPolicy {
    pub enabled: bool,
    /// Collections or tree layers smaller than this are hashed sequentially.
    pub min_parallel_items: usize,
}

impl ParallelismPolicy {
    /// Policy that never leaves the calling thread.
    pub const SEQUENTIAL: ParallelismPolicy = ParallelismPolicy {
        enabled: false,
        min_parallel_items: DEFAULT_MIN_PARALLEL_ITEMS,
    };

    /// Returns `true` when a batch of `items` should be hashed in parallel.
    pub fn should_parallelize(&self, items: usize) -> bool {
        cfg!(feature = "parallel") && self.enabled && items >= self.min_parallel_items
    }
}

impl Default for ParallelismPolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            min_parallel_items: DEFAULT_MIN_PARALLEL_ITEMS,
        }
    }
}

/// Validated engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub hash: HashFamily,
    pub limits: ResourceLimits,
    pub parallelism: ParallelismPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            hash: HashFamily::Sha256,
            limits: ResourceLimits::default(),
            parallelism: ParallelismPolicy::default(),
        }
    }
}

/// Built-in configuration profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuiltinProfile {
    /// Generous limits for trusted, state-sized payloads.
    Standard,
    /// Tight limits for payloads received from untrusted peers.
    Strict,
}

/// Error enumeration for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// `max_input_bytes` must be non-zero.
    ZeroInputLimit,
    /// `max_nesting_depth` must be non-zero.
    ZeroNestingDepth,
    /// `min_parallel_items` must be non-zero.
    ZeroParallelThreshold,
    /// The engine's hasher does not implement the configured family.
    HashFamilyMismatch {
        configured: HashFamily,
        hasher: HashFamily,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroInputLimit => write!(f, "max_input_bytes must be non-zero"),
            ConfigError::ZeroNestingDepth => write!(f, "max_nesting_depth must be non-zero"),
            ConfigError::ZeroParallelThreshold => {
                write!(f, "min_parallel_items must be non-zero")
            }
            ConfigError::HashFamilyMismatch { configured, hasher } => write!(
                f,
                "configured hash family {configured} does not match hasher {hasher}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Builder used to assemble an [`EngineConfig`] with validation.
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    pub hash: HashFamily,
    pub limits: ResourceLimits,
    pub parallelism: ParallelismPolicy,
}

impl EngineConfigBuilder {
    /// Returns a builder initialised with the standard profile.
    pub fn new() -> Self {
        Self::from_profile(BuiltinProfile::Standard)
    }

    /// Loads one of the built-in profiles.
    pub fn from_profile(profile: BuiltinProfile) -> Self {
        match profile {
            BuiltinProfile::Standard => EngineConfigBuilder {
                hash: HashFamily::Sha256,
                limits: ResourceLimits::default(),
                parallelism: ParallelismPolicy::default(),
            },
            BuiltinProfile::Strict => EngineConfigBuilder {
                hash: HashFamily::Sha256,
                limits: ResourceLimits {
                    max_input_bytes: 16 << 20,
                    max_nesting_depth: 16,
                },
                parallelism: ParallelismPolicy::SEQUENTIAL,
            },
        }
    }

    /// Selects the hash family.
    pub fn hash(mut self, hash: HashFamily) -> Self {
        self.hash = hash;
        self
    }

    /// Caps the size of decoded input.
    pub fn max_input_bytes(mut self, limit: usize) -> Self {
        self.limits.max_input_bytes = limit;
        self
    }

    /// Caps descriptor nesting.
    pub fn max_nesting_depth(mut self, depth: usize) -> Self {
        self.limits.max_nesting_depth = depth;
        self
    }

    /// Sets when hashing fans out to the thread pool.
    pub fn parallelism(mut self, policy: ParallelismPolicy) -> Self {
        self.parallelism = policy;
        self
    }

    /// Validates the collected values and produces the configuration.
    pub fn build(self) -> Result<EngineConfig, ConfigError> {
        let config = EngineConfig {
            hash: self.hash,
            limits: self.limits,
            parallelism: self.parallelism,
        };
        validate(&config)?;
        Ok(config)
    }
}

impl Default for EngineConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks every configuration invariant.
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.limits.max_input_bytes == 0 {
        return Err(ConfigError::ZeroInputLimit);
    }
    if config.limits.max_nesting_depth == 0 {
        return Err(ConfigError::ZeroNestingDepth);
    }
    if config.parallelism.min_parallel_items == 0 {
        return Err(ConfigError::ZeroParallelThreshold);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_profile_is_default() {
        let config = EngineConfigBuilder::new().build().unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn strict_profile_is_sequential() {
        let config = EngineConfigBuilder::from_profile(BuiltinProfile::Strict)
            .build()
            .unwrap();
        assert!(!config.parallelism.should_parallelize(1 << 20));
        assert_eq!(config.limits.max_nesting_depth, 16);
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert_eq!(
            EngineConfigBuilder::new().max_input_bytes(0).build(),
            Err(ConfigError::ZeroInputLimit)
        );
        assert_eq!(
            EngineConfigBuilder::new().max_nesting_depth(0).build(),
            Err(ConfigError::ZeroNestingDepth)
        );
        let policy = ParallelismPolicy {
            enabled: true,
            min_parallel_items: 0,
        };
        assert_eq!(
            EngineConfigBuilder::new().parallelism(policy).build(),
            Err(ConfigError::ZeroParallelThreshold)
        );
    }
}
