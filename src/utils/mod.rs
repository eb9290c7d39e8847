//! Utility helpers shared by the encoder and the Merkleizer.

pub mod parallel;

pub use parallel::{map_pairs, preferred_chunk_size, try_map};
