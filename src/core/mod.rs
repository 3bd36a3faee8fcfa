//! Core deterministic primitives.
//!
//! All types in this module are designed for perfect cross-platform determinism.
//! They are the reason a puzzle regenerates bit-for-bit from its seed.

pub mod rng;
pub mod hash;

// Re-export core types
pub use rng::{DeterministicRng, derive_puzzle_seed};
pub use hash::pick_index;
