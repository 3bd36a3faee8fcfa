//! # Order Puzzle Core
//!
//! Deterministic computational core for the Order daily puzzle game.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ORDER CORE                              │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── rng.rs      - Deterministic Xorshift128+ PRNG,          │
//! │  │                 SHA-256 puzzle-seed derivation            │
//! │  └── hash.rs     - FNV-1a candidate folding for hint picks   │
//! │                                                              │
//! │  game/           - Puzzle logic (deterministic)              │
//! │  ├── event.rs    - Event and Puzzle data model               │
//! │  ├── select.rs   - Constrained event sampling                │
//! │  ├── hint.rs     - Anchor / Relative / Bracket hints         │
//! │  ├── engine.rs   - Reordering state machine with locks       │
//! │  ├── score.rs    - Pairwise scoring                          │
//! │  └── session.rs  - Session ownership, derived status         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! Everything here is a pure, synchronous transformation:
//! - No HashMap (uses BTreeMap for sorted iteration)
//! - No system time or ambient randomness; callers pass seeds and clocks
//! - All randomness from seeded Xorshift128+ and FNV-1a folds
//!
//! Given identical inputs and seeds, selection, hints, reordering, and
//! scoring produce **identical results** on any platform. Storage, network
//! sync, rendering, and auth are external collaborators; only their data
//! shapes cross into this crate.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;

// Re-export commonly used types
pub use crate::core::rng::{DeterministicRng, derive_puzzle_seed};
pub use game::event::{Event, EventId, Puzzle};
pub use game::select::{SelectConfig, SelectError, select};
pub use game::hint::Hint;
pub use game::engine::OrderState;
pub use game::score::Score;
pub use game::session::{PlaySession, Progress, SessionStatus};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Events per daily puzzle
pub const EVENT_COUNT: usize = 6;
