//! Game Logic Module
//!
//! The puzzle's computational core. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `event`: Event and Puzzle data model
//! - `select`: Constrained deterministic event sampling
//! - `hint`: Hint kinds and generation policies
//! - `engine`: Reordering state machine with anchor locks
//! - `score`: Pairwise scoring at commit
//! - `session`: Session ownership, derived status

pub mod event;
pub mod select;
pub mod hint;
pub mod engine;
pub mod score;
pub mod session;

// Re-export key types
pub use event::{Event, EventId, Puzzle};
pub use select::{SelectConfig, SelectError, select};
pub use hint::{Hint, DEFAULT_BRACKET_SPAN};
pub use engine::{OrderState, LockMap};
pub use score::{Score, POINTS_PER_PAIR};
pub use session::{PlaySession, Progress, SessionStatus, LoadState};
