//! Puzzle Data Model
//!
//! Event and Puzzle definitions. Both are immutable after generation.
//! Uses BTreeMap-friendly ordered ids for deterministic iteration.

use chrono::NaiveDate;
use serde::{Serialize, Deserialize};

// =============================================================================
// EVENT ID
// =============================================================================

/// Opaque event identifier.
///
/// Implements Ord for deterministic BTreeMap ordering and for breaking
/// year ties in the chronological sort.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub String);

impl EventId {
    /// Create from any string-like id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// =============================================================================
// EVENT
// =============================================================================

/// A single historical event.
///
/// Created once at puzzle-generation time, never mutated. Years are plain
/// signed integers; negative years are BC.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique event id
    pub id: EventId,

    /// Year the event occurred (negative = BC)
    pub year: i32,

    /// Display text
    pub text: String,
}

impl Event {
    /// Create a new event.
    pub fn new(id: impl Into<EventId>, year: i32, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            year,
            text: text.into(),
        }
    }
}

// =============================================================================
// PUZZLE
// =============================================================================

/// An immutable daily puzzle.
///
/// Owns its events; the order of `events` is the baseline ordering a fresh
/// session starts from (the shuffled presentation order, not chronology).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// Puzzle identifier
    pub id: String,

    /// Calendar date this puzzle ships on
    pub date: NaiveDate,

    /// Monotonic daily counter
    pub puzzle_number: u32,

    /// Fixed-size event set, in presentation order
    pub events: Vec<Event>,

    /// Seed the selector ran with (for regeneration/verification)
    pub seed: u64,
}

impl Puzzle {
    /// Create a new puzzle.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        puzzle_number: u32,
        events: Vec<Event>,
        seed: u64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            puzzle_number,
            events,
            seed,
        }
    }

    /// Baseline event ids in presentation order.
    pub fn baseline_ids(&self) -> Vec<EventId> {
        self.events.iter().map(|e| e.id.clone()).collect()
    }

    /// True chronological order of this puzzle's event ids.
    ///
    /// Sorted by year, ties broken by id, giving a total order.
    pub fn correct_order(&self) -> Vec<EventId> {
        correct_order(&self.events)
    }

    /// Look up an event by id.
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Year span covered by this puzzle (max year - min year).
    pub fn span(&self) -> i32 {
        span_of(&self.events)
    }
}

/// Sort events into true chronological order, returning ids.
///
/// Ties broken by id for a total order.
pub fn correct_order(events: &[Event]) -> Vec<EventId> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.id.cmp(&b.id)));
    sorted.iter().map(|e| e.id.clone()).collect()
}

/// Year span of a set of events (max year - min year). Zero when empty.
pub fn span_of(events: &[Event]) -> i32 {
    let min = events.iter().map(|e| e.year).min();
    let max = events.iter().map(|e| e.year).max();
    match (min, max) {
        (Some(lo), Some(hi)) => hi - lo,
        _ => 0,
    }
}

// =============================================================================
// TESTS
// =============================================================================
