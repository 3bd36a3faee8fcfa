//! Hints
//!
//! The three hint kinds and their deterministic generation policies.
//! Anchor hints pin an event to its true position and project into the
//! engine's lock map; Relative and Bracket hints are display-only.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::core::hash::pick_index;
use crate::game::event::{Event, EventId};

/// Default half-width of a bracket hint's year range.
pub const DEFAULT_BRACKET_SPAN: i32 = 25;

/// Domain salt for anchor candidate folding.
const ANCHOR_SALT: &str = "ORDER_HINT_ANCHOR_V1";

/// Domain salt for relative candidate folding.
const RELATIVE_SALT: &str = "ORDER_HINT_RELATIVE_V1";

// =============================================================================
// HINT
// =============================================================================

/// An earned hint.
///
/// Closed sum type; every consumer matches exhaustively so a new hint kind
/// cannot be silently ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Hint {
    /// Pins an event to its true chronological position. Locks that slot.
    Anchor {
        /// Event being pinned
        event_id: EventId,
        /// True position in chronological order
        position: usize,
    },

    /// Reveals that one event precedes another chronologically.
    Relative {
        /// Chronologically earlier event
        earlier_event_id: EventId,
        /// Chronologically later event
        later_event_id: EventId,
    },

    /// Reveals a year window containing an event.
    Bracket {
        /// Event the window describes
        event_id: EventId,
        /// Inclusive [low, high] year range
        year_range: [i32; 2],
    },
}

/// Derive the lock map from a hint list.
///
/// Only Anchor hints lock positions; Relative/Bracket never do. A later
/// anchor for the same event wins.
pub fn lock_map(hints: &[Hint]) -> BTreeMap<EventId, usize> {
    let mut locks = BTreeMap::new();
    for hint in hints {
        match hint {
            Hint::Anchor { event_id, position } => {
                locks.insert(event_id.clone(), *position);
            }
            Hint::Relative { .. } | Hint::Bracket { .. } => {}
        }
    }
    locks
}

// =============================================================================
// ANCHOR GENERATION
// =============================================================================

/// Generate an anchor hint.
///
/// Candidates are positions where the current ordering disagrees with the
/// true order, excluding events already anchored. Falls back to all
/// not-yet-anchored positions, then to the chronologically first event, so
/// an anchor is always producible while at least one event remains
/// unanchored (and `correct` is non-empty).
///
/// Tie-breaking is deterministic: same `(current, correct, prior, seed)`
/// always returns the same hint.
pub fn anchor_hint(
    current: &[EventId],
    correct: &[EventId],
    prior: &[Hint],
    seed: Option<u64>,
) -> Option<Hint> {
    if correct.is_empty() {
        return None;
    }

    let anchored = lock_map(prior);

    // Misplaced positions, by true position
    let mut candidates: Vec<(EventId, usize)> = correct
        .iter()
        .enumerate()
        .filter(|(i, id)| current.get(*i) != Some(*id) && !anchored.contains_key(*id))
        .map(|(i, id)| (id.clone(), i))
        .collect();

    // Fallback: any not-yet-anchored position
    if candidates.is_empty() {
        candidates = correct
            .iter()
            .enumerate()
            .filter(|(_, id)| !anchored.contains_key(*id))
            .map(|(i, id)| (id.clone(), i))
            .collect();
    }

    // Final fallback: first event in true order
    if candidates.is_empty() {
        candidates.push((correct[0].clone(), 0));
    }

    let canonical: Vec<String> = candidates
        .iter()
        .map(|(id, pos)| format!("{}:{}", id, pos))
        .collect();
    let (event_id, position) = candidates[pick_index(&canonical, ANCHOR_SALT, seed)].clone();

    Some(Hint::Anchor { event_id, position })
}

// =============================================================================
// RELATIVE GENERATION
// =============================================================================

/// Generate a relative hint.
///
/// Candidates are pairs whose relative order in `current` contradicts true
/// chronology, excluding pairs already revealed by prior Relative hints.
/// Falls back to adjacent chronological pairs (revealed pairs filtered
/// there too); when even those are exhausted the earliest chronological
/// pair is re-issued so a hint stays available. Returns `None` only when
/// fewer than two events exist.
pub fn relative_hint(
    current: &[EventId],
    correct: &[EventId],
    prior: &[Hint],
    seed: Option<u64>,
) -> Option<Hint> {
    if correct.len() < 2 {
        return None;
    }

    let revealed = revealed_pairs(prior);
    let true_pos: BTreeMap<&EventId, usize> =
        correct.iter().enumerate().map(|(i, id)| (id, i)).collect();

    // Contradicting pairs: i before j in current, j before i in chronology.
    // Emitted as (earlier, later) in true order.
    let mut candidates: Vec<(EventId, EventId)> = Vec::new();
    for i in 0..current.len() {
        for j in (i + 1)..current.len() {
            let (a, b) = (&current[i], &current[j]);
            let (Some(&pa), Some(&pb)) = (true_pos.get(a), true_pos.get(b)) else {
                continue;
            };
            if pa > pb && !revealed.contains(&pair_key(a, b)) {
                candidates.push((b.clone(), a.clone()));
            }
        }
    }

    // Fallback: adjacent pairs in true chronological order
    if candidates.is_empty() {
        candidates = correct
            .windows(2)
            .filter(|w| !revealed.contains(&pair_key(&w[0], &w[1])))
            .map(|w| (w[0].clone(), w[1].clone()))
            .collect();
    }

    // Everything revealed already: re-issue the earliest chronological pair
    if candidates.is_empty() {
        candidates.push((correct[0].clone(), correct[1].clone()));
    }

    let canonical: Vec<String> = candidates
        .iter()
        .map(|(earlier, later)| format!("{}<{}", earlier, later))
        .collect();
    let (earlier_event_id, later_event_id) =
        candidates[pick_index(&canonical, RELATIVE_SALT, seed)].clone();

    Some(Hint::Relative { earlier_event_id, later_event_id })
}

/// Unordered pair key, smaller id first.
fn pair_key(a: &EventId, b: &EventId) -> (EventId, EventId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

/// Pairs already revealed by prior Relative hints, as unordered keys.
fn revealed_pairs(prior: &[Hint]) -> Vec<(EventId, EventId)> {
    prior
        .iter()
        .filter_map(|h| match h {
            Hint::Relative { earlier_event_id, later_event_id } => {
                Some(pair_key(earlier_event_id, later_event_id))
            }
            Hint::Anchor { .. } | Hint::Bracket { .. } => None,
        })
        .collect()
}

// =============================================================================
// BRACKET GENERATION
// =============================================================================

/// Generate a bracket hint for one event.
///
/// Pure function of the event and half-width: the range is
/// `[year - span, year + span]`, normalized so low <= high. No candidate
/// search, no randomness.
pub fn bracket_hint(event: &Event, span: i32) -> Hint {
    let a = event.year.saturating_sub(span);
    let b = event.year.saturating_add(span);
    let year_range = if a <= b { [a, b] } else { [b, a] };

    Hint::Bracket {
        event_id: event.id.clone(),
        year_range,
    }
}

// =============================================================================
// TESTS
// =============================================================================
