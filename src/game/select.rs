//! Event Selector
//!
//! Deterministic sampling of a fixed-size event set from a candidate pool
//! under year-span constraints. Runs once per puzzle, in the generation job.

use serde::{Serialize, Deserialize};
use thiserror::Error;
use tracing::debug;

use crate::core::rng::DeterministicRng;
use crate::game::event::{Event, span_of};

/// Configuration for event selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Number of events per puzzle
    pub count: usize,

    /// Minimum acceptable span (max year - min year)
    pub min_span: i32,

    /// Maximum acceptable span
    pub max_span: i32,

    /// Years that must not appear in the puzzle
    pub exclude_years: Vec<i32>,

    /// Reseed-and-retry budget before giving up
    pub max_attempts: u32,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            count: 6,
            min_span: 50,
            max_span: 3000,
            exclude_years: Vec::new(),
            max_attempts: 40,
        }
    }
}

/// Selection errors. Fatal to the generation job.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// Not enough candidates after exclusions.
    #[error("pool too small: need {needed} events, {available} available")]
    PoolTooSmall {
        /// Events required per puzzle
        needed: usize,
        /// Candidates remaining after year exclusions
        available: usize,
    },

    /// No attempt produced a span inside the configured window.
    #[error("selection exhausted after {attempts} attempts: no subset satisfied span constraints")]
    Exhausted {
        /// Attempts made before giving up
        attempts: u32,
    },
}

/// Deterministically select `config.count` events from `pool`.
///
/// Each attempt `a` shuffles the (exclusion-filtered) pool with a fresh
/// `DeterministicRng` seeded from `seed + a`, takes the first `count`
/// events, and accepts iff their span lies in `[min_span, max_span]`.
///
/// # Determinism Guarantee
///
/// Identical `(pool content and order, seed, config)` always yields an
/// identical output list: same ids, same order.
///
/// # Errors
///
/// Returns [`SelectError::PoolTooSmall`] when the filtered pool cannot
/// cover `count`, and [`SelectError::Exhausted`] when `max_attempts`
/// shuffles all miss the span window. Both are fatal to the caller;
/// neither is ever downgraded to an invalid puzzle.
pub fn select(
    pool: &[Event],
    seed: u64,
    config: &SelectConfig,
) -> Result<Vec<Event>, SelectError> {
    let candidates: Vec<&Event> = pool
        .iter()
        .filter(|e| !config.exclude_years.contains(&e.year))
        .collect();

    if candidates.len() < config.count {
        return Err(SelectError::PoolTooSmall {
            needed: config.count,
            available: candidates.len(),
        });
    }

    for attempt in 0..config.max_attempts {
        let mut rng = DeterministicRng::new(seed.wrapping_add(attempt as u64));

        let mut shuffled = candidates.clone();
        rng.shuffle(&mut shuffled);

        let picked: Vec<Event> = shuffled[..config.count].iter().map(|e| (*e).clone()).collect();
        let span = span_of(&picked);

        if span >= config.min_span && span <= config.max_span {
            debug!(attempt, span, "selection accepted");
            return Ok(picked);
        }

        debug!(attempt, span, min = config.min_span, max = config.max_span, "span outside window, reseeding");
    }

    Err(SelectError::Exhausted {
        attempts: config.max_attempts,
    })
}

// =============================================================================
// TESTS
// =============================================================================
