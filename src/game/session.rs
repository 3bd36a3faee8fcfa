//! Session Layer
//!
//! The play session owns one mutable `OrderState` plus the accumulated
//! hints for one puzzle, and is the only thing that commits a score.
//! Persistence and auth live outside the core; this module only consumes
//! their readiness signals and the `Progress` data shape.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};
use tracing::warn;

use crate::game::engine::OrderState;
use crate::game::event::{EventId, Puzzle};
use crate::game::hint::{self, Hint, DEFAULT_BRACKET_SPAN};
use crate::game::score::{self, Score};

// =============================================================================
// PROGRESS (external persistence shape)
// =============================================================================

/// Persisted per-puzzle progress.
///
/// Sourced from a per-user store (authenticated) or a local session store
/// (anonymous). Only this shape is load-bearing; the core never talks to
/// either store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Last persisted ordering (may be stale or partial)
    pub ordering: Vec<EventId>,

    /// Hints earned so far, in order
    pub hints: Vec<Hint>,

    /// Commit timestamp, if the session finished
    pub completed_at: Option<DateTime<Utc>>,

    /// Committed score, if the session finished
    pub score: Option<Score>,
}

impl Progress {
    /// Empty progress for a fresh session.
    pub fn empty() -> Self {
        Self {
            ordering: Vec::new(),
            hints: Vec::new(),
            completed_at: None,
            score: None,
        }
    }
}

// =============================================================================
// DERIVED STATUS
// =============================================================================

/// Readiness of an external signal (puzzle fetch, auth, progress load).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadState {
    /// Still loading
    Loading,
    /// Available
    Ready,
    /// Failed to load
    Failed,
}

/// Summary status consumed by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Waiting on the puzzle record
    LoadingPuzzle,
    /// Waiting on auth readiness
    LoadingAuth,
    /// Waiting on persisted progress
    LoadingProgress,
    /// Playable
    Ready,
    /// Committed; ordering, hints and score are frozen history
    Completed,
    /// An upstream signal failed or persisted data is inconsistent
    Error,
}

/// Combine external readiness signals into one status.
///
/// Any failed signal wins as `Error`. Loading states are reported in
/// dependency order: puzzle, then auth, then progress. A progress record
/// marked completed but missing its score is a data-consistency error
/// (an upstream persistence bug): surfaced as `Error`, never repaired by
/// guessing a score.
pub fn derive_status(
    puzzle: LoadState,
    auth: LoadState,
    progress: LoadState,
    progress_record: Option<&Progress>,
) -> SessionStatus {
    if puzzle == LoadState::Failed || auth == LoadState::Failed || progress == LoadState::Failed {
        return SessionStatus::Error;
    }
    if puzzle == LoadState::Loading {
        return SessionStatus::LoadingPuzzle;
    }
    if auth == LoadState::Loading {
        return SessionStatus::LoadingAuth;
    }
    if progress == LoadState::Loading {
        return SessionStatus::LoadingProgress;
    }

    match progress_record {
        Some(p) if p.completed_at.is_some() => {
            if p.score.is_some() {
                SessionStatus::Completed
            } else {
                warn!("progress marked completed without a score");
                SessionStatus::Error
            }
        }
        _ => SessionStatus::Ready,
    }
}

// =============================================================================
// PLAY SESSION
// =============================================================================

/// One player's session over one puzzle.
///
/// Owns the mutable `{ordering, locks}` state; the caller applies actions
/// serially. After `commit` the session is read-only history: further
/// moves and hint requests are no-ops.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaySession {
    puzzle: Puzzle,
    state: OrderState,
    hints: Vec<Hint>,
    completed_at: Option<DateTime<Utc>>,
    score: Option<Score>,
}

impl PlaySession {
    /// Start a fresh session from the puzzle's baseline ordering.
    pub fn new(puzzle: Puzzle) -> Self {
        let state = OrderState::new(&puzzle.baseline_ids());
        Self {
            puzzle,
            state,
            hints: Vec::new(),
            completed_at: None,
            score: None,
        }
    }

    /// Resume a session from persisted progress.
    ///
    /// Tolerates stale or partial data: the ordering is normalized against
    /// the puzzle and locks recomputed from the anchor hints.
    pub fn resume(puzzle: Puzzle, progress: &Progress) -> Self {
        let baseline = puzzle.baseline_ids();
        let supplied = if progress.ordering.is_empty() {
            None
        } else {
            Some(progress.ordering.as_slice())
        };
        let state = OrderState::hydrate(&baseline, supplied, &progress.hints);

        Self {
            puzzle,
            state,
            hints: progress.hints.clone(),
            completed_at: progress.completed_at,
            score: progress.score.clone(),
        }
    }

    /// Current ordering.
    pub fn ordering(&self) -> &[EventId] {
        &self.state.ordering
    }

    /// Current lock map.
    pub fn locks(&self) -> &crate::game::engine::LockMap {
        &self.state.locks
    }

    /// Hints earned so far.
    pub fn hints(&self) -> &[Hint] {
        &self.hints
    }

    /// Number of hints taken (drives the score multiplier).
    pub fn hints_used(&self) -> u32 {
        self.hints.len() as u32
    }

    /// Committed score, if any.
    pub fn score(&self) -> Option<&Score> {
        self.score.as_ref()
    }

    /// Whether the session has been committed.
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Move an event. No-op after commit.
    pub fn move_event(&mut self, event_id: &EventId, target_index: usize) {
        if self.is_completed() {
            return;
        }
        self.state.move_event(event_id, target_index);
    }

    /// Take an anchor hint: generates, records, and applies it.
    ///
    /// Returns the hint for display, or `None` on an empty puzzle or after
    /// commit.
    pub fn take_anchor_hint(&mut self, seed: Option<u64>) -> Option<Hint> {
        if self.is_completed() {
            return None;
        }
        let correct = self.puzzle.correct_order();
        let hint = hint::anchor_hint(&self.state.ordering, &correct, &self.hints, seed)?;
        self.state.apply_hint(&hint);
        self.hints.push(hint.clone());
        Some(hint)
    }

    /// Take a relative hint: generates and records it (display-only).
    pub fn take_relative_hint(&mut self, seed: Option<u64>) -> Option<Hint> {
        if self.is_completed() {
            return None;
        }
        let correct = self.puzzle.correct_order();
        let hint = hint::relative_hint(&self.state.ordering, &correct, &self.hints, seed)?;
        self.hints.push(hint.clone());
        Some(hint)
    }

    /// Take a bracket hint for one event (display-only).
    ///
    /// Returns `None` for ids outside the puzzle or after commit.
    pub fn take_bracket_hint(&mut self, event_id: &EventId) -> Option<Hint> {
        if self.is_completed() {
            return None;
        }
        let event = self.puzzle.event(event_id)?;
        let hint = hint::bracket_hint(event, DEFAULT_BRACKET_SPAN);
        self.hints.push(hint.clone());
        Some(hint)
    }

    /// Commit the final ordering and score it.
    ///
    /// Runs the scorer exactly once; repeated calls return the recorded
    /// score without rescoring.
    pub fn commit(&mut self, now: DateTime<Utc>) -> Score {
        if let Some(existing) = &self.score {
            return existing.clone();
        }
        let s = score::score(&self.state.ordering, &self.puzzle.events, self.hints_used());
        self.score = Some(s.clone());
        self.completed_at = Some(now);
        s
    }

    /// Export the persistence shape for the external store.
    pub fn to_progress(&self) -> Progress {
        Progress {
            ordering: self.state.ordering.clone(),
            hints: self.hints.clone(),
            completed_at: self.completed_at,
            score: self.score.clone(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
