//! Order Engine
//!
//! The reordering state machine. Holds the player's current permutation
//! and the positions locked by anchor hints, and processes hydrate / move /
//! apply-hint actions.
//!
//! Every operation is total: malformed indices and unknown ids are clamped
//! or ignored, never errors. A single bad interaction must not be able to
//! corrupt in-progress play.

use std::collections::BTreeMap;
use serde::{Serialize, Deserialize};

use crate::game::event::EventId;
use crate::game::hint::{Hint, lock_map};

/// Lock map: event id -> required absolute index.
pub type LockMap = BTreeMap<EventId, usize>;

// =============================================================================
// ORDER STATE
// =============================================================================

/// Mutable per-session ordering state.
///
/// Invariants, maintained by every operation:
/// - `ordering` is a permutation of the puzzle's baseline id set
/// - `ordering[idx] == id` for every `(id, idx)` in `locks`
/// - repeating any action with unchanged inputs is a no-op
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    /// Current permutation of event ids
    pub ordering: Vec<EventId>,

    /// Positions pinned by anchor hints
    pub locks: LockMap,
}

impl OrderState {
    /// Create a fresh state from the puzzle's baseline ordering.
    pub fn new(baseline: &[EventId]) -> Self {
        Self {
            ordering: baseline.to_vec(),
            locks: LockMap::new(),
        }
    }

    /// Rebuild state from possibly stale persisted data.
    ///
    /// Locks are recomputed from the Anchor hints in `hints` (positions
    /// clamped, ids outside the baseline dropped). The supplied ordering is
    /// normalized against `baseline` (foreign ids dropped, duplicates
    /// collapsed to first occurrence, missing baseline ids appended in
    /// baseline order) so the result is a valid permutation even for
    /// partial, duplicated, or stale input. Locks are enforced last.
    pub fn hydrate(baseline: &[EventId], ordering: Option<&[EventId]>, hints: &[Hint]) -> Self {
        let mut locks = lock_map(hints);
        locks.retain(|id, _| baseline.contains(id));
        clamp_locks(&mut locks, baseline.len());

        let normalized = normalize(ordering.unwrap_or(baseline), baseline);

        let mut state = Self {
            ordering: enforce_locks(&normalized, &locks),
            locks,
        };
        state.reconcile_locks();
        state
    }

    /// Move an event to a target index (full-sequence coordinates).
    ///
    /// No-op for locked or unknown ids. The move happens in the unlocked
    /// coordinate space: locked entries are removed, the target index is
    /// adjusted for locked slots preceding it, the event repositioned, and
    /// the result reinterleaved with every locked event back at its fixed
    /// slot. Out-of-range targets are clamped.
    pub fn move_event(&mut self, event_id: &EventId, target_index: usize) {
        if self.locks.contains_key(event_id) {
            return;
        }
        if !self.ordering.contains(event_id) {
            return;
        }

        let len = self.ordering.len();
        let target = target_index.min(len.saturating_sub(1));

        // Unlocked subsequence, in current order
        let mut unlocked: Vec<EventId> = self
            .ordering
            .iter()
            .filter(|id| !self.locks.contains_key(*id))
            .cloned()
            .collect();

        // Translate the absolute target into unlocked coordinates
        let locked_before = self.locks.values().filter(|&&idx| idx < target).count();
        let adjusted = target
            .saturating_sub(locked_before)
            .min(unlocked.len().saturating_sub(1));

        if let Some(from) = unlocked.iter().position(|id| id == event_id) {
            let moved = unlocked.remove(from);
            unlocked.insert(adjusted.min(unlocked.len()), moved);
        }

        self.ordering = interleave(&unlocked, &self.locks, len);
    }

    /// Apply an earned hint to the state.
    ///
    /// Only Anchor hints have an effect: the lock is recorded (position
    /// clamped into range) and the anchored event relocated to its required
    /// slot with minimal disruption to the rest of the ordering. Relative
    /// and Bracket hints are display-only and leave state untouched.
    pub fn apply_hint(&mut self, hint: &Hint) {
        match hint {
            Hint::Anchor { event_id, position } => {
                if !self.ordering.contains(event_id) {
                    return;
                }
                let clamped = (*position).min(self.ordering.len().saturating_sub(1));
                self.locks.insert(event_id.clone(), clamped);
                self.ordering = enforce_locks(&self.ordering, &self.locks);
                self.reconcile_locks();
            }
            Hint::Relative { .. } | Hint::Bracket { .. } => {}
        }
    }

    /// Snap lock indices to where their events actually sit.
    ///
    /// Colliding or clamped lock requests can spill an event to a
    /// neighboring slot; the lock map must agree with the ordering
    /// afterward so the lock invariant stays checkable.
    fn reconcile_locks(&mut self) {
        let ordering = &self.ordering;
        for (id, idx) in self.locks.iter_mut() {
            if let Some(actual) = ordering.iter().position(|o| o == id) {
                *idx = actual;
            }
        }
    }

    /// Check the permutation and lock invariants (debugging/tests).
    pub fn invariants_hold(&self, baseline: &[EventId]) -> bool {
        let mut sorted_ordering = self.ordering.clone();
        sorted_ordering.sort();
        let mut sorted_baseline = baseline.to_vec();
        sorted_baseline.sort();

        sorted_ordering == sorted_baseline
            && self
                .locks
                .iter()
                .all(|(id, &idx)| self.ordering.get(idx) == Some(id))
    }
}

// =============================================================================
// PURE TRANSFORMS
// =============================================================================

/// Normalize an ordering against the baseline id set.
///
/// Drops unrecognized ids, keeps the first occurrence of each valid id,
/// then appends any baseline ids missing from the result, in baseline
/// order. The output is always a permutation of `baseline`.
pub fn normalize(ordering: &[EventId], baseline: &[EventId]) -> Vec<EventId> {
    let mut result: Vec<EventId> = Vec::with_capacity(baseline.len());

    for id in ordering {
        if baseline.contains(id) && !result.contains(id) {
            result.push(id.clone());
        }
    }

    for id in baseline {
        if !result.contains(id) {
            result.push(id.clone());
        }
    }

    result
}

/// Enforce the lock map over an ordering.
///
/// Removes locked events, then walks the full-length output placing each
/// locked event at its required index and filling remaining slots from the
/// rest in order. Locks for absent ids are ignored; colliding or
/// out-of-range lock indices spill to the next free slot. Idempotent:
/// applying twice equals applying once.
pub fn enforce_locks(ordering: &[EventId], locks: &LockMap) -> Vec<EventId> {
    let len = ordering.len();
    let mut slots: Vec<Option<EventId>> = vec![None; len];

    // Place locked events first, BTreeMap order for determinism
    for (id, &idx) in locks {
        if !ordering.contains(id) {
            continue;
        }
        let target = idx.min(len.saturating_sub(1));
        let slot = (target..len)
            .chain((0..target).rev())
            .find(|&s| slots[s].is_none());
        if let Some(s) = slot {
            slots[s] = Some(id.clone());
        }
    }

    // Fill the rest from the unlocked remainder, in order
    let mut unlocked = ordering
        .iter()
        .filter(|id| !locks.contains_key(*id))
        .cloned();
    for slot in &mut slots {
        if slot.is_none() {
            *slot = unlocked.next();
        }
    }

    slots.into_iter().flatten().collect()
}

/// Clamp lock indices into `[0, len)`.
fn clamp_locks(locks: &mut LockMap, len: usize) {
    if len == 0 {
        locks.clear();
        return;
    }
    for idx in locks.values_mut() {
        *idx = (*idx).min(len - 1);
    }
}

/// Reinterleave an unlocked subsequence with locked events at fixed slots.
fn interleave(unlocked: &[EventId], locks: &LockMap, len: usize) -> Vec<EventId> {
    let locked_at: BTreeMap<usize, &EventId> = locks.iter().map(|(id, &idx)| (idx, id)).collect();

    let mut rest = unlocked.iter();
    let mut result = Vec::with_capacity(len);
    for slot in 0..len {
        if let Some(id) = locked_at.get(&slot) {
            result.push((*id).clone());
        } else if let Some(id) = rest.next() {
            result.push(id.clone());
        }
    }
    result
}

// =============================================================================
// TESTS
// =============================================================================
