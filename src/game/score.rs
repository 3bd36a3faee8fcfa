//! Scorer
//!
//! Pairwise scoring of a committed ordering. Pure; invoked exactly once
//! per session, at commit.
//!
//! The hint multiplier is computed in integer percent so the rounded total
//! is bit-identical on every platform.

use serde::{Serialize, Deserialize};

use crate::game::event::{Event, EventId, correct_order};

/// Points awarded per correctly ordered pair (before the multiplier).
pub const POINTS_PER_PAIR: u32 = 2;

/// Stepwise hint multiplier, in percent: 0 hints = 100, 1 = 85, 2 = 70,
/// 3 or more = 50. Risk-reward: each hint taken cuts the payout.
pub fn hint_multiplier_percent(hints_used: u32) -> u32 {
    match hints_used {
        0 => 100,
        1 => 85,
        2 => 70,
        _ => 50,
    }
}

/// Final score for a committed session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Score {
    /// Rounded total: correct_pairs * POINTS_PER_PAIR * multiplier
    pub total_score: u32,

    /// Pairs whose relative order matches true chronology
    pub correct_pairs: u32,

    /// All C(n, 2) unordered pairs
    pub total_pairs: u32,

    /// Indices where the final ordering matches the true order exactly
    pub perfect_positions: u32,

    /// Hints taken during the session
    pub hints_used: u32,

    /// Multiplier applied to the total (display value)
    pub hint_multiplier: f64,
}

/// Score a final ordering against the true chronology of `events`.
///
/// The true order sorts by year with ties broken by id, giving a total
/// order. A pair counts as correct when its relative order in
/// `final_ordering` matches its relative order in the true order. Events
/// missing from `final_ordering` (malformed input) simply contribute no
/// correct pairs and no perfect positions.
pub fn score(final_ordering: &[EventId], events: &[Event], hints_used: u32) -> Score {
    let true_order = correct_order(events);
    let n = events.len();
    let total_pairs = (n.saturating_sub(1) * n / 2) as u32;

    let final_pos = |id: &EventId| final_ordering.iter().position(|f| f == id);

    let mut correct_pairs = 0u32;
    for i in 0..true_order.len() {
        for j in (i + 1)..true_order.len() {
            // true_order[i] precedes true_order[j]; the pair is correct
            // when the final ordering agrees.
            if let (Some(fi), Some(fj)) = (final_pos(&true_order[i]), final_pos(&true_order[j])) {
                if fi < fj {
                    correct_pairs += 1;
                }
            }
        }
    }

    let perfect_positions = true_order
        .iter()
        .enumerate()
        .filter(|(i, id)| final_ordering.get(*i) == Some(*id))
        .count() as u32;

    let percent = hint_multiplier_percent(hints_used);
    // Integer round-half-up of (correct * points * percent) / 100
    let total_score = (correct_pairs * POINTS_PER_PAIR * percent + 50) / 100;

    Score {
        total_score,
        correct_pairs,
        total_pairs,
        perfect_positions,
        hints_used,
        hint_multiplier: percent as f64 / 100.0,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<Event> {
        vec![
            Event::new("a", 1200, "A"),
            Event::new("b", 1400, "B"),
            Event::new("c", 1600, "C"),
            Event::new("d", 1800, "D"),
        ]
    }

    fn ids(items: &[&str]) -> Vec<EventId> {
        items.iter().map(|s| EventId::new(*s)).collect()
    }

    #[test]
    fn test_fully_correct_ordering() {
        // Scenario A
        let s = score(&ids(&["a", "b", "c", "d"]), &events(), 0);
        assert_eq!(s.correct_pairs, 6);
        assert_eq!(s.total_pairs, 6);
        assert_eq!(s.total_score, 12);
        assert_eq!(s.perfect_positions, 4);
        assert_eq!(s.hint_multiplier, 1.0);
    }

    #[test]
    fn test_exact_reverse_scores_zero() {
        // Scenario B
        let s = score(&ids(&["d", "c", "b", "a"]), &events(), 0);
        assert_eq!(s.correct_pairs, 0);
        assert_eq!(s.total_score, 0);
        assert_eq!(s.perfect_positions, 0);
    }

    #[test]
    fn test_partial_with_two_hints() {
        // Scenario C: one adjacent swap, two hints used
        let s = score(&ids(&["a", "c", "b", "d"]), &events(), 2);
        assert_eq!(s.correct_pairs, 5);
        assert_eq!(s.hint_multiplier, 0.7);
        // round(5 * 2 * 0.7) = 7
        assert_eq!(s.total_score, 7);
        assert_eq!(s.perfect_positions, 2);
        assert_eq!(s.hints_used, 2);
    }

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(hint_multiplier_percent(0), 100);
        assert_eq!(hint_multiplier_percent(1), 85);
        assert_eq!(hint_multiplier_percent(2), 70);
        assert_eq!(hint_multiplier_percent(3), 50);
        assert_eq!(hint_multiplier_percent(10), 50);
    }

    #[test]
    fn test_rounding_half_up() {
        let s = score(&ids(&["a", "b", "d", "c"]), &events(), 1);
        assert_eq!(s.correct_pairs, 5);
        // 5 * 2 * 0.85 = 8.5 -> rounds up to 9
        assert_eq!(s.total_score, 9);
    }

    #[test]
    fn test_year_ties_broken_by_id() {
        let tied = vec![
            Event::new("x", 1500, "X"),
            Event::new("y", 1500, "Y"),
        ];
        // True order is x then y (id tiebreak)
        let s = score(&ids(&["x", "y"]), &tied, 0);
        assert_eq!(s.correct_pairs, 1);
        let s = score(&ids(&["y", "x"]), &tied, 0);
        assert_eq!(s.correct_pairs, 0);
    }

    #[test]
    fn test_bc_years() {
        let ancient = vec![
            Event::new("caesar", -44, "Caesar assassinated"),
            Event::new("vesuvius", 79, "Vesuvius erupts"),
            Event::new("rome", 476, "Fall of Rome"),
        ];
        let s = score(&ids(&["caesar", "vesuvius", "rome"]), &ancient, 0);
        assert_eq!(s.correct_pairs, 3);
        assert_eq!(s.total_score, 6);
    }

    #[test]
    fn test_malformed_final_ordering_contributes_nothing() {
        // Missing ids: no pairs or positions credited for them
        let s = score(&ids(&["a", "b"]), &events(), 0);
        assert_eq!(s.correct_pairs, 1);
        assert_eq!(s.total_pairs, 6);
        assert_eq!(s.perfect_positions, 2);
    }

    #[test]
    fn test_empty() {
        let s = score(&[], &[], 0);
        assert_eq!(s.total_pairs, 0);
        assert_eq!(s.total_score, 0);
    }
}
