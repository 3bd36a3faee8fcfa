//! End-to-end flow: select a puzzle, play it, take hints, commit.

use chrono::{DateTime, NaiveDate, Utc};

use order_core::game::event::{Event, EventId, Puzzle};
use order_core::game::hint::Hint;
use order_core::game::select::{SelectConfig, select};
use order_core::game::session::{LoadState, PlaySession, SessionStatus, derive_status};
use order_core::derive_puzzle_seed;

fn pool() -> Vec<Event> {
    vec![
        Event::new("caesar", -44, "Caesar assassinated"),
        Event::new("vesuvius", 79, "Vesuvius erupts"),
        Event::new("rome-falls", 476, "Fall of the Western Roman Empire"),
        Event::new("charlemagne", 800, "Charlemagne crowned emperor"),
        Event::new("hastings", 1066, "Battle of Hastings"),
        Event::new("magna-carta", 1215, "Magna Carta sealed"),
        Event::new("constantinople", 1453, "Fall of Constantinople"),
        Event::new("columbus", 1492, "Columbus reaches the Americas"),
        Event::new("principia", 1687, "Newton publishes the Principia"),
        Event::new("bastille", 1789, "Storming of the Bastille"),
        Event::new("suez", 1869, "Suez Canal opens"),
        Event::new("moon", 1969, "Apollo 11 lands on the Moon"),
    ]
}

fn generate_puzzle() -> Puzzle {
    let date = NaiveDate::from_ymd_opt(2026, 8, 29).unwrap();
    let seed = derive_puzzle_seed("2026-08-29", 412);
    let events = select(&pool(), seed, &SelectConfig::default()).unwrap();
    Puzzle::new("daily-412", date, 412, events, seed)
}

fn clock() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-08-29T18:30:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

#[test]
fn generation_is_reproducible() {
    let p1 = generate_puzzle();
    let p2 = generate_puzzle();
    assert_eq!(p1.events, p2.events);
    assert_eq!(p1.seed, p2.seed);
    assert_eq!(p1.events.len(), 6);
}

#[test]
fn full_play_through() {
    let puzzle = generate_puzzle();
    let correct = puzzle.correct_order();
    let mut session = PlaySession::new(puzzle);

    // Take one anchor hint; its event must be pinned afterward
    let Some(Hint::Anchor { event_id, position }) = session.take_anchor_hint(Some(9)) else {
        panic!("expected anchor hint");
    };
    assert_eq!(session.ordering()[position], event_id);

    // Solve the puzzle by moving everything into chronological order;
    // moving the locked event is silently ignored
    for (target, id) in correct.iter().enumerate() {
        session.move_event(id, target);
    }
    assert_eq!(session.ordering(), correct.as_slice());

    let score = session.commit(clock());
    assert_eq!(score.correct_pairs, score.total_pairs);
    assert_eq!(score.total_pairs, 15); // C(6,2)
    assert_eq!(score.perfect_positions, 6);
    assert_eq!(score.hints_used, 1);
    assert_eq!(score.hint_multiplier, 0.85);
    // 15 pairs * 2 points * 0.85 = 25.5, rounds to 26
    assert_eq!(score.total_score, 26);
}

#[test]
fn resume_and_status_lifecycle() {
    let puzzle = generate_puzzle();
    let mut session = PlaySession::new(puzzle.clone());

    session.take_anchor_hint(None);
    session.take_relative_hint(None);
    let saved = session.to_progress();

    // Mid-game: progress exists but is not completed
    let status = derive_status(
        LoadState::Ready,
        LoadState::Ready,
        LoadState::Ready,
        Some(&saved),
    );
    assert_eq!(status, SessionStatus::Ready);

    // Resuming from persisted progress reproduces the session exactly
    let resumed = PlaySession::resume(puzzle, &saved);
    assert_eq!(resumed.ordering(), session.ordering());
    assert_eq!(resumed.locks(), session.locks());
    assert_eq!(resumed.hints_used(), 2);

    // Commit, persist, and the status flips to Completed
    session.commit(clock());
    let done = session.to_progress();
    let status = derive_status(
        LoadState::Ready,
        LoadState::Ready,
        LoadState::Ready,
        Some(&done),
    );
    assert_eq!(status, SessionStatus::Completed);
}

#[test]
fn garbage_progress_cannot_block_play() {
    let puzzle = generate_puzzle();
    let garbage = order_core::game::session::Progress {
        ordering: vec![
            EventId::new("not-a-real-event"),
            puzzle.events[0].id.clone(),
            puzzle.events[0].id.clone(),
        ],
        hints: vec![Hint::Anchor { event_id: EventId::new("also-fake"), position: 99 }],
        completed_at: None,
        score: None,
    };

    let session = PlaySession::resume(puzzle.clone(), &garbage);

    // Still a valid permutation of the puzzle's ids, fake lock dropped
    let mut got: Vec<EventId> = session.ordering().to_vec();
    got.sort();
    let mut want = puzzle.baseline_ids();
    want.sort();
    assert_eq!(got, want);
    assert!(session.locks().is_empty());
}

#[test]
fn progress_serializes_as_plain_data() {
    let puzzle = generate_puzzle();
    let mut session = PlaySession::new(puzzle);
    session.take_anchor_hint(Some(3));
    session.commit(clock());

    let progress = session.to_progress();
    let json = serde_json::to_string(&progress).unwrap();
    let back: order_core::game::session::Progress = serde_json::from_str(&json).unwrap();
    assert_eq!(back, progress);
}
