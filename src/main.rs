//! Order Puzzle Generator
//!
//! Generation job for the Order daily puzzle. Loads the event pool,
//! derives the day's seed, runs the selector, and emits the puzzle record
//! as JSON on stdout.

use anyhow::{Context, Result, bail};
use chrono::{NaiveDate, Utc};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use order_core::{
    EVENT_COUNT, VERSION,
    derive_puzzle_seed,
    game::{
        event::{Event, Puzzle},
        select::{SelectConfig, select},
    },
};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!("Order Puzzle Generator v{}", VERSION);

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("usage: {} <pool.json> <puzzle-number> [date]", args[0]);
    }

    let pool_path = &args[1];
    let puzzle_number: u32 = args[2]
        .parse()
        .with_context(|| format!("invalid puzzle number: {}", args[2]))?;
    let date: NaiveDate = match args.get(3) {
        Some(d) => d.parse().with_context(|| format!("invalid date: {}", d))?,
        None => Utc::now().date_naive(),
    };

    let pool = load_pool(pool_path)?;
    info!("Loaded {} pool events from {}", pool.len(), pool_path);

    let date_str = date.format("%Y-%m-%d").to_string();
    let seed = derive_puzzle_seed(&date_str, puzzle_number);
    info!("Date: {}  Puzzle #{}", date_str, puzzle_number);
    info!("Derived seed: {} ({})", seed, hex::encode(seed.to_le_bytes()));

    let config = SelectConfig {
        count: EVENT_COUNT,
        ..Default::default()
    };
    let events = select(&pool, seed, &config)
        .with_context(|| format!("puzzle generation failed for {}", date_str))?;

    for event in &events {
        info!("Selected: {} ({}) {}", event.id, event.year, event.text);
    }

    let puzzle = Puzzle::new(
        uuid::Uuid::new_v4().to_string(),
        date,
        puzzle_number,
        events,
        seed,
    );
    info!("Puzzle {} span: {} years", puzzle.id, puzzle.span());

    let json = serde_json::to_string_pretty(&puzzle).context("failed to serialize puzzle")?;
    println!("{json}");

    Ok(())
}

/// Load the candidate event pool from a JSON array.
fn load_pool(path: &str) -> Result<Vec<Event>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read pool file {path}"))?;
    let pool: Vec<Event> =
        serde_json::from_str(&raw).with_context(|| format!("failed to parse pool file {path}"))?;
    if pool.is_empty() {
        bail!("pool file {path} contains no events");
    }
    Ok(pool)
}
