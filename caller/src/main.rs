use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bingo::{visualize_board, ColumnRange, GameConfig, GameEngine};
use caller::{run_session, CallTimer, Recorder, SessionOutcome};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Plays automated bingo sessions against the built-in number caller.
#[derive(Parser)]
struct Args {
    /// Board height
    #[arg(long, default_value_t = 3)]
    rows: usize,

    /// Column value ranges, left to right, e.g. "1-9 10-19 20-29 30-39"
    #[arg(long, num_args(1..), value_delimiter = ' ')]
    ranges: Vec<ColumnRange>,

    /// How many numbers to place on the board
    #[arg(long, default_value_t = 5)]
    target: usize,

    /// Milliseconds between called numbers
    #[arg(long, default_value_t = 1000)]
    call_interval_ms: u64,

    /// How many sessions to play, resetting the game in between
    #[arg(short, long, default_value_t = 1)]
    num_sessions: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Record each session as a JSON file into this directory
    #[arg(short, long)]
    record_sessions_to_directory: Option<PathBuf>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

fn default_ranges() -> Vec<ColumnRange> {
    vec![
        ColumnRange { start: 1, end: 9 },
        ColumnRange { start: 10, end: 19 },
        ColumnRange { start: 20, end: 29 },
        ColumnRange { start: 30, end: 39 },
    ]
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let rng = StdRng::seed_from_u64(seed);

    let column_ranges = if args.ranges.is_empty() {
        default_ranges()
    } else {
        args.ranges
    };
    let config = GameConfig {
        rows: args.rows,
        column_ranges,
        target_count: args.target,
        call_interval_ms: args.call_interval_ms,
    };
    let interval = Duration::from_millis(config.call_interval_ms);
    let poll_interval = Duration::from_millis((config.call_interval_ms / 2).max(1));

    let mut recorder = if let Some(dir_path) = args.record_sessions_to_directory {
        Some(Recorder::new(dir_path)?)
    } else {
        None
    };

    let engine = Arc::new(Mutex::new(GameEngine::new(config, rng)?));

    let mut wins = 0;
    let mut exhausted = 0;
    for session_idx in 0..args.num_sessions {
        if session_idx > 0 {
            engine.lock().expect("engine mutex poisoned").reset();
        }

        let timer = CallTimer::start(Arc::clone(&engine), interval);
        let outcome = run_session(&engine, &mut recorder, poll_interval);
        timer.stop();

        let final_state = engine.lock().expect("engine mutex poisoned").snapshot();
        if let Some(recorder) = &mut recorder {
            recorder.write_session(final_state.clone())?;
        }
        match outcome {
            SessionOutcome::Won { calls } => {
                wins += 1;
                info!(session_idx, calls, "session won");
            }
            SessionOutcome::Exhausted { calls } => {
                exhausted += 1;
                info!(session_idx, calls, "session ran out of numbers");
            }
        }
        info!(
            current = final_state.current_number,
            recent = ?final_state.recent_calls(5),
            "final calls"
        );
        println!(
            "{}",
            visualize_board(&final_state.board, &final_state.marked_cells)
        );
    }

    eprintln!(
        "End result:\n- {} of {} sessions won\n- {} ran out of numbers",
        wins, args.num_sessions, exhausted
    );

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
