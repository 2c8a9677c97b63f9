use std::sync::{Arc, Mutex};
use std::time::Duration;

use bingo::{GameEngine, MarkOutcome};
use tracing::{debug, info};

use crate::{Recorder, SessionEvent};

/// How a session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every number on the board was marked.
    Won { calls: usize },
    /// The caller drained the whole universe without the board filling up.
    /// Reachable when generation placed fewer numbers than the target.
    Exhausted { calls: usize },
}

/// Plays one session as the player: polls the shared engine, marks every
/// cell whose number has been called, and returns once the board is won or
/// the calls run dry.
///
/// Number-calling happens on the [`CallTimer`](crate::CallTimer) thread;
/// this loop is the player's side of the engine mutex.
pub fn run_session(
    engine: &Arc<Mutex<GameEngine>>,
    recorder: &mut Option<Recorder>,
    poll_interval: Duration,
) -> SessionOutcome {
    let mut seen_calls = 0;
    loop {
        {
            let mut engine = engine.lock().expect("engine mutex poisoned");

            // Calls that arrived since the last poll.
            for &number in &engine.called_numbers()[seen_calls..] {
                debug!(number, "saw call");
                if let Some(recorder) = recorder {
                    recorder.record(SessionEvent::Called { number });
                }
            }
            seen_calls = engine.called_numbers().len();

            let markable: Vec<(usize, usize, u32)> = engine
                .board()
                .numbered_cells()
                .filter(|&(row, column, number)| {
                    !engine.marked_cells().contains(&(row, column))
                        && engine.called_numbers().contains(&number)
                })
                .collect();
            for (row, column, number) in markable {
                match engine.mark_cell(row, column) {
                    Ok(MarkOutcome::Marked {
                        completed_row,
                        completed_column,
                    }) => {
                        info!(row, column, number, "marked");
                        if let Some(recorder) = recorder {
                            recorder.record(SessionEvent::Marked { row, column, number });
                        }
                        if completed_row {
                            info!(row, "row won");
                            if let Some(recorder) = recorder {
                                recorder.record(SessionEvent::RowWon { row });
                            }
                        }
                        if completed_column {
                            info!(column, "column won");
                            if let Some(recorder) = recorder {
                                recorder.record(SessionEvent::ColumnWon { column });
                            }
                        }
                    }
                    Ok(MarkOutcome::AlreadyMarked) => {}
                    Err(err) => {
                        // The previous mark may have finished the board.
                        debug!(%err, "mark rejected");
                        break;
                    }
                }
            }

            if engine.board_won() {
                info!(calls = seen_calls, "bingo, board won");
                if let Some(recorder) = recorder {
                    recorder.record(SessionEvent::BoardWon { calls: seen_calls });
                }
                return SessionOutcome::Won { calls: seen_calls };
            }
            if engine.called_numbers().len() as u64 >= engine.config().universe().len() {
                info!(calls = seen_calls, "calls exhausted without a win");
                if let Some(recorder) = recorder {
                    recorder.record(SessionEvent::CallsExhausted { calls: seen_calls });
                }
                return SessionOutcome::Exhausted { calls: seen_calls };
            }
        }
        std::thread::sleep(poll_interval);
    }
}

#[cfg(test)]
mod tests {
    use bingo::{ColumnRange, GameConfig, GameEngine, Phase};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::CallTimer;

    fn config() -> GameConfig {
        GameConfig {
            rows: 3,
            column_ranges: vec![
                ColumnRange { start: 1, end: 9 },
                ColumnRange { start: 10, end: 19 },
                ColumnRange { start: 20, end: 29 },
                ColumnRange { start: 30, end: 39 },
            ],
            target_count: 5,
            call_interval_ms: 1,
        }
    }

    #[test]
    fn seeded_session_plays_to_a_win() {
        // Row placement may legally leave the board short of the target;
        // pick a seed that fills it so the session can be won.
        let engine = (0..100)
            .map(|seed| GameEngine::new(config(), StdRng::seed_from_u64(seed)).unwrap())
            .find(|engine| engine.board().filled_count() == 5)
            .expect("some seed in 0..100 fills the board completely");
        let engine = Arc::new(Mutex::new(engine));

        let timer = CallTimer::start(Arc::clone(&engine), Duration::from_millis(1));
        let outcome = run_session(&engine, &mut None, Duration::from_millis(1));
        timer.stop();

        let universe_len = {
            let engine = engine.lock().unwrap();
            assert!(engine.board_won());
            assert_eq!(engine.phase(), Phase::Won);
            assert_eq!(engine.marked_cells().len(), 5);
            // Every non-empty row ends up in the winning list.
            assert!(!engine.winning_rows().is_empty());
            engine.config().universe().len()
        };
        match outcome {
            SessionOutcome::Won { calls } => assert!(calls as u64 <= universe_len),
            SessionOutcome::Exhausted { .. } => panic!("a full board must be winnable"),
        }
    }
}
