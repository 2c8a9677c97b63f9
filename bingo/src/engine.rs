use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Board, CallExhausted, GameConfig, IllegalMark, InvalidConfig, Snapshot};

/// The transient message shown when the player taps a cell that cannot be
/// marked yet.
pub const SELECT_CURRENT_NUMBER: &str = "Select the cell with the current number!";

/// Bound for the duplicate-avoiding redraw loop in [`GameEngine::call_next()`].
const CALL_DRAW_ATTEMPTS: u32 = 10_000;

/// Where a game is in its lifecycle.
///
/// `Idle` only exists between construction and the first call; a reset jumps
/// straight back into `Playing`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Playing,
    Won,
}

/// What a successful [`GameEngine::mark_cell()`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The position was already marked; nothing changed.
    AlreadyMarked,
    /// The position is newly marked. The flags report wins this mark
    /// completed (a row or column that was already won stays won but is not
    /// reported again).
    Marked {
        completed_row: bool,
        completed_column: bool,
    },
}

/// A single-player bingo game: the generated board plus all call, mark and
/// win state, advanced by the host through [`call_next()`](Self::call_next),
/// [`mark_cell()`](Self::mark_cell) and [`reset()`](Self::reset).
///
/// The engine is plain single-threaded data. A host with a timer thread is
/// expected to wrap it in a mutex so that timer-driven calls and
/// player-driven marks serialize against each other.
#[derive(Debug)]
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    board: Board,
    called: Vec<u32>,
    marked: BTreeSet<(usize, usize)>,
    winning_rows: Vec<usize>,
    winning_columns: Vec<usize>,
    board_won: bool,
    error_message: Option<&'static str>,
    phase: Phase,
}

impl GameEngine {
    /// Validates the config and generates the first board.
    pub fn new(config: GameConfig, mut rng: StdRng) -> Result<Self, InvalidConfig> {
        config.validate()?;
        let board = Board::generate(&config, &mut rng);
        Ok(Self {
            config,
            rng,
            board,
            called: Vec::new(),
            marked: BTreeSet::new(),
            winning_rows: Vec::new(),
            winning_columns: Vec::new(),
            board_won: false,
            error_message: None,
            phase: Phase::Idle,
        })
    }

    /// Draws the next called number.
    ///
    /// The draw is uniform over the whole configured universe and repeats
    /// until it hits a number that has not been called in this game. The
    /// repeat loop is bounded: once every number has been called the call
    /// fails with [`CallExhausted::UniverseDrained`], and a (practically
    /// unreachable) run of unlucky draws fails with
    /// [`CallExhausted::AttemptsExceeded`] instead of spinning forever.
    ///
    /// A successful call clears the transient error message and re-checks
    /// board completion. Row and column wins are only evaluated on marks.
    pub fn call_next(&mut self) -> Result<u32, CallExhausted> {
        let universe = self.config.universe();
        if self.called.len() as u64 >= universe.len() {
            return Err(CallExhausted::UniverseDrained);
        }
        let mut drawn = None;
        for _ in 0..CALL_DRAW_ATTEMPTS {
            let candidate = self.rng.gen_range(universe.start..=universe.end);
            if !self.called.contains(&candidate) {
                drawn = Some(candidate);
                break;
            }
        }
        let number = drawn.ok_or(CallExhausted::AttemptsExceeded {
            attempts: CALL_DRAW_ATTEMPTS,
        })?;

        self.called.push(number);
        self.error_message = None;
        if self.phase == Phase::Idle {
            self.phase = Phase::Playing;
        }
        self.refresh_board_win();
        Ok(number)
    }

    /// Marks the cell at `(row, column)` if its number has been called.
    ///
    /// Rejections for an empty cell or a not-yet-called number set the
    /// transient [`SELECT_CURRENT_NUMBER`] message and change nothing else.
    /// Marks on a won board are rejected outright; the host is expected to
    /// have suspended interaction, but the engine does not rely on it.
    pub fn mark_cell(&mut self, row: usize, column: usize) -> Result<MarkOutcome, IllegalMark> {
        if self.board_won {
            return Err(IllegalMark::BoardAlreadyWon);
        }
        let cell = self
            .board
            .get(row, column)
            .ok_or(IllegalMark::OutOfBounds { row, column })?;
        let Some(number) = cell.number() else {
            self.error_message = Some(SELECT_CURRENT_NUMBER);
            return Err(IllegalMark::EmptyCell { row, column });
        };
        if !self.called.contains(&number) {
            self.error_message = Some(SELECT_CURRENT_NUMBER);
            return Err(IllegalMark::NotYetCalled { number });
        }
        if !self.marked.insert((row, column)) {
            return Ok(MarkOutcome::AlreadyMarked);
        }
        self.error_message = None;

        let completed_row = self.row_complete(row) && !self.winning_rows.contains(&row);
        if completed_row {
            self.winning_rows.push(row);
        }
        let completed_column = self.column_complete(column) && !self.winning_columns.contains(&column);
        if completed_column {
            self.winning_columns.push(column);
        }
        self.refresh_board_win();

        Ok(MarkOutcome::Marked {
            completed_row,
            completed_column,
        })
    }

    /// Starts a fresh game on a newly generated board, keeping the config
    /// and the RNG.
    pub fn reset(&mut self) {
        self.board = Board::generate(&self.config, &mut self.rng);
        self.called.clear();
        self.marked.clear();
        self.winning_rows.clear();
        self.winning_columns.clear();
        self.board_won = false;
        self.error_message = None;
        self.phase = Phase::Playing;
    }

    // A row is complete when each of its cells is blank or marked. A cell
    // without a number can never be marked, so a column is only complete
    // when it is fully filled and fully marked.
    fn row_complete(&self, row: usize) -> bool {
        (0..self.board.columns())
            .all(|column| self.board.cell(row, column).is_empty() || self.marked.contains(&(row, column)))
    }

    fn column_complete(&self, column: usize) -> bool {
        (0..self.board.rows()).all(|row| self.marked.contains(&(row, column)))
    }

    fn refresh_board_win(&mut self) {
        if self.marked.len() == self.config.target_count {
            self.board_won = true;
            self.phase = Phase::Won;
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn called_numbers(&self) -> &[u32] {
        &self.called
    }

    /// The most recently called number, if any number has been called.
    pub fn current_number(&self) -> Option<u32> {
        self.called.last().copied()
    }

    pub fn marked_cells(&self) -> &BTreeSet<(usize, usize)> {
        &self.marked
    }

    pub fn winning_rows(&self) -> &[usize] {
        &self.winning_rows
    }

    pub fn winning_columns(&self) -> &[usize] {
        &self.winning_columns
    }

    pub fn board_won(&self) -> bool {
        self.board_won
    }

    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The read-only state a front end renders after each operation.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            phase: self.phase,
            current_number: self.current_number(),
            called_numbers: self.called.clone(),
            marked_cells: self.marked.iter().copied().collect(),
            winning_rows: self.winning_rows.clone(),
            winning_columns: self.winning_columns.clone(),
            board_won: self.board_won,
            error_message: self.error_message.map(String::from),
        }
    }
}
