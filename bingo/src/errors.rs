/// The error type for [`GameEngine::mark_cell()`](crate::GameEngine::mark_cell).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IllegalMark {
    OutOfBounds { row: usize, column: usize },
    EmptyCell { row: usize, column: usize },
    NotYetCalled { number: u32 },
    BoardAlreadyWon,
}

impl std::error::Error for IllegalMark {}

impl std::fmt::Display for IllegalMark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMark::OutOfBounds { row, column } => {
                write!(f, "Position ({}, {}) is outside the board", row, column)
            }
            IllegalMark::EmptyCell { row, column } => {
                write!(f, "The cell at ({}, {}) holds no number", row, column)
            }
            IllegalMark::NotYetCalled { number } => {
                write!(f, "The number {} has not been called yet", number)
            }
            IllegalMark::BoardAlreadyWon => {
                write!(f, "The board is already won; reset to keep playing")
            }
        }
    }
}

/// The error type for [`GameEngine::call_next()`](crate::GameEngine::call_next).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CallExhausted {
    /// Every number in the call universe has already been called.
    UniverseDrained,
    /// The bounded redraw loop never found an uncalled number.
    AttemptsExceeded { attempts: u32 },
}

impl std::error::Error for CallExhausted {}

impl std::fmt::Display for CallExhausted {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallExhausted::UniverseDrained => {
                write!(f, "All numbers in the call range have been called")
            }
            CallExhausted::AttemptsExceeded { attempts } => {
                write!(f, "No uncalled number found after {} draws", attempts)
            }
        }
    }
}

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate),
/// raised before a game ever starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidConfig {
    NoRows,
    NoColumns,
    EmptyRange { column: usize },
    ZeroTarget,
    TargetExceedsCellCount { target: usize, cells: usize },
}

impl std::error::Error for InvalidConfig {}

impl std::fmt::Display for InvalidConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfig::NoRows => write!(f, "The board needs at least one row"),
            InvalidConfig::NoColumns => write!(f, "The board needs at least one column range"),
            InvalidConfig::EmptyRange { column } => {
                write!(f, "The range for column {} contains no values", column)
            }
            InvalidConfig::ZeroTarget => {
                write!(f, "A board with zero numbers cannot be played")
            }
            InvalidConfig::TargetExceedsCellCount { target, cells } => write!(
                f,
                "Cannot place {} numbers on a board with {} cells",
                target, cells
            ),
        }
    }
}
