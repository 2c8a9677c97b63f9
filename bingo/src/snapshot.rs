use serde::{Deserialize, Serialize};

use crate::{Board, Phase};

/// A read-only view of the whole game, taken after an operation so a front
/// end can re-render. Serializable, so it can also be logged or recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Board,
    pub phase: Phase,
    /// The most recently called number, absent before the first call.
    pub current_number: Option<u32>,
    /// Call history, oldest first.
    pub called_numbers: Vec<u32>,
    pub marked_cells: Vec<(usize, usize)>,
    pub winning_rows: Vec<usize>,
    pub winning_columns: Vec<usize>,
    pub board_won: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Snapshot {
    /// The tail of the call history, newest last. Front ends typically show
    /// the last handful of calls next to the current number.
    pub fn recent_calls(&self, count: usize) -> &[u32] {
        let start = self.called_numbers.len().saturating_sub(count);
        &self.called_numbers[start..]
    }
}
