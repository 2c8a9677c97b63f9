use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::GameConfig;

/// How often generation retries a random row before giving up on a column.
const ROW_PLACEMENT_ATTEMPTS: u32 = 10;

/// One position on the board: blank padding, or a number the player can mark
/// once it has been called.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Numbered(u32),
}

impl Cell {
    pub fn number(&self) -> Option<u32> {
        match self {
            Cell::Empty => None,
            Cell::Numbered(number) => Some(*number),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// A generated bingo board: a fixed grid of cells, most of them empty, the
/// rest holding numbers drawn from their column's range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    columns: usize,
    /// Row-major, `rows * columns` entries.
    cells: Vec<Cell>,
}

impl Board {
    /// Places up to `config.target_count` numbers on an empty grid.
    ///
    /// Columns are drawn from a working pool that is refilled once drained,
    /// so each refill cycle puts at most one number into any column. Within
    /// the chosen column, a bounded number of random row picks looks for a
    /// free cell; if the bound is exhausted, generation stops early and the
    /// board keeps however many numbers it got. Callers can observe the
    /// shortfall through [`Board::filled_count()`].
    ///
    /// A drawn value that already sits on the board is redrawn exactly once;
    /// the second draw is kept even if it collides again.
    pub fn generate(config: &GameConfig, rng: &mut StdRng) -> Self {
        let rows = config.rows;
        let columns = config.columns();
        let mut board = Board {
            rows,
            columns,
            cells: vec![Cell::Empty; rows * columns],
        };

        let mut column_pool: Vec<usize> = (0..columns).collect();
        for _ in 0..config.target_count {
            if column_pool.is_empty() {
                column_pool = (0..columns).collect();
            }
            let pool_idx = rng.gen_range(0..column_pool.len());
            let column = column_pool.swap_remove(pool_idx);

            let Some(row) = board.find_free_row(column, rng) else {
                break;
            };

            let range = config.column_ranges[column];
            let mut number = rng.gen_range(range.start..=range.end);
            if board.contains_number(number) {
                number = rng.gen_range(range.start..=range.end);
            }
            board.cells[row * columns + column] = Cell::Numbered(number);
        }
        board
    }

    fn find_free_row(&self, column: usize, rng: &mut StdRng) -> Option<usize> {
        for _ in 0..ROW_PLACEMENT_ATTEMPTS {
            let row = rng.gen_range(0..self.rows);
            if self.cell(row, column).is_empty() {
                return Some(row);
            }
        }
        None
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Panics if the position is out of bounds; see [`Board::get()`].
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        assert!(row < self.rows && column < self.columns);
        self.cells[row * self.columns + column]
    }

    pub fn get(&self, row: usize, column: usize) -> Option<Cell> {
        if row < self.rows && column < self.columns {
            Some(self.cells[row * self.columns + column])
        } else {
            None
        }
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    pub fn contains_number(&self, number: u32) -> bool {
        self.cells.iter().any(|cell| cell.number() == Some(number))
    }

    /// All numbered positions as `(row, column, number)`, row-major.
    pub fn numbered_cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.cells.iter().enumerate().filter_map(|(idx, cell)| {
            cell.number()
                .map(|number| (idx / self.columns, idx % self.columns, number))
        })
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;
    use rand::SeedableRng;

    use super::*;

    quickcheck! {
        fn values_lie_in_their_column_range(config: GameConfig, seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::generate(&config, &mut rng);
            let ok = board
                .numbered_cells()
                .all(|(_, column, number)| config.column_ranges[column].contains(number));
            ok
        }

        fn fill_count_is_bounded_by_target(config: GameConfig, seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::generate(&config, &mut rng);
            board.filled_count() <= config.target_count
        }

        // With disjoint ranges the single-retry de-duplication can only ever
        // leave duplicates inside one column.
        fn duplicates_stay_within_one_column(config: GameConfig, seed: u64) -> bool {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::generate(&config, &mut rng);
            let cells: Vec<_> = board.numbered_cells().collect();
            cells.iter().all(|&(_, column_a, number_a)| {
                cells
                    .iter()
                    .filter(|&&(_, _, number_b)| number_b == number_a)
                    .all(|&(_, column_b, _)| column_b == column_a)
            })
        }

        fn same_seed_same_board(config: GameConfig, seed: u64) -> bool {
            let mut first = StdRng::seed_from_u64(seed);
            let mut second = StdRng::seed_from_u64(seed);
            Board::generate(&config, &mut first) == Board::generate(&config, &mut second)
        }
    }

    #[test]
    fn grid_has_configured_dimensions() {
        let config = GameConfig {
            rows: 3,
            column_ranges: vec![
                crate::ColumnRange { start: 1, end: 9 },
                crate::ColumnRange { start: 10, end: 19 },
                crate::ColumnRange { start: 20, end: 29 },
                crate::ColumnRange { start: 30, end: 39 },
            ],
            target_count: 5,
            call_interval_ms: 1000,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let board = Board::generate(&config, &mut rng);
        assert_eq!(board.rows(), 3);
        assert_eq!(board.columns(), 4);
        assert!(board.filled_count() <= 5);
        assert_eq!(board.get(3, 0), None);
        assert_eq!(board.get(0, 4), None);
    }
}
