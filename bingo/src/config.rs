use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::InvalidConfig;

/// The inclusive interval of legal values for one column of the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRange {
    pub start: u32,
    pub end: u32,
}

impl ColumnRange {
    pub fn contains(&self, number: u32) -> bool {
        self.start <= number && number <= self.end
    }

    /// How many distinct values the range holds.
    pub fn len(&self) -> u64 {
        u64::from(self.end) - u64::from(self.start) + 1
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl std::fmt::Display for ColumnRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// The error type for the [`FromStr`] instance of [`ColumnRange`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RangeFromStrErr {
    MissingSeparator,
    InvalidBound,
}

impl std::error::Error for RangeFromStrErr {}

impl std::fmt::Display for RangeFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeFromStrErr::MissingSeparator => {
                write!(f, "Expected a range of the form \"10-19\"")
            }
            RangeFromStrErr::InvalidBound => write!(f, "Range bound is not a number"),
        }
    }
}

impl FromStr for ColumnRange {
    type Err = RangeFromStrErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once('-').ok_or(RangeFromStrErr::MissingSeparator)?;
        let start = start
            .trim()
            .parse()
            .map_err(|_| RangeFromStrErr::InvalidBound)?;
        let end = end
            .trim()
            .parse()
            .map_err(|_| RangeFromStrErr::InvalidBound)?;
        Ok(ColumnRange { start, end })
    }
}

/// Everything the host supplies at engine construction time.
///
/// The column count is implied by the number of ranges. The ranges are
/// usually disjoint and ascending, like on a real bingo card, but the engine
/// works with whatever layout the host hands it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board height.
    pub rows: usize,
    /// One value range per column, left to right.
    pub column_ranges: Vec<ColumnRange>,
    /// How many numbers generation tries to place on the board.
    pub target_count: usize,
    /// Cadence of the host's number-calling timer.
    pub call_interval_ms: u64,
}

impl GameConfig {
    /// Board width.
    pub fn columns(&self) -> usize {
        self.column_ranges.len()
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.columns()
    }

    /// The span of values the caller draws from: from the smallest range
    /// start to the largest range end, gaps between ranges included.
    pub fn universe(&self) -> ColumnRange {
        let start = self
            .column_ranges
            .iter()
            .map(|range| range.start)
            .min()
            .unwrap_or(0);
        let end = self
            .column_ranges
            .iter()
            .map(|range| range.end)
            .max()
            .unwrap_or(0);
        ColumnRange { start, end }
    }

    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.rows == 0 {
            return Err(InvalidConfig::NoRows);
        }
        if self.column_ranges.is_empty() {
            return Err(InvalidConfig::NoColumns);
        }
        for (column, range) in self.column_ranges.iter().enumerate() {
            if range.is_empty() {
                return Err(InvalidConfig::EmptyRange { column });
            }
        }
        if self.target_count == 0 {
            return Err(InvalidConfig::ZeroTarget);
        }
        if self.target_count > self.cell_count() {
            return Err(InvalidConfig::TargetExceedsCellCount {
                target: self.target_count,
                cells: self.cell_count(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
            call_interval_ms: 1000,
        }
    }

    #[test]
    fn derived_dimensions() {
        let config = config();
        assert_eq!(config.columns(), 4);
        assert_eq!(config.cell_count(), 12);
        assert_eq!(config.universe(), ColumnRange { start: 1, end: 39 });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_configs() {
        let mut no_rows = config();
        no_rows.rows = 0;
        assert_eq!(no_rows.validate(), Err(InvalidConfig::NoRows));

        let mut no_columns = config();
        no_columns.column_ranges.clear();
        assert_eq!(no_columns.validate(), Err(InvalidConfig::NoColumns));

        let mut inverted = config();
        inverted.column_ranges[2] = ColumnRange { start: 29, end: 20 };
        assert_eq!(
            inverted.validate(),
            Err(InvalidConfig::EmptyRange { column: 2 })
        );

        let mut zero_target = config();
        zero_target.target_count = 0;
        assert_eq!(zero_target.validate(), Err(InvalidConfig::ZeroTarget));

        let mut oversized = config();
        oversized.target_count = 13;
        assert_eq!(
            oversized.validate(),
            Err(InvalidConfig::TargetExceedsCellCount {
                target: 13,
                cells: 12
            })
        );
    }

    #[test]
    fn range_from_str() {
        assert_eq!(
            "10-19".parse::<ColumnRange>(),
            Ok(ColumnRange { start: 10, end: 19 })
        );
        assert_eq!(
            "1 - 9".parse::<ColumnRange>(),
            Ok(ColumnRange { start: 1, end: 9 })
        );
        assert_eq!(
            "19".parse::<ColumnRange>(),
            Err(RangeFromStrErr::MissingSeparator)
        );
        assert_eq!(
            "a-9".parse::<ColumnRange>(),
            Err(RangeFromStrErr::InvalidBound)
        );
    }

    #[test]
    fn range_display_round_trips() {
        let range = ColumnRange { start: 20, end: 29 };
        assert_eq!(range.to_string().parse::<ColumnRange>(), Ok(range));
    }
}
