use quickcheck::{Arbitrary, Gen};

use crate::{ColumnRange, GameConfig};

// Small boards with disjoint, ascending ranges, like a real bingo card.
// Every range holds at least one value per row so that the target count is
// always reachable in principle.
impl Arbitrary for GameConfig {
    fn arbitrary(g: &mut Gen) -> Self {
        let rows = usize::arbitrary(g) % 5 + 1;
        let columns = usize::arbitrary(g) % 5 + 1;

        let mut column_ranges = Vec::with_capacity(columns);
        let mut start = u32::arbitrary(g) % 10 + 1;
        for _ in 0..columns {
            let span = u32::arbitrary(g) % 15 + rows as u32;
            column_ranges.push(ColumnRange {
                start,
                end: start + span - 1,
            });
            start += span + u32::arbitrary(g) % 3;
        }

        let cells = rows * columns;
        let target_count = usize::arbitrary(g) % cells + 1;

        GameConfig {
            rows,
            column_ranges,
            target_count,
            call_interval_ms: u64::arbitrary(g) % 5000 + 1,
        }
    }
}
