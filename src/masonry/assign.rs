//! Column assignment: round-robin or shortest-column-first.

use super::config::Arrange;
use super::heights::HeightTable;

/// An item placed in a column, with its position in the input sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placed<T> {
    /// Position in the input sequence, before any reversal.
    pub index: usize,
    pub item: T,
}

/// One column, in assignment order.
pub type Column<T> = Vec<Placed<T>>;

/// Convert a resolved column count to a usable one. Non-positive counts mean no columns.
pub fn column_count(resolved: i32) -> usize {
    usize::try_from(resolved).unwrap_or(0)
}

/// Distribute `items` over `columns` columns.
///
/// Shortest-column-first applies only when `arrange` asks for it and `heights` holds at
/// least one measurement; otherwise item `i` (after reversal) goes to column `i mod C`.
/// Ties between equally short columns go to the lowest column index. Unmeasured items
/// count as height 0. Returns no columns when `columns` is 0.
pub fn assign<'a, T>(
    items: &'a [T],
    columns: usize,
    reverse: bool,
    arrange: Arrange,
    heights: &HeightTable,
) -> Vec<Column<&'a T>> {
    if columns == 0 {
        return Vec::new();
    }

    let mut out: Vec<Column<&'a T>> = (0..columns).map(|_| Vec::new()).collect();
    let ordered: Box<dyn Iterator<Item = (usize, &'a T)>> = if reverse {
        Box::new(items.iter().enumerate().rev())
    } else {
        Box::new(items.iter().enumerate())
    };

    let balanced = arrange == Arrange::ShortestColumn && !heights.is_empty();
    tracing::trace!(
        target: "masonry_columns::masonry",
        columns,
        items = items.len(),
        reverse,
        balanced,
        "assignment pass"
    );

    if balanced {
        let mut totals = vec![0.0_f32; columns];
        for (index, item) in ordered {
            let target = shortest(&totals);
            totals[target] += heights.height_or_zero(index);
            out[target].push(Placed { index, item });
        }
    } else {
        for (position, (index, item)) in ordered.enumerate() {
            out[position % columns].push(Placed { index, item });
        }
    }
    out
}

/// Index of the first minimum.
fn shortest(totals: &[f32]) -> usize {
    let mut best = 0;
    for (i, &total) in totals.iter().enumerate().skip(1) {
        if total < totals[best] {
            best = i;
        }
    }
    best
}

/// Original indices per column, for inspection and tests.
pub fn indices<T>(columns: &[Column<T>]) -> Vec<Vec<usize>> {
    columns
        .iter()
        .map(|column| column.iter().map(|placed| placed.index).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn measured(heights: &[f32]) -> HeightTable {
        let mut table = HeightTable::new(heights.len());
        for (i, &h) in heights.iter().enumerate() {
            table.record(table.ticket(i), h);
        }
        table
    }

    fn items(n: usize) -> Vec<usize> {
        (0..n).collect()
    }

    #[test]
    fn round_robin_two_columns() {
        let items = items(4);
        let cols = assign(&items, 2, false, Arrange::RoundRobin, &HeightTable::default());
        assert_eq!(indices(&cols), vec![vec![0, 2], vec![1, 3]]);
    }

    #[test]
    fn round_robin_reverse_keeps_original_indices() {
        let items = items(4);
        let cols = assign(&items, 2, true, Arrange::RoundRobin, &HeightTable::default());
        assert_eq!(indices(&cols), vec![vec![3, 1], vec![2, 0]]);
        assert_eq!(*cols[0][0].item, 3);
    }

    #[test]
    fn balanced_scenario() {
        let items = items(4);
        let table = measured(&[10.0, 50.0, 10.0, 10.0]);
        let cols = assign(&items, 2, false, Arrange::ShortestColumn, &table);
        assert_eq!(indices(&cols), vec![vec![0, 2, 3], vec![1]]);
    }

    #[test]
    fn balanced_without_measurements_is_round_robin() {
        let items = items(5);
        let cols = assign(&items, 3, false, Arrange::ShortestColumn, &HeightTable::new(5));
        assert_eq!(indices(&cols), vec![vec![0, 3], vec![1, 4], vec![2]]);
    }

    #[test]
    fn balanced_reverse_uses_original_index_heights() {
        let items = items(3);
        let table = measured(&[5.0, 1.0, 100.0]);
        let cols = assign(&items, 2, true, Arrange::ShortestColumn, &table);
        // 2 -> col0 (100, 0); 1 -> col1 (100, 1); 0 -> col1 (100, 6)
        assert_eq!(indices(&cols), vec![vec![2], vec![1, 0]]);
    }

    #[test]
    fn zero_columns() {
        let items = items(3);
        assert!(assign(&items, 0, false, Arrange::RoundRobin, &HeightTable::default()).is_empty());
        assert_eq!(column_count(0), 0);
        assert_eq!(column_count(-2), 0);
        assert_eq!(column_count(3), 3);
    }

    #[test]
    fn empty_items_give_empty_columns() {
        let items: Vec<u8> = Vec::new();
        let cols = assign(&items, 3, false, Arrange::RoundRobin, &HeightTable::default());
        assert_eq!(cols.len(), 3);
        assert!(cols.iter().all(Vec::is_empty));
    }

    #[test]
    fn coverage_and_size_bound() {
        for n in 0..20 {
            for c in 1..6 {
                let items = items(n);
                let cols = assign(&items, c, false, Arrange::RoundRobin, &HeightTable::default());
                let mut seen: Vec<usize> = indices(&cols).into_iter().flatten().collect();
                seen.sort_unstable();
                assert_eq!(seen, (0..n).collect::<Vec<_>>());

                let sizes: Vec<usize> = cols.iter().map(Vec::len).collect();
                let max = sizes.iter().max().copied().unwrap_or(0);
                let min = sizes.iter().min().copied().unwrap_or(0);
                assert!(max - min <= 1, "n={n} c={c} sizes={sizes:?}");
            }
        }
    }

    #[test]
    fn greedy_totals_within_tallest_item() {
        let heights = [30.0, 12.0, 7.0, 55.0, 3.0, 21.0, 40.0, 9.0, 18.0, 26.0];
        let table = measured(&heights);
        let items = items(heights.len());
        for c in 1..5 {
            let cols = assign(&items, c, false, Arrange::ShortestColumn, &table);
            let totals: Vec<f32> = cols
                .iter()
                .map(|col| col.iter().map(|p| heights[p.index]).sum())
                .collect();
            let max = totals.iter().copied().fold(f32::MIN, f32::max);
            let min = totals.iter().copied().fold(f32::MAX, f32::min);
            assert!(max - min <= 55.0, "c={c} totals={totals:?}");
        }
    }

    #[test]
    fn assignment_is_idempotent() {
        let table = measured(&[4.0, 9.0, 1.0, 7.0, 2.0]);
        let items = items(5);
        for arrange in [Arrange::RoundRobin, Arrange::ShortestColumn] {
            let a = assign(&items, 3, true, arrange, &table);
            let b = assign(&items, 3, true, arrange, &table);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn ties_go_to_lowest_column() {
        assert_eq!(shortest(&[1.0, 1.0, 1.0]), 0);
        assert_eq!(shortest(&[2.0, 1.0, 1.0]), 1);
    }
}
