use crate::domain::model::Space;

/// A maximal run of consecutive spaces sharing one row value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceRow<'a> {
    pub row: i64,
    pub spaces: &'a [Space],
}

impl SpaceRow<'_> {
    pub fn free_count(&self) -> usize {
        self.spaces.iter().filter(|s| s.status.is_free()).count()
    }
}

/// Splits `spaces` into contiguous runs of equal `row`, keeping input order.
///
/// Spaces arrive sorted by space number, not by row, so one row can show up
/// as several disjoint runs when the numbering interleaves rows.
pub fn group_by_row(spaces: &[Space]) -> Vec<SpaceRow<'_>> {
    spaces
        .chunk_by(|a, b| a.row == b.row)
        .map(|run| SpaceRow {
            row: run[0].row,
            spaces: run,
        })
        .collect()
}
