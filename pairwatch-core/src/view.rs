use crate::{StatsRow, StatsTable};

/// Most recent `limit` rows, newest first.
///
/// Only selects rows; every value is taken as computed over the full history, so
/// truncation never changes a Z-Score or RSI.
#[must_use]
pub fn latest_rows(table: &StatsTable, limit: usize) -> Vec<StatsRow> {
    // Base rows are strictly date-ascending, so reversing yields date-descending order.
    table.rows().rev().take(limit).collect()
}
