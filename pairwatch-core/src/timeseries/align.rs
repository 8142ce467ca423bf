use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timeseries::util::first_occurrences;
use crate::{PairwatchError, Series, SeriesId};

/// One date of the aligned pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlignedRow {
    /// Calendar date.
    pub date: NaiveDate,
    /// Value of the first (numerator) series, if it had one on this date.
    pub value_a: Option<f64>,
    /// Value of the second (denominator) series, if it had one on this date.
    pub value_b: Option<f64>,
    /// `value_a / value_b`, missing when undefined.
    pub ratio: Option<f64>,
}

/// Outer join of two series on date, ordered by date ascending.
///
/// Built once by [`align`] and never mutated afterwards; derived statistics live in
/// separate tables that share it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedTable {
    a: SeriesId,
    b: SeriesId,
    rows: Vec<AlignedRow>,
}

impl AlignedTable {
    /// Identifier of the numerator series.
    #[must_use]
    pub const fn a(&self) -> &SeriesId {
        &self.a
    }

    /// Identifier of the denominator series.
    #[must_use]
    pub const fn b(&self) -> &SeriesId {
        &self.b
    }

    /// All rows, one per distinct date in either input.
    #[must_use]
    pub fn rows(&self) -> &[AlignedRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if there are no rows. [`align`] never returns such a table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The ratio column in row order.
    #[must_use]
    pub fn ratios(&self) -> Vec<Option<f64>> {
        self.rows.iter().map(|r| r.ratio).collect()
    }

    /// Number of rows with a defined ratio.
    #[must_use]
    pub fn usable_rows(&self) -> usize {
        self.rows.iter().filter(|r| r.ratio.is_some()).count()
    }
}

/// Ratio of two optional prices.
///
/// Missing when either side is missing, the denominator is zero, or the quotient is
/// not finite.
#[must_use]
pub fn ratio(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(num), Some(den)) if den != 0.0 => Some(num / den).filter(|r| r.is_finite()),
        _ => None,
    }
}

/// Outer-join two series on date and derive `Ratio = a / b` per row.
///
/// - Every date present in either input appears exactly once, sorted ascending.
/// - A date missing from one input leaves that column empty; the row is kept.
/// - Duplicate dates within one input collapse to the first occurrence.
///
/// # Errors
/// - `PairwatchError::InputMissing` if either series has no points.
/// - `PairwatchError::AlignmentEmpty` if no row ends up with a defined ratio.
pub fn align(a: &Series, b: &Series) -> Result<AlignedTable, PairwatchError> {
    for s in [a, b] {
        if s.is_empty() {
            return Err(PairwatchError::input_missing(s.id().as_str()));
        }
    }

    let (points_a, dup_a) = first_occurrences(a.points());
    let (points_b, dup_b) = first_occurrences(b.points());
    if dup_a + dup_b > 0 {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            a = %a.id(),
            b = %b.id(),
            dropped_a = dup_a,
            dropped_b = dup_b,
            "collapsed duplicate dates (first occurrence kept)"
        );
    }

    let mut joined: BTreeMap<NaiveDate, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for p in points_a {
        joined.entry(p.date).or_default().0 = p.value;
    }
    for p in points_b {
        joined.entry(p.date).or_default().1 = p.value;
    }

    let rows: Vec<AlignedRow> = joined
        .into_iter()
        .map(|(date, (value_a, value_b))| AlignedRow {
            date,
            value_a,
            value_b,
            ratio: ratio(value_a, value_b),
        })
        .collect();

    let table = AlignedTable {
        a: a.id().clone(),
        b: b.id().clone(),
        rows,
    };
    if table.usable_rows() == 0 {
        return Err(PairwatchError::alignment_empty(a.id().as_str(), b.id().as_str()));
    }
    Ok(table)
}
