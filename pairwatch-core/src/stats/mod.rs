//! Rolling statistics computed over the ratio column of an [`AlignedTable`].
//!
//! Statistics are always computed over the full history; row selection for display
//! happens afterwards in [`crate::view`].

/// Rolling RSI with simple moving averages.
pub mod rsi;
/// Rolling Z-Score with sample standard deviation.
pub mod zscore;

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AlignedTable, PairwatchError, StatsParams};

pub use rsi::rolling_rsi;
pub use zscore::rolling_zscore;

/// One fully derived row: the aligned values plus both statistics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StatsRow {
    /// Calendar date.
    pub date: NaiveDate,
    /// Numerator series value.
    pub value_a: Option<f64>,
    /// Denominator series value.
    pub value_b: Option<f64>,
    /// `value_a / value_b`.
    pub ratio: Option<f64>,
    /// Rolling Z-Score of the ratio.
    #[serde(rename = "ZScore")]
    pub zscore: Option<f64>,
    /// Rolling RSI of the ratio.
    #[serde(rename = "RSI")]
    pub rsi: Option<f64>,
}

/// Derived columns over a shared, immutable [`AlignedTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct StatsTable {
    base: Arc<AlignedTable>,
    params: StatsParams,
    zscore: Vec<Option<f64>>,
    rsi: Vec<Option<f64>>,
}

impl StatsTable {
    /// The aligned table the statistics were computed from.
    #[must_use]
    pub const fn base(&self) -> &Arc<AlignedTable> {
        &self.base
    }

    /// Parameters used for this computation.
    #[must_use]
    pub const fn params(&self) -> StatsParams {
        self.params
    }

    /// Z-Score column, index-aligned with the base rows.
    #[must_use]
    pub fn zscore(&self) -> &[Option<f64>] {
        &self.zscore
    }

    /// RSI column, index-aligned with the base rows.
    #[must_use]
    pub fn rsi(&self) -> &[Option<f64>] {
        &self.rsi
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.base.len()
    }

    /// True if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Row at `index` in date-ascending order.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<StatsRow> {
        (index < self.len()).then(|| self.row_unchecked(index))
    }

    /// All rows in date-ascending order.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = StatsRow> + ExactSizeIterator + '_ {
        (0..self.len()).map(move |i| self.row_unchecked(i))
    }

    fn row_unchecked(&self, index: usize) -> StatsRow {
        let r = &self.base.rows()[index];
        StatsRow {
            date: r.date,
            value_a: r.value_a,
            value_b: r.value_b,
            ratio: r.ratio,
            zscore: self.zscore[index],
            rsi: self.rsi[index],
        }
    }
}

/// Compute rolling Z-Score and RSI over the ratio column of `base`.
///
/// # Errors
/// Returns `PairwatchError::InvalidParameter` if a window or period is below 1.
pub fn compute(base: Arc<AlignedTable>, params: StatsParams) -> Result<StatsTable, PairwatchError> {
    params.validate()?;
    let ratios = base.ratios();
    let zscore = rolling_zscore(&ratios, params.zscore_window)?;
    let rsi = rolling_rsi(&ratios, params.rsi_period)?;
    Ok(StatsTable {
        base,
        params,
        zscore,
        rsi,
    })
}
