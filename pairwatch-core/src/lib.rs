//! pairwatch-core
//!
//! Core types, traits, and the numeric pipeline shared across the pairwatch workspace.
//!
//! - `series`: dated price points and single-instrument series.
//! - `source`: the `SeriesSource` trait implemented by data sources.
//! - `timeseries`: outer-join alignment of two series and the derived ratio column.
//! - `stats`: rolling Z-Score and RSI over the ratio column.
//! - `view`: row selection for display, kept apart from computation.
//!
//! Everything except `source` is synchronous and pure: the same inputs and parameters
//! always produce the same tables.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use pairwatch_core::{Series, StatsParams, align, stats, view};
//! use std::sync::Arc;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
//! let a = Series::from_values("A", [(d(1), 10.0), (d(2), 11.0), (d(3), 9.0)]);
//! let b = Series::from_values("B", [(d(1), 5.0), (d(2), 5.0), (d(3), 5.0)]);
//!
//! let table = Arc::new(align(&a, &b)?);
//! let computed = stats::compute(table, StatsParams::new(2, 1)?)?;
//! let shown = view::latest_rows(&computed, 300);
//! assert_eq!(shown[0].date, d(3));
//! # Ok::<(), pairwatch_core::PairwatchError>(())
//! ```
#![warn(missing_docs)]

/// Dated points and single-instrument series.
pub mod series;
/// Source trait implemented by series providers.
pub mod source;
/// Rolling statistics over the ratio column.
pub mod stats;
/// Alignment of two series into a ratio table.
pub mod timeseries;
pub mod types;
/// Display-oriented row selection.
pub mod view;

/// Optional conversion of tables into `polars` data frames.
#[cfg(feature = "dataframe")]
pub mod frame;

pub use series::{Series, TimePoint};
pub use source::SeriesSource;
pub use stats::{StatsRow, StatsTable, rolling_rsi, rolling_zscore};
pub use timeseries::align::{AlignedRow, AlignedTable, align, ratio};
pub use types::*;
pub use view::latest_rows;

#[cfg(feature = "dataframe")]
pub use frame::ToDataFrame;
