//! Pairwatch monitors the price ratio of two instruments.
//!
//! Overview
//! - Fetches two daily close series from registered sources implementing
//!   [`SeriesSource`], in registration order with per-call timeouts.
//! - Outer-joins them by date and derives `Ratio = A / B`.
//! - Computes a rolling Z-Score (sample standard deviation) and a rolling RSI
//!   (simple moving averages of gains and losses) over the full ratio history.
//! - Presents the most recent rows, newest first, without altering any value.
//!
//! Key behaviors
//! - Source fallback: the first non-empty series wins. Errors are aggregated, with
//!   `NotFound`, `InputMissing` and `AllSourcesTimedOut` reported as such when every
//!   source agrees.
//! - Sessions: [`Pairwatch::open_session`] aligns a pair once; analyses with
//!   different parameters reuse the aligned table.
//! - Caching: aligned tables are cached per ordered pair and analyses per
//!   `(pair, zscore_window, rsi_period)`. [`Pairwatch::invalidate`] drops both.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use pairwatch::{Pairwatch, StatsParams};
//! use pairwatch_csv::CsvSource;
//!
//! let pw = Pairwatch::builder()
//!     .with_source(Arc::new(CsvSource::new("./data/nsetest")))
//!     .build()?;
//!
//! let session = pw.open_session(&"A2ZINFRA.NS".into(), &"AARTIIND.NS".into()).await?;
//! let rows = session.dashboard(StatsParams::new(20, 7)?).await?;
//! ```
//!
//! See `pairwatch/examples/` for runnable demonstrations.
#![warn(missing_docs)]

mod cache;
pub(crate) mod core;
mod session;

pub use crate::core::{Pairwatch, PairwatchBuilder};
pub use session::Session;

#[cfg(feature = "dataframe")]
pub use pairwatch_core::ToDataFrame;
pub use pairwatch_core::{
    AlignedRow, AlignedTable, CacheConfig, PairwatchConfig, PairwatchError, Series, SeriesId,
    SeriesSource, SourceKey, StatsParams, StatsRow, StatsTable, TimePoint,
};
