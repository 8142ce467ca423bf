use std::sync::Arc;

use pairwatch_core::{AlignedTable, PairwatchError, SeriesId, StatsParams, StatsRow, StatsTable};
use pairwatch_core::{latest_rows, stats};

use crate::cache::{AnalysisKey, Caches, PairKey};

/// One aligned pair, reused across parameter changes.
///
/// Changing the Z-Score window or the RSI period only recomputes the statistics;
/// the sources are not asked again. Results are cached per aligned table and
/// parameter set, so a session never sees statistics of another session's data.
#[derive(Clone)]
pub struct Session {
    pair: PairKey,
    table: Arc<AlignedTable>,
    caches: Caches,
    display_rows: usize,
}

impl Session {
    pub(crate) fn new(
        pair: PairKey,
        table: Arc<AlignedTable>,
        caches: Caches,
        display_rows: usize,
    ) -> Self {
        Self {
            pair,
            table,
            caches,
            display_rows,
        }
    }

    /// Numerator identifier.
    #[must_use]
    pub const fn a(&self) -> &SeriesId {
        self.pair.a()
    }

    /// Denominator identifier.
    #[must_use]
    pub const fn b(&self) -> &SeriesId {
        self.pair.b()
    }

    /// The aligned table shared by every analysis of this session.
    #[must_use]
    pub const fn table(&self) -> &Arc<AlignedTable> {
        &self.table
    }

    /// Compute (or reuse) the statistics for `params` over the full history.
    ///
    /// # Errors
    /// Returns `InvalidParameter` if a window or period is below 1.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pairwatch::session::analyze",
            skip_all,
            fields(
                a = %self.pair.a(),
                b = %self.pair.b(),
                zscore_window = params.zscore_window,
                rsi_period = params.rsi_period,
            ),
        )
    )]
    pub async fn analyze(&self, params: StatsParams) -> Result<Arc<StatsTable>, PairwatchError> {
        params.validate()?;
        let key = AnalysisKey::new(&self.pair, &self.table, params);
        if let Some(hit) = self.caches.analysis(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!("analysis cache hit");
            return Ok(hit);
        }
        let computed = Arc::new(stats::compute(Arc::clone(&self.table), params)?);
        self.caches.put_analysis(key, Arc::clone(&computed)).await;
        Ok(computed)
    }

    /// The most recent rows for `params`, newest first.
    ///
    /// # Errors
    /// Same as [`analyze`](Self::analyze).
    pub async fn dashboard(&self, params: StatsParams) -> Result<Vec<StatsRow>, PairwatchError> {
        let table = self.analyze(params).await?;
        Ok(latest_rows(&table, self.display_rows))
    }
}
