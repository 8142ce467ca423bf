use std::sync::Arc;
use std::time::Duration;

use pairwatch_core::{
    AlignedTable, PairwatchConfig, PairwatchError, Series, SeriesId, SeriesSource, StatsParams,
    StatsRow, align, latest_rows,
};
use pairwatch_types::CacheConfig;

use crate::cache::{Caches, PairKey};
use crate::session::Session;

/// Orchestrator that fetches series from registered sources and serves pair analyses.
pub struct Pairwatch {
    pub(crate) sources: Vec<Arc<dyn SeriesSource>>,
    pub(crate) cfg: PairwatchConfig,
    pub(crate) caches: Caches,
}

/// Builder for constructing a `Pairwatch` orchestrator with custom configuration.
pub struct PairwatchBuilder {
    sources: Vec<Arc<dyn SeriesSource>>,
    cfg: PairwatchConfig,
}

impl Default for PairwatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PairwatchBuilder {
    /// Create a new builder with default configuration and no sources.
    ///
    /// Defaults: Z-Score window 50, RSI period 14, 300 display rows, 10s fetch
    /// timeout, 64 cached entries per cache without expiry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sources: vec![],
            cfg: PairwatchConfig::default(),
        }
    }

    /// Register a series source.
    ///
    /// Sources are tried in registration order; later sources are only asked when
    /// every earlier one failed or had nothing for the identifier.
    #[must_use]
    pub fn with_source(mut self, s: Arc<dyn SeriesSource>) -> Self {
        self.sources.push(s);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: PairwatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Default statistics parameters used by [`Pairwatch::dashboard`].
    #[must_use]
    pub const fn stats(mut self, params: StatsParams) -> Self {
        self.cfg.stats = params;
        self
    }

    /// Default Z-Score window.
    #[must_use]
    pub const fn zscore_window(mut self, window: usize) -> Self {
        self.cfg.stats.zscore_window = window;
        self
    }

    /// Default RSI period.
    #[must_use]
    pub const fn rsi_period(mut self, period: usize) -> Self {
        self.cfg.stats.rsi_period = period;
        self
    }

    /// Number of most recent rows returned by dashboards.
    #[must_use]
    pub const fn display_rows(mut self, rows: usize) -> Self {
        self.cfg.display_rows = rows;
        self
    }

    /// Timeout applied to each individual source call.
    #[must_use]
    pub const fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.fetch_timeout = timeout;
        self
    }

    /// Cache bounds for aligned tables and analysis results.
    #[must_use]
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.cfg.cache = cache;
        self
    }

    /// Build the `Pairwatch` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidParameter` for a zero window, period or row limit, and
    /// `InvalidConfig` if no source has been registered via [`with_source`](Self::with_source).
    pub fn build(self) -> Result<Pairwatch, PairwatchError> {
        self.cfg.validate()?;
        if self.sources.is_empty() {
            return Err(PairwatchError::InvalidConfig(
                "no sources registered; add at least one via with_source(...)".to_string(),
            ));
        }
        let caches = Caches::new(&self.cfg.cache);
        Ok(Pairwatch {
            sources: self.sources,
            cfg: self.cfg,
            caches,
        })
    }
}

/// Pass `NotFound`, `InputMissing` and the timeout/aggregate variants through; wrap
/// anything else as a transient failure of `source`.
pub(crate) fn tag_err(source: &str, e: PairwatchError) -> PairwatchError {
    match e {
        e @ (PairwatchError::NotFound { .. }
        | PairwatchError::InputMissing { .. }
        | PairwatchError::SourceTimeout { .. }
        | PairwatchError::TransientIo { .. }
        | PairwatchError::Data(_)
        | PairwatchError::AllSourcesTimedOut { .. }
        | PairwatchError::AllSourcesFailed(_)) => e,
        other => PairwatchError::transient_io(source, other.to_string()),
    }
}

/// Collapse per-source failures for one identifier into a single error.
///
/// Rules:
/// - every source timed out → `AllSourcesTimedOut`
/// - every source reported `NotFound` or an empty series → `InputMissing` if at
///   least one returned an empty series, else `NotFound`
/// - anything else → `AllSourcesFailed(errors)`
pub(crate) fn collapse_errors(id: &SeriesId, errors: Vec<PairwatchError>) -> PairwatchError {
    let what = format!("series for {id}");
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, PairwatchError::SourceTimeout { .. }))
    {
        return PairwatchError::AllSourcesTimedOut { what };
    }
    let absent = |e: &PairwatchError| {
        matches!(
            e,
            PairwatchError::NotFound { .. } | PairwatchError::InputMissing { .. }
        )
    };
    if !errors.is_empty() && errors.iter().all(absent) {
        if errors
            .iter()
            .any(|e| matches!(e, PairwatchError::InputMissing { .. }))
        {
            return PairwatchError::input_missing(id.as_str());
        }
        return PairwatchError::not_found(what);
    }
    PairwatchError::AllSourcesFailed(errors)
}

impl Pairwatch {
    /// Start building a new `Pairwatch` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use pairwatch_csv::CsvSource;
    ///
    /// let pw = pairwatch::Pairwatch::builder()
    ///     .with_source(Arc::new(CsvSource::new("./data")))
    ///     .zscore_window(20)
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> PairwatchBuilder {
        PairwatchBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &PairwatchConfig {
        &self.cfg
    }

    /// Wrap a source future with the fetch timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "pairwatch::core::source_call_with_timeout",
            skip_all,
            fields(
                source = source_name,
                id = %id,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn source_call_with_timeout<Fut>(
        source_name: &'static str,
        id: &SeriesId,
        timeout: Duration,
        fut: Fut,
    ) -> Result<Series, PairwatchError>
    where
        Fut: std::future::Future<Output = Result<Series, PairwatchError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(PairwatchError::source_timeout(
                source_name,
                format!("series for {id}"),
            ))
        })
    }

    /// Fetch a series, trying each source in registration order.
    ///
    /// The first non-empty series wins. An empty series is treated like a miss and
    /// the next source is asked.
    ///
    /// # Errors
    /// - `NotFound` if every source reported the identifier as unknown.
    /// - `InputMissing` if sources only had empty series (or nothing) for it.
    /// - `AllSourcesTimedOut` if every source exceeded the fetch timeout.
    /// - `AllSourcesFailed` with the individual failures otherwise.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "pairwatch::core::fetch_series", skip_all, fields(id = %id))
    )]
    pub async fn fetch_series(&self, id: &SeriesId) -> Result<Series, PairwatchError> {
        let mut errors: Vec<PairwatchError> = Vec::new();

        for s in &self.sources {
            let res = Self::source_call_with_timeout(
                s.name(),
                id,
                self.cfg.fetch_timeout,
                s.fetch_series(id),
            )
            .await;
            match res {
                Ok(series) if series.is_empty() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(source = s.name(), id = %id, "empty series; trying next source");
                    errors.push(PairwatchError::input_missing(id.as_str()));
                }
                Ok(series) => return Ok(series),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(source = s.name(), id = %id, error = %e, "source failed");
                    errors.push(tag_err(s.name(), e));
                }
            }
        }

        Err(collapse_errors(id, errors))
    }

    /// Fetch and align both series of a pair.
    ///
    /// The two fetches run concurrently. Aligned tables are cached per pair, so a
    /// second call for the same pair does not touch the sources.
    ///
    /// # Errors
    /// Propagates fetch failures, `InputMissing` and `AlignmentEmpty`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "pairwatch::core::aligned", skip_all, fields(a = %a, b = %b))
    )]
    pub async fn aligned(
        &self,
        a: &SeriesId,
        b: &SeriesId,
    ) -> Result<Arc<AlignedTable>, PairwatchError> {
        let key = PairKey::new(a, b);
        if let Some(hit) = self.caches.aligned(&key).await {
            #[cfg(feature = "tracing")]
            tracing::debug!(a = %a, b = %b, "aligned table cache hit");
            return Ok(hit);
        }
        let (sa, sb) =
            futures::future::try_join(self.fetch_series(a), self.fetch_series(b)).await?;
        let table = Arc::new(align(&sa, &sb)?);
        self.caches.put_aligned(key, Arc::clone(&table)).await;
        Ok(table)
    }

    /// Open an analysis session for the pair `a / b`.
    ///
    /// # Errors
    /// See [`aligned`](Self::aligned).
    pub async fn open_session(&self, a: &SeriesId, b: &SeriesId) -> Result<Session, PairwatchError> {
        let table = self.aligned(a, b).await?;
        Ok(Session::new(
            PairKey::new(a, b),
            table,
            self.caches.clone(),
            self.cfg.display_rows,
        ))
    }

    /// Latest rows for `a / b` using the configured default parameters, newest first.
    ///
    /// # Errors
    /// See [`aligned`](Self::aligned).
    pub async fn dashboard(
        &self,
        a: &SeriesId,
        b: &SeriesId,
    ) -> Result<Vec<StatsRow>, PairwatchError> {
        let session = self.open_session(a, b).await?;
        let table = session.analyze(self.cfg.stats).await?;
        Ok(latest_rows(&table, self.cfg.display_rows))
    }

    /// Drop every cached aligned table and analysis result.
    pub fn invalidate(&self) {
        self.caches.clear();
    }
}
