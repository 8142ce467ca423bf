use async_trait::async_trait;

use crate::{PairwatchError, Series, SeriesId, SourceKey};

/// Narrow interface every price source implements.
///
/// How the data is obtained (local files, a market-data API, a fixture table) is up to
/// the implementation. Sources report a missing identifier with
/// `PairwatchError::NotFound` and retryable failures with `PairwatchError::TransientIo`;
/// they never retry internally.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Stable name used in logs, errors, and source keys.
    fn name(&self) -> &'static str;

    /// Typed key derived from [`name`](Self::name).
    fn key(&self) -> SourceKey {
        SourceKey::new(self.name())
    }

    /// Fetch the full available history for `id`.
    async fn fetch_series(&self, id: &SeriesId) -> Result<Series, PairwatchError>;
}
