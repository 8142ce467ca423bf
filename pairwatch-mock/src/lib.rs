//! Deterministic series sources for tests, demos, and CI.
//!
//! - [`MockSource`]: fixed fixture table; `FAIL` and `TIMEOUT` simulate a flaky backend.
//! - [`DynamicMockSource`]: behavior programmed per identifier through a controller.
use async_trait::async_trait;
use pairwatch_core::{PairwatchError, Series, SeriesId, SeriesSource};

mod dynamic;
mod fixtures;

pub use dynamic::{DynamicMockController, DynamicMockSource, MockBehavior};
pub use fixtures::series::IDS as FIXTURE_IDS;

/// Mock source for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockSource;

impl Default for MockSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSource {
    /// Name reported by [`SeriesSource::name`].
    pub const NAME: &'static str = "pairwatch-mock";

    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    async fn maybe_fail_or_stall(id: &str) -> Result<(), PairwatchError> {
        match id {
            "FAIL" => Err(PairwatchError::transient_io(
                Self::NAME,
                format!("forced failure for {id}"),
            )),
            "TIMEOUT" => {
                // Keep short to avoid slowing tests excessively
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SeriesSource for MockSource {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch_series(&self, id: &SeriesId) -> Result<Series, PairwatchError> {
        let s = id.as_str();
        Self::maybe_fail_or_stall(s).await?;
        fixtures::series::by_id(s)
            .ok_or_else(|| PairwatchError::not_found(format!("series for {s}")))
    }
}
