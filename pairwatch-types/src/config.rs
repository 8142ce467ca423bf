//! Configuration types shared across the orchestrator and the statistics core.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::PairwatchError;

/// Window sizes for the rolling statistics computed over the ratio column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatsParams {
    /// Size of the trailing window used for the rolling Z-Score.
    pub zscore_window: usize,
    /// Size of the trailing window used for the rolling RSI.
    pub rsi_period: usize,
}

impl StatsParams {
    /// Default Z-Score lookback in rows.
    pub const DEFAULT_ZSCORE_WINDOW: usize = 50;
    /// Default RSI period in rows.
    pub const DEFAULT_RSI_PERIOD: usize = 14;

    /// Build validated parameters.
    ///
    /// # Errors
    /// Returns `PairwatchError::InvalidParameter` if either value is below 1.
    pub fn new(zscore_window: usize, rsi_period: usize) -> Result<Self, PairwatchError> {
        let params = Self {
            zscore_window,
            rsi_period,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check that both windows are at least 1.
    ///
    /// # Errors
    /// Returns `PairwatchError::InvalidParameter` naming the first offending field.
    pub fn validate(&self) -> Result<(), PairwatchError> {
        if self.zscore_window < 1 {
            return Err(PairwatchError::invalid_parameter(
                "zscore_window",
                self.zscore_window,
            ));
        }
        if self.rsi_period < 1 {
            return Err(PairwatchError::invalid_parameter(
                "rsi_period",
                self.rsi_period,
            ));
        }
        Ok(())
    }
}

impl Default for StatsParams {
    fn default() -> Self {
        Self {
            zscore_window: Self::DEFAULT_ZSCORE_WINDOW,
            rsi_period: Self::DEFAULT_RSI_PERIOD,
        }
    }
}

/// Bounds for the in-memory caches kept by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Maximum number of entries per cache (aligned tables and analysis results).
    /// Zero disables caching.
    pub max_entries: u64,
    /// Optional time-to-live for each entry; `None` keeps entries until evicted.
    pub ttl: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            ttl: None,
        }
    }
}

/// Global configuration for the `Pairwatch` orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairwatchConfig {
    /// Default rolling statistics parameters.
    pub stats: StatsParams,
    /// Number of most recent rows returned by the display step.
    pub display_rows: usize,
    /// Timeout for a single source fetch.
    pub fetch_timeout: Duration,
    /// Cache bounds.
    pub cache: CacheConfig,
}

impl PairwatchConfig {
    /// Default number of rows shown by the display step.
    pub const DEFAULT_DISPLAY_ROWS: usize = 300;

    /// Validate every numeric field.
    ///
    /// # Errors
    /// Returns `PairwatchError::InvalidParameter` for a bad window/period or a zero row limit.
    pub fn validate(&self) -> Result<(), PairwatchError> {
        self.stats.validate()?;
        if self.display_rows < 1 {
            return Err(PairwatchError::invalid_parameter(
                "display_rows",
                self.display_rows,
            ));
        }
        Ok(())
    }
}

impl Default for PairwatchConfig {
    fn default() -> Self {
        Self {
            stats: StatsParams::default(),
            display_rows: Self::DEFAULT_DISPLAY_ROWS,
            fetch_timeout: Duration::from_secs(10),
            cache: CacheConfig::default(),
        }
    }
}
