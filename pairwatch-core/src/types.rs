//! Re-export of foundational types from `pairwatch-types`.
// Consolidated re-exports so downstream crates can depend on `pairwatch-core` only

pub use pairwatch_types::{CacheConfig, PairwatchConfig, PairwatchError, StatsParams};
pub use pairwatch_types::{SeriesId, SourceKey};
