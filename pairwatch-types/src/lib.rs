//! Pairwatch-specific error, identifier, and configuration primitives shared by every crate
//! in the workspace.
#![warn(missing_docs)]

mod config;
mod error;
mod ids;

pub use config::{CacheConfig, PairwatchConfig, StatsParams};
pub use error::PairwatchError;
pub use ids::{SeriesId, SourceKey};
