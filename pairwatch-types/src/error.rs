use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the pairwatch workspace.
///
/// Covers input and parameter validation for the statistics core, source-tagged
/// fetch failures, and an aggregate for multi-source attempts. Insufficient
/// history at the start of a series is never an error; it shows up as missing
/// values in the derived columns.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PairwatchError {
    /// One of the input series is absent or has no points.
    #[error("input series missing or empty: {series}")]
    InputMissing {
        /// Identifier of the offending series.
        series: String,
    },

    /// The outer join produced no row where both values yield a usable ratio.
    #[error("no usable overlapping rows after aligning {a} with {b}")]
    AlignmentEmpty {
        /// Identifier of the numerator series.
        a: String,
        /// Identifier of the denominator series.
        b: String,
    },

    /// A window, period, or row limit was outside its accepted range.
    #[error("invalid parameter: {name}={value} (must be >= 1)")]
    InvalidParameter {
        /// Parameter name, e.g. "zscore_window".
        name: String,
        /// Rejected value.
        value: usize,
    },

    /// A source has no series for the requested identifier.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "series for AAPL".
        what: String,
    },

    /// A source hit a retryable I/O failure.
    #[error("{source_name} transient I/O failure: {msg}")]
    TransientIo {
        /// Name of the source that failed.
        source_name: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Issues with the returned data (missing columns, unparsable dates, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// A single source call exceeded the configured fetch timeout.
    #[error("source timed out: {what} via {source_name}")]
    SourceTimeout {
        /// Name of the source that timed out.
        source_name: String,
        /// What was being fetched.
        what: String,
    },

    /// Every attempted source timed out.
    #[error("all sources timed out: {what}")]
    AllSourcesTimedOut {
        /// What was being fetched.
        what: String,
    },

    /// Every attempted source failed; contains the individual failures.
    #[error("all sources failed: {0:?}")]
    AllSourcesFailed(Vec<PairwatchError>),

    /// The orchestrator was built with an unusable configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PairwatchError {
    /// Helper: build an `InputMissing` error naming the empty series.
    pub fn input_missing(series: impl Into<String>) -> Self {
        Self::InputMissing {
            series: series.into(),
        }
    }

    /// Helper: build an `AlignmentEmpty` error for a pair.
    pub fn alignment_empty(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self::AlignmentEmpty {
            a: a.into(),
            b: b.into(),
        }
    }

    /// Helper: build an `InvalidParameter` error.
    pub fn invalid_parameter(name: impl Into<String>, value: usize) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value,
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `TransientIo` error with the source name and message.
    pub fn transient_io(source_name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::TransientIo {
            source_name: source_name.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `SourceTimeout` error.
    pub fn source_timeout(source_name: impl Into<String>, what: impl Into<String>) -> Self {
        Self::SourceTimeout {
            source_name: source_name.into(),
            what: what.into(),
        }
    }

    /// Returns true if retrying the same request later could succeed.
    ///
    /// Aggregates are transient when any contained failure is.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::TransientIo { .. } | Self::SourceTimeout { .. } | Self::AllSourcesTimedOut { .. } => {
                true
            }
            Self::AllSourcesFailed(inner) => inner.iter().any(Self::is_transient),
            _ => false,
        }
    }

    /// Flatten nested `AllSourcesFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllSourcesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
