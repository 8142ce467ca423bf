//! Time-series utilities used by the orchestrator before statistics are computed.
//!
//! Modules include:
//! - `align`: outer-join two series on date and derive the ratio column
//! - `util`: ordering and duplicate-date handling for raw source points
/// Outer-join alignment and ratio derivation.
pub mod align;
/// Helpers for normalizing raw source points.
pub mod util;
