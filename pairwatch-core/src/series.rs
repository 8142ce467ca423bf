use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::SeriesId;

/// A single dated observation. `value` is `None` when the price is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Price on that date, if known. Never NaN or infinite.
    pub value: Option<f64>,
}

impl TimePoint {
    /// Build a point, treating non-finite values as missing.
    #[must_use]
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self {
            date,
            value: value.filter(|v| v.is_finite()),
        }
    }

    /// Build a point with a known value.
    #[must_use]
    pub fn present(date: NaiveDate, value: f64) -> Self {
        Self::new(date, Some(value))
    }

    /// Build a point whose value is missing.
    #[must_use]
    pub const fn missing(date: NaiveDate) -> Self {
        Self { date, value: None }
    }
}

/// Price history of one instrument as returned by a source.
///
/// Points are kept in the order the source produced them. Alignment sorts them and
/// collapses duplicate dates, keeping the first occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    id: SeriesId,
    points: Vec<TimePoint>,
}

impl Series {
    /// Build a series from raw points.
    pub fn new(id: impl Into<SeriesId>, points: Vec<TimePoint>) -> Self {
        let points = points
            .into_iter()
            .map(|p| TimePoint::new(p.date, p.value))
            .collect();
        Self {
            id: id.into(),
            points,
        }
    }

    /// Build a series where every point carries a value.
    pub fn from_values<I>(id: impl Into<SeriesId>, values: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let points = values
            .into_iter()
            .map(|(date, v)| TimePoint::present(date, v))
            .collect();
        Self::new(id, points)
    }

    /// Identifier this series was fetched under.
    #[must_use]
    pub const fn id(&self) -> &SeriesId {
        &self.id
    }

    /// Raw points in source order.
    #[must_use]
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    /// Number of raw points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the series has no points at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest and latest dates present, if any.
    #[must_use]
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.iter().map(|p| p.date).min()?;
        let last = self.points.iter().map(|p| p.date).max()?;
        Some((first, last))
    }
}
