//! Shared helpers for raw point normalization.

use std::collections::{BTreeMap, btree_map::Entry};

use chrono::NaiveDate;

use crate::TimePoint;

/// Sort points by date and keep only the first occurrence of each date.
///
/// Returns the unique points in ascending date order together with the number of
/// dropped duplicates.
#[must_use]
pub fn first_occurrences(points: &[TimePoint]) -> (Vec<TimePoint>, usize) {
    let mut by_date: BTreeMap<NaiveDate, TimePoint> = BTreeMap::new();
    let mut dropped = 0usize;
    for p in points {
        match by_date.entry(p.date) {
            Entry::Vacant(v) => {
                v.insert(*p);
            }
            Entry::Occupied(_) => dropped += 1,
        }
    }
    (by_date.into_values().collect(), dropped)
}
