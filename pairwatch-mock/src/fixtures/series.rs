use chrono::{Datelike, NaiveDate, Weekday};
use pairwatch_core::{Series, TimePoint};

/// Identifiers served by [`by_id`].
pub const IDS: &[&str] = &["A2ZINFRA.NS", "AARTIIND.NS", "RISING", "FLAT", "EMPTY"];

pub fn by_id(id: &str) -> Option<Series> {
    match id {
        // Trading-day history with a few sessions missing on one side only.
        "A2ZINFRA.NS" => Some(build(id, 420, |i| {
            (i % 37 != 5).then(|| 15.0 + 2.0 * (i as f64 * 0.11).sin() + i as f64 * 0.004)
        })),
        "AARTIIND.NS" => Some(build(id, 420, |i| {
            (i % 53 != 17).then(|| 540.0 + 30.0 * (i as f64 * 0.07).cos() - i as f64 * 0.05)
        })),
        "RISING" => Some(build(id, 60, |i| Some(100.0 + i as f64))),
        "FLAT" => Some(build(id, 60, |_| Some(250.0))),
        "EMPTY" => Some(Series::new(id, vec![])),
        _ => None,
    }
}

fn build(id: &str, days: usize, price: impl Fn(usize) -> Option<f64>) -> Series {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let points = start
        .iter_days()
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .take(days)
        .enumerate()
        .filter_map(|(i, date)| price(i).map(|v| TimePoint::present(date, v)))
        .collect();
    Series::new(id, points)
}
