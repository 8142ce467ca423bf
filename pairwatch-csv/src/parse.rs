use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use pairwatch_core::{PairwatchError, Series, SeriesId, TimePoint};

const DATE_COLUMN: &str = "Date";
const CLOSE_COLUMN: &str = "Close";

/// Parse a history export into a [`Series`].
///
/// - Header names are matched case-insensitively; column order is free.
/// - Dates are `YYYY-MM-DD`; anything after the date (a time or offset, separated by
///   a space or `T`) is ignored.
/// - Empty or non-numeric `Close` cells become missing values.
///
/// # Errors
/// Returns `PairwatchError::Data` if a required column is absent, a row has no
/// parsable date, or the CSV itself is malformed.
pub fn parse_series<R: Read>(id: SeriesId, reader: R) -> Result<Series, PairwatchError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| PairwatchError::Data(format!("{id}: unreadable header: {e}")))?
        .clone();
    let date_idx = column_index(&headers, DATE_COLUMN, &id)?;
    let close_idx = column_index(&headers, CLOSE_COLUMN, &id)?;

    let mut points = Vec::new();
    for (n, record) in rdr.records().enumerate() {
        // Header is line 1.
        let line = n + 2;
        let record =
            record.map_err(|e| PairwatchError::Data(format!("{id}: line {line}: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| {
            PairwatchError::Data(format!("{id}: line {line}: invalid date {raw_date:?}"))
        })?;
        let value = record
            .get(close_idx)
            .and_then(|c| c.parse::<f64>().ok());
        points.push(TimePoint::new(date, value));
    }
    Ok(Series::new(id, points))
}

fn column_index(headers: &StringRecord, name: &str, id: &SeriesId) -> Result<usize, PairwatchError> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| PairwatchError::Data(format!("{id}: missing column {name:?}")))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.split([' ', 'T']).next()?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
