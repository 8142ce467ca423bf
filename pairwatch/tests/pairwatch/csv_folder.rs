use std::fmt::Write as _;
use std::sync::Arc;

use pairwatch::{Pairwatch, PairwatchError};
use pairwatch_csv::CsvSource;
use pairwatch_mock::MockSource;

use crate::helpers::{A, B, day};

fn history_csv(n: u64, price: impl Fn(u64) -> f64) -> String {
    let mut out = String::from("Date,Open,High,Low,Close,Adj Close,Volume\n");
    for i in 0..n {
        let p = price(i);
        writeln!(out, "{} 00:00:00+05:30,{p},{p},{p},{p},{p},1000", day(i)).unwrap();
    }
    out
}

fn write_folder() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{A}_historical_data.csv")),
        history_csv(400, |i| 20.0 + (i % 17) as f64 * 0.3),
    )
    .unwrap();
    std::fs::write(
        dir.path().join(format!("{B}_historical_data.csv")),
        history_csv(390, |i| 10.0 + (i % 11) as f64 * 0.2),
    )
    .unwrap();
    dir
}

#[tokio::test]
async fn dashboard_from_a_csv_folder() {
    let dir = write_folder();
    let pw = Pairwatch::builder()
        .with_source(Arc::new(CsvSource::new(dir.path())))
        .build()
        .unwrap();

    let rows = pw.dashboard(&A.into(), &B.into()).await.unwrap();
    assert_eq!(rows.len(), 300);
    assert_eq!(rows[0].date, day(399));
    // The last ten days only exist for A.
    assert!(rows[..10].iter().all(|r| r.value_b.is_none() && r.ratio.is_none()));
    assert!(rows[10].ratio.is_some());
}

#[tokio::test]
async fn missing_file_falls_back_to_the_next_source() {
    let dir = tempfile::tempdir().unwrap();
    let pw = Pairwatch::builder()
        .with_source(Arc::new(CsvSource::new(dir.path())))
        .with_source(Arc::new(MockSource::new()))
        .build()
        .unwrap();

    let rows = pw.dashboard(&A.into(), &B.into()).await.unwrap();
    assert_eq!(rows.len(), 300);
}

#[tokio::test]
async fn missing_file_without_fallback_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let pw = Pairwatch::builder()
        .with_source(Arc::new(CsvSource::new(dir.path())))
        .build()
        .unwrap();

    let err = pw.fetch_series(&A.into()).await.unwrap_err();
    assert_eq!(err, PairwatchError::not_found(format!("series for {A}")));
}

#[tokio::test]
async fn malformed_file_is_a_data_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(format!("{A}_historical_data.csv")),
        "Timestamp,Close\n2024-01-01,1\n",
    )
    .unwrap();
    let pw = Pairwatch::builder()
        .with_source(Arc::new(CsvSource::new(dir.path())))
        .build()
        .unwrap();

    let err = pw.fetch_series(&A.into()).await.unwrap_err();
    let flat = err.flatten();
    assert!(matches!(flat.as_slice(), [PairwatchError::Data(_)]));
}
