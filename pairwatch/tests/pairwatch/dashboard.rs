use std::sync::Arc;

use pairwatch::{Pairwatch, StatsParams};
use pairwatch_mock::MockSource;

use crate::helpers::{A, B, builder_with, day, dynamic, series};

fn fixture_pw(display_rows: usize) -> Pairwatch {
    Pairwatch::builder()
        .with_source(Arc::new(MockSource::new()))
        .display_rows(display_rows)
        .build()
        .unwrap()
}

#[tokio::test]
async fn long_history_is_cut_to_the_newest_rows() {
    let pw = fixture_pw(300);
    let rows = pw.dashboard(&A.into(), &B.into()).await.unwrap();

    assert_eq!(rows.len(), 300);
    assert!(rows.windows(2).all(|w| w[0].date > w[1].date));

    let session = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let full = session.analyze(StatsParams::default()).await.unwrap();
    assert_eq!(full.len(), 420);
    let newest = full.row(full.len() - 1).unwrap();
    assert_eq!(rows[0], newest);
}

#[tokio::test]
async fn truncation_does_not_change_values() {
    let pw = fixture_pw(25);
    let shown = pw.dashboard(&A.into(), &B.into()).await.unwrap();
    assert_eq!(shown.len(), 25);

    let session = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let full = session.analyze(StatsParams::default()).await.unwrap();
    let tail: Vec<_> = full.rows().rev().take(25).collect();
    assert_eq!(shown, tail);
}

#[tokio::test]
async fn short_history_is_shown_whole() {
    let pw = fixture_pw(300);
    let rows = pw
        .dashboard(&"RISING".into(), &"FLAT".into())
        .await
        .unwrap();
    assert_eq!(rows.len(), 60);
}

#[tokio::test]
async fn rising_ratio_pins_rsi_at_100() {
    let pw = fixture_pw(300);
    let session = pw
        .open_session(&"RISING".into(), &"FLAT".into())
        .await
        .unwrap();
    let table = session.analyze(StatsParams::default()).await.unwrap();

    let rsi = table.rsi();
    assert!(rsi[..14].iter().all(Option::is_none));
    assert!(rsi[14..].iter().all(|v| *v == Some(100.0)));
    let z = table.zscore();
    assert!(z[..49].iter().all(Option::is_none));
    assert!(z[49..].iter().all(|v| v.is_some_and(|z| z > 0.0)));
}

#[tokio::test]
async fn constant_ratio_has_no_statistics() {
    let pw = fixture_pw(300);
    let rows = pw
        .dashboard(&"FLAT".into(), &"FLAT".into())
        .await
        .unwrap();
    assert!(rows.iter().all(|r| r.ratio == Some(1.0)));
    assert!(rows.iter().all(|r| r.zscore.is_none() && r.rsi.is_none()));
}

#[tokio::test]
async fn worked_example_through_the_orchestrator() {
    let (src, c) = dynamic("dyn");
    c.serve(series("A", &[10.0, 11.0, 9.0])).await;
    c.serve(series("B", &[5.0, 5.0, 5.0])).await;
    let pw = builder_with(&[src]).build().unwrap();

    let session = pw.open_session(&"A".into(), &"B".into()).await.unwrap();
    let rows = session
        .dashboard(StatsParams::new(2, 1).unwrap())
        .await
        .unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].date, day(2));
    assert_eq!(rows[2].date, day(0));

    let ratios: Vec<f64> = rows.iter().rev().map(|r| r.ratio.unwrap()).collect();
    for (got, want) in ratios.iter().zip([2.0, 2.2, 1.8]) {
        assert!((got - want).abs() < 1e-12);
    }

    // Window of two: z is +-1/sqrt(2) whenever the pair differs.
    let z1 = rows[1].zscore.unwrap();
    assert!((z1 - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    let z2 = rows[0].zscore.unwrap();
    assert!((z2 + std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
    assert_eq!(rows[2].zscore, None);

    assert_eq!(rows[1].rsi, Some(100.0));
    assert_eq!(rows[0].rsi, Some(0.0));
    assert_eq!(rows[2].rsi, None);
}

#[tokio::test]
async fn rows_serialize_with_display_column_names() {
    let pw = fixture_pw(1);
    let rows = pw.dashboard(&A.into(), &B.into()).await.unwrap();
    let json = serde_json::to_value(&rows[0]).unwrap();
    for key in ["Date", "ValueA", "ValueB", "Ratio", "ZScore", "RSI"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
}
