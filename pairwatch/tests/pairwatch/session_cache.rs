use std::sync::Arc;
use std::time::Duration;

use pairwatch::{CacheConfig, PairwatchError, StatsParams};

use crate::helpers::{A, B, builder_with, dynamic, wave};

#[tokio::test]
async fn reopening_a_pair_uses_the_cached_alignment() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 120, 40.0)).await;
    c.serve(wave(B, 120, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();

    let s1 = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let s2 = pw.open_session(&A.into(), &B.into()).await.unwrap();

    assert!(Arc::ptr_eq(s1.table(), s2.table()));
    assert_eq!(c.calls(A).await, 1);
    assert_eq!(c.calls(B).await, 1);
    assert_eq!(s1.a().as_str(), A);
    assert_eq!(s1.b().as_str(), B);
}

#[tokio::test]
async fn pair_order_is_part_of_the_key() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 80, 40.0)).await;
    c.serve(wave(B, 80, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();

    let ab = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let ba = pw.open_session(&B.into(), &A.into()).await.unwrap();

    assert!(!Arc::ptr_eq(ab.table(), ba.table()));
    assert_eq!(c.total_calls().await, 4);
    let r_ab = ab.table().rows()[0].ratio.unwrap();
    let r_ba = ba.table().rows()[0].ratio.unwrap();
    assert!((r_ab * r_ba - 1.0).abs() < 1e-12);
}

#[tokio::test]
async fn analyses_are_cached_per_parameter_set() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 200, 40.0)).await;
    c.serve(wave(B, 200, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();
    let session = pw.open_session(&A.into(), &B.into()).await.unwrap();

    let p1 = StatsParams::new(20, 7).unwrap();
    let p2 = StatsParams::new(30, 7).unwrap();
    let first = session.analyze(p1).await.unwrap();
    let again = session.analyze(p1).await.unwrap();
    let other = session.analyze(p2).await.unwrap();

    assert!(Arc::ptr_eq(&first, &again));
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(first.rsi(), other.rsi());
    assert_ne!(first.zscore(), other.zscore());
    // Parameter changes never reach the sources.
    assert_eq!(c.total_calls().await, 2);
}

#[tokio::test]
async fn sessions_share_the_analysis_cache() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 90, 40.0)).await;
    c.serve(wave(B, 90, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();
    let params = StatsParams::new(10, 5).unwrap();

    let s1 = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let t1 = s1.analyze(params).await.unwrap();
    let s2 = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let t2 = s2.analyze(params).await.unwrap();

    assert!(Arc::ptr_eq(&t1, &t2));
}

#[tokio::test]
async fn invalidate_forces_a_refetch() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 60, 40.0)).await;
    c.serve(wave(B, 60, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();

    pw.dashboard(&A.into(), &B.into()).await.unwrap();
    pw.invalidate();
    pw.dashboard(&A.into(), &B.into()).await.unwrap();

    assert_eq!(c.calls(A).await, 2);
    assert_eq!(c.calls(B).await, 2);
}

#[tokio::test]
async fn disabled_cache_recomputes_identical_results() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 150, 40.0)).await;
    c.serve(wave(B, 150, 20.0)).await;
    let pw = builder_with(&[src])
        .cache(CacheConfig {
            max_entries: 0,
            ttl: None,
        })
        .build()
        .unwrap();
    let params = StatsParams::new(25, 14).unwrap();

    let s1 = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let s2 = pw.open_session(&A.into(), &B.into()).await.unwrap();
    assert_eq!(c.calls(A).await, 2);
    assert_eq!(s1.table(), s2.table());

    let t1 = s1.analyze(params).await.unwrap();
    let t2 = s1.analyze(params).await.unwrap();
    assert!(!Arc::ptr_eq(&t1, &t2));
    assert_eq!(t1, t2);
}

#[tokio::test]
async fn analyze_rejects_zero_parameters() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 30, 40.0)).await;
    c.serve(wave(B, 30, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();
    let session = pw.open_session(&A.into(), &B.into()).await.unwrap();

    let bad = StatsParams {
        zscore_window: 0,
        rsi_period: 14,
    };
    let err = session.analyze(bad).await.unwrap_err();
    assert_eq!(err, PairwatchError::invalid_parameter("zscore_window", 0));

    let bad = StatsParams {
        zscore_window: 50,
        rsi_period: 0,
    };
    let err = session.dashboard(bad).await.unwrap_err();
    assert_eq!(err, PairwatchError::invalid_parameter("rsi_period", 0));
}

#[tokio::test]
async fn stale_session_never_feeds_a_fresh_one() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 120, 40.0)).await;
    c.serve(wave(B, 120, 20.0)).await;
    let pw = builder_with(&[src]).build().unwrap();
    let params = StatsParams::new(20, 7).unwrap();

    let old = pw.open_session(&A.into(), &B.into()).await.unwrap();
    pw.invalidate();
    c.serve(wave(A, 120, 55.0)).await;
    let new = pw.open_session(&A.into(), &B.into()).await.unwrap();
    assert_ne!(old.table(), new.table());

    let from_old = old.analyze(params).await.unwrap();
    let from_new = new.analyze(params).await.unwrap();

    assert!(Arc::ptr_eq(from_old.base(), old.table()));
    assert!(Arc::ptr_eq(from_new.base(), new.table()));
    assert_ne!(from_old.zscore(), from_new.zscore());

    // Both entries stay cached side by side.
    assert!(Arc::ptr_eq(&old.analyze(params).await.unwrap(), &from_old));
    assert!(Arc::ptr_eq(&new.analyze(params).await.unwrap(), &from_new));
}

#[tokio::test]
async fn expired_entries_are_refetched_and_recomputed() {
    let (src, c) = dynamic("dyn");
    c.serve(wave(A, 100, 40.0)).await;
    c.serve(wave(B, 100, 20.0)).await;
    let pw = builder_with(&[src])
        .cache(CacheConfig {
            max_entries: 16,
            ttl: Some(Duration::from_millis(300)),
        })
        .build()
        .unwrap();
    let params = StatsParams::new(10, 5).unwrap();

    let first = pw.open_session(&A.into(), &B.into()).await.unwrap();
    let first_stats = first.analyze(params).await.unwrap();
    let cached = pw.open_session(&A.into(), &B.into()).await.unwrap();
    assert!(Arc::ptr_eq(first.table(), cached.table()));
    assert_eq!(c.calls(A).await, 1);

    c.serve(wave(A, 100, 55.0)).await;
    // moka expires entries on its own wall clock, so real time has to pass.
    tokio::time::sleep(Duration::from_millis(700)).await;

    let refreshed = pw.open_session(&A.into(), &B.into()).await.unwrap();
    assert_eq!(c.calls(A).await, 2);
    assert_eq!(c.calls(B).await, 2);
    assert_ne!(refreshed.table(), first.table());

    let fresh_stats = refreshed.analyze(params).await.unwrap();
    assert!(Arc::ptr_eq(fresh_stats.base(), refreshed.table()));
    assert_ne!(fresh_stats.zscore(), first_stats.zscore());
}
