use std::sync::Arc;
use std::time::Duration;

use pairwatch::{CacheConfig, Pairwatch, PairwatchConfig, PairwatchError, StatsParams};
use pairwatch_mock::MockSource;

#[test]
fn build_requires_a_source() {
    let err = Pairwatch::builder().build().err().unwrap();
    assert!(matches!(err, PairwatchError::InvalidConfig(_)));
}

#[test]
fn build_rejects_zero_windows_and_rows() {
    let src = Arc::new(MockSource::new());

    let err = Pairwatch::builder()
        .with_source(src.clone())
        .zscore_window(0)
        .build()
        .err()
        .unwrap();
    assert_eq!(err, PairwatchError::invalid_parameter("zscore_window", 0));

    let err = Pairwatch::builder()
        .with_source(src.clone())
        .rsi_period(0)
        .build()
        .err()
        .unwrap();
    assert_eq!(err, PairwatchError::invalid_parameter("rsi_period", 0));

    let err = Pairwatch::builder()
        .with_source(src)
        .display_rows(0)
        .build()
        .err()
        .unwrap();
    assert_eq!(err, PairwatchError::invalid_parameter("display_rows", 0));
}

#[test]
fn builder_settings_land_in_config() {
    let pw = Pairwatch::builder()
        .with_source(Arc::new(MockSource::new()))
        .stats(StatsParams::new(20, 7).unwrap())
        .display_rows(30)
        .fetch_timeout(Duration::from_secs(2))
        .cache(CacheConfig {
            max_entries: 0,
            ttl: None,
        })
        .build()
        .unwrap();

    let cfg = pw.config();
    assert_eq!(cfg.stats.zscore_window, 20);
    assert_eq!(cfg.stats.rsi_period, 7);
    assert_eq!(cfg.display_rows, 30);
    assert_eq!(cfg.fetch_timeout, Duration::from_secs(2));
    assert_eq!(cfg.cache.max_entries, 0);
}

#[test]
fn defaults_match_dashboard_conventions() {
    let pw = Pairwatch::builder()
        .with_source(Arc::new(MockSource::new()))
        .build()
        .unwrap();
    assert_eq!(pw.config(), &PairwatchConfig::default());
    assert_eq!(pw.config().stats.zscore_window, 50);
    assert_eq!(pw.config().stats.rsi_period, 14);
    assert_eq!(pw.config().display_rows, 300);
}
