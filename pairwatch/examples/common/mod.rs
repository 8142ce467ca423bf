#![allow(dead_code)]

use std::sync::Arc;

use pairwatch::SeriesSource;

/// CSV folder from `PAIRWATCH_DATA_DIR`, or the fixture source when unset.
#[must_use]
pub fn get_source() -> Arc<dyn SeriesSource> {
    match std::env::var("PAIRWATCH_DATA_DIR") {
        Ok(dir) => Arc::new(pairwatch_csv::CsvSource::new(dir)),
        Err(_) => {
            println!("--- (Using mock source; set PAIRWATCH_DATA_DIR for real files) ---");
            Arc::new(pairwatch_mock::MockSource::new())
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}

pub fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{x:.4}"))
}
