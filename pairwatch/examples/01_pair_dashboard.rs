mod common;
use pairwatch::Pairwatch;

use common::{fmt_opt, get_source, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // 1. Register a source (mock unless PAIRWATCH_DATA_DIR is set).
    let pw = Pairwatch::builder().with_source(get_source()).build()?;

    // 2. Pick the pair; the ratio is first / second.
    let a = std::env::args().nth(1).unwrap_or_else(|| "A2ZINFRA.NS".into());
    let b = std::env::args().nth(2).unwrap_or_else(|| "AARTIIND.NS".into());

    // 3. Fetch, align, compute and keep the newest rows.
    let rows = pw.dashboard(&a.as_str().into(), &b.as_str().into()).await?;

    println!("{:<12} {:>10} {:>10} {:>10} {:>10} {:>10}", "Date", &a, &b, "Ratio", "ZScore", "RSI");
    for r in rows.iter().take(20) {
        println!(
            "{:<12} {:>10} {:>10} {:>10} {:>10} {:>10}",
            r.date.to_string(),
            fmt_opt(r.value_a),
            fmt_opt(r.value_b),
            fmt_opt(r.ratio),
            fmt_opt(r.zscore),
            fmt_opt(r.rsi),
        );
    }
    println!("... {} rows total", rows.len());

    Ok(())
}
