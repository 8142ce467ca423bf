mod common;
use pairwatch::{Pairwatch, StatsParams};

use common::{fmt_opt, get_source, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let pw = Pairwatch::builder().with_source(get_source()).build()?;

    // Align once, then try several windows without touching the source again.
    let session = pw
        .open_session(&"A2ZINFRA.NS".into(), &"AARTIIND.NS".into())
        .await?;
    println!("{} aligned rows", session.table().len());

    for (window, period) in [(20, 7), (50, 14), (100, 21)] {
        let rows = session.dashboard(StatsParams::new(window, period)?).await?;
        let latest = &rows[0];
        println!(
            "window={window:<4} period={period:<3} {} z={} rsi={}",
            latest.date,
            fmt_opt(latest.zscore),
            fmt_opt(latest.rsi),
        );
    }

    Ok(())
}
