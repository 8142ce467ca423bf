mod common;
#[cfg(feature = "dataframe")]
use pairwatch::{Pairwatch, ToDataFrame};

#[cfg(feature = "dataframe")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    common::init_tracing();
    let pw = Pairwatch::builder()
        .with_source(common::get_source())
        .build()?;

    let session = pw
        .open_session(&"A2ZINFRA.NS".into(), &"AARTIIND.NS".into())
        .await?;
    let aligned = session.table().to_dataframe()?;
    println!(
        "Aligned: {} rows x {} cols",
        aligned.height(),
        aligned.width()
    );

    let rows = pw
        .dashboard(&"A2ZINFRA.NS".into(), &"AARTIIND.NS".into())
        .await?;
    let shown = rows.as_slice().to_dataframe()?;
    println!(
        "Dashboard: {} rows x {} cols ({:?})",
        shown.height(),
        shown.width(),
        shown.get_column_names()
    );
    Ok(())
}

#[cfg(not(feature = "dataframe"))]
fn main() {
    eprintln!("This example requires the 'dataframe' feature. Skipping.");
}
