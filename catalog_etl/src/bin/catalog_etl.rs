//! Catalog ETL binary
//!
//! Cleans the media and track catalogs, removes outliers, writes both
//! cleaned tables and the summary file, then prints a report.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin catalog-etl
//! ```
//!
//! File locations come from `catalog_etl.toml` when present, otherwise
//! the built-in defaults are used.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use catalog_etl::{CatalogPipeline, PipelineConfig};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting catalog ETL run");

    let config = PipelineConfig::from_default_location().context("Failed to load configuration")?;
    let pipeline = CatalogPipeline::with_config(config);

    let outcome = pipeline.run().with_context(|| {
        format!(
            "Pipeline failed (inputs: {}, {})",
            pipeline.config().inputs.media.display(),
            pipeline.config().inputs.tracks.display()
        )
    })?;

    print!("{}", outcome.report);
    println!();
    print!("{}", outcome.summary.render());

    info!(
        "Finished: {} media rows, {} track rows",
        outcome.catalog.media.height(),
        outcome.catalog.tracks.height()
    );

    Ok(())
}
