//! Batch cleaning of a media catalog and a music-track catalog.
//!
//! The pipeline loads both tables from CSV, normalizes and derives fields,
//! removes IQR outliers, assigns Low/Medium/High bands, then writes the
//! cleaned tables and a plain-text summary.
//!
//! ```no_run
//! use catalog_etl::{CatalogPipeline, PipelineConfig};
//!
//! let config = PipelineConfig::from_default_location()?;
//! let outcome = CatalogPipeline::with_config(config).run()?;
//! print!("{}", outcome.summary.render());
//! # Ok::<(), catalog_etl::PipelineError>(())
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod transformations;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use preprocessing::{CatalogPipeline, PipelineOutcome, ProcessedCatalog};
