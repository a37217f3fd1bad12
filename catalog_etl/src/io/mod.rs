//! High-level loading and export utilities.
//!
//! Loaders turn the two source files into frames with error context;
//! exporters write frames and text reports back to disk, overwriting
//! whatever was there.
//!
//! # Example
//!
//! ```no_run
//! use catalog_etl::io::{CatalogLoader, TableExporter};
//! use std::path::Path;
//!
//! let catalog = CatalogLoader::load(Path::new("netflix_titles.csv"), Path::new("data.csv"))
//!     .expect("Failed to load");
//! TableExporter::write_csv(&catalog.media, "media", Path::new("copy.csv")).expect("Failed to write");
//! ```

pub mod exporters;
pub mod loaders;


pub use exporters::TableExporter;
pub use loaders::{CatalogLoadResult, CatalogLoader, MEDIA_TABLE, TRACKS_TABLE};
