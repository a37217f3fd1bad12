//! DataFrame transformation and cleaning utilities.
//!
//! This module provides the generic operations the cleaners are built from:
//! missing-value handling, duplicate removal, numeric coercion, range and
//! IQR outlier filtering, and fixed-edge banding.
//!
//! # Modules
//!
//! - [`cleaning`]: Drop missing rows, remove duplicates, coerce numbers
//! - [`filtering`]: Range, threshold and IQR outlier filters
//! - [`banding`]: Map continuous values to Low/Medium/High labels
//!
//! # Example
//!
//! ```
//! use catalog_etl::transformations::{filter_iqr_outliers, remove_duplicates};
//! use polars::prelude::*;
//!
//! let tracks = df!("popularity" => [1i64, 2, 2, 3, 4, 100]).unwrap();
//! let unique = remove_duplicates(&tracks).unwrap();
//! let (kept, fences) = filter_iqr_outliers(unique, "tracks", "popularity").unwrap();
//! assert_eq!(kept.height(), 4);
//! assert!(fences.upper < 100.0);
//! ```

pub mod banding;
pub mod cleaning;
pub mod filtering;

pub use banding::{add_band_column, Bins};
pub use cleaning::{coerce_numeric, drop_any_missing, drop_missing, remove_duplicates};
pub use filtering::{filter_below, filter_by_range, filter_iqr_outliers, AppliedFilter};
