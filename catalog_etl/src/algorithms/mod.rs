//! Statistical algorithms used by the filters and the reporter.
//!
//! # Components
//!
//! - [`statistics`]: Quantiles, IQR fences, describe, value counts, mode
//! - [`correlation`]: Pairwise Pearson correlation matrix
//!
//! # Example
//!
//! ```
//! use catalog_etl::algorithms::{describe, IqrFences};
//! use polars::prelude::*;
//!
//! let popularity = Float64Chunked::from_slice("popularity".into(), &[12.0, 40.0, 55.0, 61.0, 70.0]);
//! let fences = IqrFences::from_values(&popularity).unwrap();
//! let stats = describe(&popularity).unwrap();
//! assert!(fences.contains(stats.median));
//! ```

pub mod correlation;
pub mod statistics;

pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
pub use statistics::{arg_max, describe, mean, mode, quantile, value_counts, Describe, IqrFences};
