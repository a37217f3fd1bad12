//! Reporting over the cleaned catalogs.
//!
//! - [`summary`]: the fixed-format summary file
//! - [`console_report`]: distributions, descriptive statistics and feature
//!   correlations printed at the end of a run, plus the aggregates that feed
//!   charts

pub mod console_report;
pub mod summary;

pub use console_report::{top_values, year_counts, ConsoleReport, ReportSection};
pub use summary::Summary;
