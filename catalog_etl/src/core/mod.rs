//! Column-level helpers over the polars `DataFrame` every stage passes along.
//!
//! Stages consume a `DataFrame` and return a new one, so the pipeline
//! reads as a chain of value-passing steps. The helpers here cover what
//! the stages share: checking required columns, reading a column as
//! finite floats or text, and rewriting a column cell by cell.

pub mod frame;

pub use frame::{derive_text, finite_values, has_column, map_text, require_columns};
