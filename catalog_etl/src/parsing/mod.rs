//! Parsers for the delimited catalog inputs and their free-text fields.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Parse delimited files into typed DataFrames
//! - [`dates`]: Lenient date parsing with a missing marker on failure
//! - [`text`]: Title casing and duration-string extraction patterns
//!
//! # Example
//!
//! ```no_run
//! use catalog_etl::parsing::csv_parser::parse_csv;
//! use std::path::Path;
//!
//! let media = parse_csv(Path::new("netflix_titles.csv"))
//!     .expect("Failed to parse media catalog");
//! println!("{} rows", media.height());
//! ```

pub mod csv_parser;
pub mod dates;
pub mod text;


pub use csv_parser::{parse_csv, parse_csv_str};
