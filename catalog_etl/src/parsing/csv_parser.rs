//! Delimited text → [`DataFrame`] through the polars CSV reader.

use std::io::Cursor;
use std::path::Path;

use polars::io::csv::read::NullValues;
use polars::prelude::*;

use crate::error::{PipelineError, PipelineResult};

/// Tokens read as a missing cell, besides the empty field
pub const MISSING_TOKENS: &[&str] = &[
    "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA", "#N/A N/A", "1.#IND", "-1.#IND", "1.#QNAN", "-1.#QNAN",
];

/// Reader options shared by file and in-memory parsing.
///
/// The schema is inferred from every row, so a single float cell turns an
/// integer column into a float column and a single word keeps a column text.
fn read_options() -> CsvReadOptions {
    let null_values = NullValues::AllColumns(
        MISSING_TOKENS
            .iter()
            .map(|token| PlSmallStr::from(*token))
            .collect(),
    );
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
}

fn parse_error(origin: &Path) -> impl FnOnce(PolarsError) -> PipelineError + '_ {
    move |source| PipelineError::Parse {
        path: origin.to_path_buf(),
        source,
    }
}

/// Parse a delimited text file into a DataFrame.
///
/// The first row is the header. A row with more fields than the header
/// fails with [`PipelineError::Parse`].
pub fn parse_csv(path: &Path) -> PipelineResult<DataFrame> {
    if !path.exists() {
        return Err(PipelineError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = read_options()
        .try_into_reader_with_file_path(Some(path.into()))
        .map_err(parse_error(path))?
        .finish()
        .map_err(parse_error(path))?;

    log::debug!("Parsed {} with schema {:?}", path.display(), df.schema());
    Ok(df)
}

/// Parse delimited text held in memory.
pub fn parse_csv_str(content: &str) -> PipelineResult<DataFrame> {
    read_options()
        .into_reader_with_file_handle(Cursor::new(content.as_bytes().to_vec()))
        .finish()
        .map_err(parse_error(Path::new("<memory>")))
}
