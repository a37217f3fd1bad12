use polars::prelude::*;

use crate::error::{PipelineError, PipelineResult};

/// Fails with [`PipelineError::MissingColumn`] for the first absent column.
///
/// `table` only names the frame in the error.
pub fn require_columns(df: &DataFrame, table: &str, columns: &[&str]) -> PipelineResult<()> {
    match columns.iter().find(|column| !has_column(df, column)) {
        Some(column) => Err(PipelineError::MissingColumn {
            table: table.to_string(),
            column: column.to_string(),
        }),
        None => Ok(()),
    }
}

pub fn has_column(df: &DataFrame, column: &str) -> bool {
    df.get_column_index(column).is_some()
}

/// Non-missing, finite values of `column` read as `f64`, in row order.
///
/// Cells that cannot be read as numbers are skipped.
///
/// # Examples
///
/// ```
/// use catalog_etl::core::finite_values;
/// use polars::prelude::*;
///
/// let df = df!("popularity" => [Some(50i64), None, Some(61)]).unwrap();
/// let values = finite_values(&df, "popularity").unwrap();
/// assert_eq!(values.len(), 2);
/// assert_eq!(values.get(1), Some(61.0));
/// ```
pub fn finite_values(df: &DataFrame, column: &str) -> PipelineResult<Float64Chunked> {
    let cast = df.column(column)?.cast(&DataType::Float64)?;
    let values: Vec<f64> = cast
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .collect();
    Ok(Float64Chunked::from_vec(column.into(), values))
}

/// Write `target` from `source` read as text, one cell at a time.
///
/// `target` replaces a column of the same name in place, otherwise it is
/// appended. `f` sees `None` for missing cells and returns `None` for a
/// missing result.
pub fn derive_text<F>(
    mut df: DataFrame,
    source: &str,
    target: &str,
    mut f: F,
) -> PipelineResult<DataFrame>
where
    F: FnMut(Option<&str>) -> Option<String>,
{
    let cast = df.column(source)?.cast(&DataType::String)?;
    let mapped: Vec<Option<String>> = cast.str()?.into_iter().map(&mut f).collect();
    df.with_column(Series::new(target.into(), mapped))?;
    Ok(df)
}

/// Rewrite `column` in place, one cell at a time; see [`derive_text`].
pub fn map_text<F>(df: DataFrame, column: &str, f: F) -> PipelineResult<DataFrame>
where
    F: FnMut(Option<&str>) -> Option<String>,
{
    derive_text(df, column, column, f)
}
