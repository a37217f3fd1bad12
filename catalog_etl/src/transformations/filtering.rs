use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::statistics::IqrFences;
use crate::core::{finite_values, require_columns};
use crate::error::{PipelineError, PipelineResult};

/// An IQR filter as applied to one column, with the row counts around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedFilter {
    pub table: String,
    pub column: String,
    pub fences: IqrFences,
    pub before: usize,
    pub after: usize,
}

/// Filter rows by an inclusive numeric range on one column.
///
/// Rows whose cell is missing are dropped.
pub fn filter_by_range(
    df: DataFrame,
    column: &str,
    min_value: f64,
    max_value: f64,
) -> PolarsResult<DataFrame> {
    df.lazy()
        .filter(
            col(column)
                .gt_eq(lit(min_value))
                .and(col(column).lt_eq(lit(max_value))),
        )
        .collect()
}

/// Keep rows whose value in `column` is strictly below `limit`.
pub fn filter_below(df: DataFrame, column: &str, limit: f64) -> PolarsResult<DataFrame> {
    df.lazy().filter(col(column).lt(lit(limit))).collect()
}

/// Remove IQR outliers from one numeric column of the frame named `table`.
///
/// Quartiles come from the frame exactly as passed in, so chaining this
/// over several columns is order dependent. Rows with a missing value in
/// `column` are dropped. Returns the filtered frame and the fences used.
///
/// # Errors
///
/// [`PipelineError::MissingColumn`] if the column is absent and
/// [`PipelineError::EmptyResultSet`] if it holds no numeric values.
pub fn filter_iqr_outliers(
    df: DataFrame,
    table: &str,
    column: &str,
) -> PipelineResult<(DataFrame, IqrFences)> {
    require_columns(&df, table, &[column])?;

    let values = finite_values(&df, column)?;
    let fences = IqrFences::from_values(&values)
        .ok_or_else(|| PipelineError::empty(table, &format!("iqr:{column}")))?;

    log::debug!(
        "IQR fences for {}.{}: q1={} q3={} lower={} upper={}",
        table,
        column,
        fences.q1,
        fences.q3,
        fences.lower,
        fences.upper
    );

    let filtered = filter_by_range(df, column, fences.lower, fences.upper)?;
    Ok((filtered, fences))
}
