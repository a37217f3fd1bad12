//! Descriptive statistics over polars columns.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::PipelineResult;

/// Multiplier applied to the interquartile range to place the fences
pub const IQR_FENCE_FACTOR: f64 = 1.5;

/// Name of the count column in a frequency table
const COUNT: &str = "count";

/// Quantile using linear interpolation between the two nearest order
/// statistics. Missing values are ignored; `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use catalog_etl::algorithms::statistics::quantile;
/// use polars::prelude::*;
///
/// let values = Float64Chunked::from_slice("v".into(), &[4.0, 1.0, 3.0, 2.0]);
/// assert_eq!(quantile(&values, 0.25), Some(1.75));
/// assert_eq!(quantile(&values, 0.5), Some(2.5));
/// assert_eq!(quantile(&Float64Chunked::from_slice("v".into(), &[]), 0.5), None);
/// ```
pub fn quantile(values: &Float64Chunked, q: f64) -> Option<f64> {
    values
        .quantile(q.clamp(0.0, 1.0), QuantileMethod::Linear)
        .ok()
        .flatten()
}

/// Quartiles and the Tukey fences derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IqrFences {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrFences {
    /// Computes fences at `Q1 - 1.5·IQR` and `Q3 + 1.5·IQR`.
    ///
    /// `values` must be finite; see [`crate::core::finite_values`].
    pub fn from_values(values: &Float64Chunked) -> Option<Self> {
        let q1 = quantile(values, 0.25)?;
        let q3 = quantile(values, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            q1,
            q3,
            iqr,
            lower: q1 - IQR_FENCE_FACTOR * iqr,
            upper: q3 + IQR_FENCE_FACTOR * iqr,
        })
    }

    /// Inclusive on both fences.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Summary of a numeric column.
///
/// `std` is the sample standard deviation and is `None` below two values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Computes count, mean, sample std, min, quartiles and max.
///
/// Returns `None` when there are no values.
pub fn describe(values: &Float64Chunked) -> Option<Describe> {
    let count = values.len() - values.null_count();
    if count == 0 {
        return None;
    }

    Some(Describe {
        count,
        mean: values.mean()?,
        std: if count > 1 { values.std(1) } else { None },
        min: values.min()?,
        q25: quantile(values, 0.25)?,
        median: quantile(values, 0.5)?,
        q75: quantile(values, 0.75)?,
        max: values.max()?,
    })
}

/// Arithmetic mean; `None` when there are no values.
pub fn mean(values: &Float64Chunked) -> Option<f64> {
    values.mean()
}

/// Frequency table of `column` ordered by descending count; ties keep
/// first-seen order. Missing cells are not counted.
///
/// # Examples
///
/// ```
/// use catalog_etl::algorithms::statistics::value_counts;
/// use polars::prelude::*;
///
/// let df = df!("type" => ["Movie", "Tv Show", "Movie"]).unwrap();
/// let counts = value_counts(&df, "type").unwrap();
/// assert_eq!(counts, vec![("Movie".to_string(), 2), ("Tv Show".to_string(), 1)]);
/// ```
pub fn value_counts(df: &DataFrame, column: &str) -> PipelineResult<Vec<(String, usize)>> {
    let counts = df
        .clone()
        .lazy()
        .select([col(column).cast(DataType::String)])
        .filter(col(column).is_not_null())
        .group_by_stable([col(column)])
        .agg([len().alias(COUNT)])
        .sort(
            [COUNT],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let labels = counts.column(column)?.str()?;
    let tallies = counts.column(COUNT)?.cast(&DataType::UInt64)?;
    Ok(labels
        .into_iter()
        .zip(tallies.u64()?.into_iter())
        .filter_map(|(label, count)| Some((label?.to_string(), count? as usize)))
        .collect())
}

/// Most frequent value of a frequency table; among ties the
/// lexicographically smallest wins.
pub fn mode(counts: &[(String, usize)]) -> Option<&str> {
    let top = counts.iter().map(|(_, c)| *c).max()?;
    counts
        .iter()
        .filter(|(_, c)| *c == top)
        .map(|(v, _)| v.as_str())
        .min()
}

/// Label with the highest count in a frequency table (its first entry).
pub fn arg_max(counts: &[(String, usize)]) -> Option<&str> {
    counts
        .iter()
        .fold(None, |best: Option<&(String, usize)>, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map(|(label, _)| label.as_str())
}
