//! Fixed-edge binning of continuous values into ordinal labels.
//!
//! Bins are right-closed: with edges `[0, 40, 70, 100]` the bins are
//! `(0, 40]`, `(40, 70]` and `(70, 100]`. The lowest edge itself and
//! anything outside the edges get no label.

use polars::prelude::*;

use crate::error::PipelineResult;

/// Ordinal labels shared by every band
pub const BAND_LABELS: [&str; 3] = ["Low", "Medium", "High"];

/// Edges used for `popularity_band`
pub const POPULARITY_EDGES: [f64; 4] = [0.0, 40.0, 70.0, 100.0];

/// Edges used for `energy_band`
pub const ENERGY_EDGES: [f64; 4] = [0.0, 0.4, 0.7, 1.0];

/// A set of right-closed bins with one label per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins<'a> {
    edges: &'a [f64],
    labels: &'a [&'a str],
}

impl<'a> Bins<'a> {
    /// `edges` must be increasing and hold exactly one more entry than `labels`.
    pub fn new(edges: &'a [f64], labels: &'a [&'a str]) -> Option<Self> {
        let increasing = edges.windows(2).all(|w| w[0] < w[1]);
        if edges.len() != labels.len() + 1 || !increasing {
            return None;
        }
        Some(Self { edges, labels })
    }

    pub fn popularity() -> Bins<'static> {
        Bins {
            edges: &POPULARITY_EDGES,
            labels: &BAND_LABELS,
        }
    }

    pub fn energy() -> Bins<'static> {
        Bins {
            edges: &ENERGY_EDGES,
            labels: &BAND_LABELS,
        }
    }

    /// Label for `value`, or `None` when it falls outside every bin.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog_etl::transformations::banding::Bins;
    ///
    /// let bins = Bins::popularity();
    /// assert_eq!(bins.assign(40.0), Some("Low"));
    /// assert_eq!(bins.assign(41.0), Some("Medium"));
    /// assert_eq!(bins.assign(70.0), Some("Medium"));
    /// assert_eq!(bins.assign(0.0), None);
    /// ```
    pub fn assign(&self, value: f64) -> Option<&'a str> {
        if !value.is_finite() {
            return None;
        }
        self.edges
            .windows(2)
            .position(|w| value > w[0] && value <= w[1])
            .map(|i| self.labels[i])
    }
}

/// Add `target` holding the band label of `source`; unlabeled cells are missing.
pub fn add_band_column(
    mut df: DataFrame,
    source: &str,
    target: &str,
    bins: &Bins<'_>,
) -> PipelineResult<DataFrame> {
    let values = df.column(source)?.cast(&DataType::Float64)?;
    let labels: Vec<Option<&str>> = values
        .f64()?
        .into_iter()
        .map(|value| value.and_then(|v| bins.assign(v)))
        .collect();
    df.with_column(Series::new(target.into(), labels))?;
    Ok(df)
}
