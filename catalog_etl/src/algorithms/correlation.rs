//! Pairwise Pearson correlation between numeric columns.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::has_column;
use crate::error::PipelineResult;

/// Square correlation matrix; `values[i][j]` correlates `columns[i]` with `columns[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        self.values[i][j]
    }
}

/// Pearson correlation coefficient.
///
/// `None` when fewer than two pairs are given or either side is constant.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let mean_x = xs[..n].iter().sum::<f64>() / n as f64;
    let mean_y = ys[..n].iter().sum::<f64>() / n as f64;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in xs[..n].iter().zip(&ys[..n]) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Rows where both `a` and `b` hold finite numbers, as two aligned vectors.
fn paired_values(df: &DataFrame, a: &str, b: &str) -> PipelineResult<(Vec<f64>, Vec<f64>)> {
    let xs = df.column(a)?.cast(&DataType::Float64)?;
    let ys = df.column(b)?.cast(&DataType::Float64)?;
    Ok(xs
        .f64()?
        .into_iter()
        .zip(ys.f64()?.into_iter())
        .filter_map(|(x, y)| Some((x?, y?)))
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .unzip())
}

/// Correlates every pair of the requested columns that exist in `df`.
///
/// Each pair uses only rows where both cells are numeric.
pub fn correlation_matrix(df: &DataFrame, columns: &[&str]) -> PipelineResult<CorrelationMatrix> {
    let existing: Vec<String> = columns
        .iter()
        .filter(|c| has_column(df, c))
        .map(|c| c.to_string())
        .collect();

    let mut values = Vec::with_capacity(existing.len());
    for a in &existing {
        let mut row = Vec::with_capacity(existing.len());
        for b in &existing {
            let (xs, ys) = paired_values(df, a, b)?;
            row.push(pearson(&xs, &ys));
        }
        values.push(row);
    }

    Ok(CorrelationMatrix {
        columns: existing,
        values,
    })
}
