//! Human-readable report of distributions and statistics, printed at the
//! end of a run.

use std::fmt;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::correlation::{correlation_matrix, CorrelationMatrix};
use crate::algorithms::statistics::{describe, value_counts, Describe};
use crate::core::{finite_values, has_column};
use crate::error::PipelineResult;
use crate::preprocessing::media::{CONTENT_AGE, COUNTRY, RELEASE_YEAR, TYPE};
use crate::preprocessing::tracks::{
    DANCEABILITY, DURATION_MIN, ENERGY, GENRE, POPULARITY, VALENCE,
};
use crate::transformations::filtering::AppliedFilter;

/// Track features correlated in the report
pub const CORRELATION_FEATURES: [&str; 5] = [POPULARITY, ENERGY, DURATION_MIN, DANCEABILITY, VALENCE];

/// The `n` most frequent values of a column, most frequent first.
pub fn top_values(df: &DataFrame, column: &str, n: usize) -> PipelineResult<Vec<(String, usize)>> {
    let mut counts = value_counts(df, column)?;
    counts.truncate(n);
    Ok(counts)
}

/// Number of rows per integer value of `column`, ascending by value.
pub fn year_counts(df: &DataFrame, column: &str) -> PipelineResult<Vec<(i64, usize)>> {
    let counts = df
        .clone()
        .lazy()
        .select([col(column).cast(DataType::Int64)])
        .filter(col(column).is_not_null())
        .group_by([col(column)])
        .agg([len().alias("count")])
        .sort([column], SortMultipleOptions::default())
        .collect()?;

    let years = counts.column(column)?.i64()?;
    let tallies = counts.column("count")?.cast(&DataType::UInt64)?;
    Ok(years
        .into_iter()
        .zip(tallies.u64()?.into_iter())
        .filter_map(|(year, count)| Some((year?, count? as usize)))
        .collect())
}

/// One titled block of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub lines: Vec<String>,
}

impl ReportSection {
    fn counts(title: &str, counts: &[(String, usize)]) -> Self {
        Self {
            title: title.to_string(),
            lines: counts
                .iter()
                .map(|(label, count)| format!("{:<24} {}", label, count))
                .collect(),
        }
    }

    fn describe(title: &str, stats: Option<Describe>) -> Self {
        let lines = match stats {
            None => vec!["(no values)".to_string()],
            Some(s) => vec![
                format!("count {:>12}", s.count),
                format!("mean  {:>12.4}", s.mean),
                match s.std {
                    Some(std) => format!("std   {:>12.4}", std),
                    None => format!("std   {:>12}", "NaN"),
                },
                format!("min   {:>12.4}", s.min),
                format!("25%   {:>12.4}", s.q25),
                format!("50%   {:>12.4}", s.median),
                format!("75%   {:>12.4}", s.q75),
                format!("max   {:>12.4}", s.max),
            ],
        };
        Self {
            title: title.to_string(),
            lines,
        }
    }

    fn correlation(title: &str, matrix: &CorrelationMatrix) -> Self {
        let mut lines = vec![format!(
            "{:<14}{}",
            "",
            matrix
                .columns
                .iter()
                .map(|c| format!("{:>14}", c))
                .collect::<String>()
        )];
        for (name, row) in matrix.columns.iter().zip(&matrix.values) {
            let cells: String = row
                .iter()
                .map(|v| match v {
                    Some(r) => format!("{:>14.3}", r),
                    None => format!("{:>14}", "NaN"),
                })
                .collect();
            lines.push(format!("{:<14}{}", name, cells));
        }
        Self {
            title: title.to_string(),
            lines,
        }
    }
}

/// Distributions and statistics of both cleaned catalogs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleReport {
    pub sections: Vec<ReportSection>,
}

impl ConsoleReport {
    pub fn build(
        media: &DataFrame,
        tracks: &DataFrame,
        filters: &[AppliedFilter],
    ) -> PipelineResult<Self> {
        let mut sections = vec![
            ReportSection::counts("Netflix Type Distribution", &value_counts(media, TYPE)?),
            ReportSection::counts("Top 5 Netflix Countries", &top_values(media, COUNTRY, 5)?),
            ReportSection::describe(
                "Netflix Content Age Stats",
                describe(&finite_values(media, CONTENT_AGE)?),
            ),
            ReportSection {
                title: "Netflix Titles by Release Year".to_string(),
                lines: year_counts(media, RELEASE_YEAR)?
                    .into_iter()
                    .map(|(year, count)| format!("{:<24} {}", year, count))
                    .collect(),
            },
            ReportSection::describe(
                "Spotify Track Popularity Stats",
                describe(&finite_values(tracks, POPULARITY)?),
            ),
            ReportSection::describe(
                "Spotify Track Duration (min)",
                describe(&finite_values(tracks, DURATION_MIN)?),
            ),
        ];

        if has_column(tracks, GENRE) {
            sections.push(ReportSection::counts(
                "Top 10 Spotify Genres",
                &top_values(tracks, GENRE, 10)?,
            ));
        }

        sections.push(ReportSection::correlation(
            "Spotify Track Feature Correlation",
            &correlation_matrix(tracks, &CORRELATION_FEATURES)?,
        ));

        sections.push(ReportSection {
            title: "Outliers Removed (IQR)".to_string(),
            lines: filters
                .iter()
                .map(|f| {
                    format!(
                        "{}.{}: kept [{:.4}, {:.4}], {} -> {} rows",
                        f.table, f.column, f.fences.lower, f.fences.upper, f.before, f.after
                    )
                })
                .collect(),
        });

        Ok(Self { sections })
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

impl fmt::Display for ConsoleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}:", section.title)?;
            for line in &section.lines {
                writeln!(f, "  {}", line)?;
            }
        }
        Ok(())
    }
}
