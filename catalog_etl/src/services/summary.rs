//! Fixed-format plain-text summary of the cleaned catalogs.

use std::path::Path;

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::statistics::{arg_max, mean, mode, value_counts};
use crate::core::{finite_values, require_columns};
use crate::error::{PipelineError, PipelineResult};
use crate::io::{TableExporter, MEDIA_TABLE, TRACKS_TABLE};
use crate::preprocessing::media::{COUNTRY, TYPE};
use crate::preprocessing::tracks::{ENERGY, POPULARITY};

/// Round to `digits` decimals the way Python's `round` does: on the exact
/// binary value, with ties to even.
///
/// # Examples
///
/// ```
/// use catalog_etl::services::summary::round_to;
///
/// assert_eq!(round_to(52.3666, 2), 52.37);
/// assert_eq!(round_to(50.125, 2), 50.12);
/// // 2.675 is stored just below the tie
/// assert_eq!(round_to(2.675, 2), 2.67);
/// ```
pub fn round_to(value: f64, digits: usize) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", digits, value).parse().unwrap_or(value)
}

/// Render a float the way Python's `str(float)` does for everyday values:
/// integral values keep one decimal (`52.0`), others use the shortest
/// representation that round-trips.
///
/// # Examples
///
/// ```
/// use catalog_etl::services::summary::format_decimal;
///
/// assert_eq!(format_decimal(52.0), "52.0");
/// assert_eq!(format_decimal(52.37), "52.37");
/// assert_eq!(format_decimal(0.5), "0.5");
/// ```
pub fn format_decimal(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{sign}inf")
    } else if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

/// Headline figures written to the summary file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub most_common_type: String,
    pub top_country: String,
    pub popularity_mean: f64,
    pub energy_mean: f64,
    pub media_output: String,
    pub tracks_output: String,
}

impl Summary {
    /// Compute the summary from the final frames.
    ///
    /// `media_output` and `tracks_output` are the file names reported on
    /// the last line.
    ///
    /// # Errors
    ///
    /// [`PipelineError::EmptyResultSet`] when a frame has no usable values
    /// for a figure.
    pub fn from_tables(
        media: &DataFrame,
        tracks: &DataFrame,
        media_output: &str,
        tracks_output: &str,
    ) -> PipelineResult<Self> {
        require_columns(media, MEDIA_TABLE, &[TYPE, COUNTRY])?;
        require_columns(tracks, TRACKS_TABLE, &[POPULARITY, ENERGY])?;

        let most_common_type = mode(&value_counts(media, TYPE)?)
            .map(str::to_string)
            .ok_or_else(|| PipelineError::empty(MEDIA_TABLE, "summary:type_mode"))?;

        let top_country = arg_max(&value_counts(media, COUNTRY)?)
            .map(str::to_string)
            .ok_or_else(|| PipelineError::empty(MEDIA_TABLE, "summary:top_country"))?;

        let popularity_mean = mean(&finite_values(tracks, POPULARITY)?)
            .ok_or_else(|| PipelineError::empty(TRACKS_TABLE, "summary:popularity_mean"))?;
        let energy_mean = mean(&finite_values(tracks, ENERGY)?)
            .ok_or_else(|| PipelineError::empty(TRACKS_TABLE, "summary:energy_mean"))?;

        Ok(Self {
            most_common_type,
            top_country,
            popularity_mean,
            energy_mean,
            media_output: media_output.to_string(),
            tracks_output: tracks_output.to_string(),
        })
    }

    /// The summary file contents: four labeled lines and a trailing note.
    pub fn render(&self) -> String {
        format!(
            "Netflix Most Common Type: {}\n\
             Top Country: {}\n\
             Spotify Popularity Mean: {}\n\
             Spotify Energy Mean: {}\n\
             Cleaned datasets saved as {} and {}\n",
            self.most_common_type,
            self.top_country,
            format_decimal(round_to(self.popularity_mean, 2)),
            format_decimal(round_to(self.energy_mean, 2)),
            self.media_output,
            self.tracks_output,
        )
    }

    pub fn write_to(&self, path: &Path) -> PipelineResult<()> {
        TableExporter::write_text(&self.render(), path)
    }
}
