//! Cleaning and field derivation for the music-track catalog.

use polars::prelude::*;

use crate::core::{has_column, require_columns};
use crate::error::PipelineResult;
use crate::io::TRACKS_TABLE;
use crate::preprocessing::stages::StageLog;
use crate::transformations::{coerce_numeric, drop_any_missing, filter_below, remove_duplicates};

pub const POPULARITY: &str = "popularity";
pub const ENERGY: &str = "energy";
pub const DANCEABILITY: &str = "danceability";
pub const VALENCE: &str = "valence";
pub const DURATION_MS: &str = "duration_ms";
pub const GENRE: &str = "genre";

pub const DURATION_MIN: &str = "duration_min";
pub const POPULARITY_BAND: &str = "popularity_band";
pub const ENERGY_BAND: &str = "energy_band";

pub const REQUIRED_COLUMNS: [&str; 3] = [POPULARITY, ENERGY, DURATION_MS];

/// Audio features read as numbers when present
pub const NUMERIC_FEATURES: [&str; 5] = [POPULARITY, ENERGY, DANCEABILITY, VALENCE, DURATION_MS];

/// Tracks must be strictly shorter than this many minutes
pub const MAX_DURATION_MIN: f64 = 15.0;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Cleans the track frame and derives `duration_min`.
#[derive(Debug, Clone, Default)]
pub struct TrackCleaner;

impl TrackCleaner {
    pub fn new() -> Self {
        Self
    }

    /// Run every cleaning and derivation step, in order.
    pub fn clean(&self, df: DataFrame) -> PipelineResult<(DataFrame, StageLog)> {
        require_columns(&df, TRACKS_TABLE, &REQUIRED_COLUMNS)?;
        let mut stages = StageLog::new();

        let mut df = df;
        for column in NUMERIC_FEATURES {
            if !has_column(&df, column) {
                continue;
            }
            let (coerced, failures) = coerce_numeric(df, column)?;
            if failures > 0 {
                log::warn!(
                    "{} '{}' cells in '{}' are not numeric; treating them as missing",
                    failures,
                    column,
                    TRACKS_TABLE
                );
            }
            df = coerced;
        }

        let before = df.height();
        let df = drop_any_missing(&df)?;
        stages.record(TRACKS_TABLE, "drop_any_missing", before, df.height());

        let before = df.height();
        let df = remove_duplicates(&df)?;
        stages.record(TRACKS_TABLE, "deduplicate", before, df.height());

        let df = df
            .lazy()
            .with_column(
                (col(DURATION_MS).cast(DataType::Float64) / lit(MS_PER_MINUTE)).alias(DURATION_MIN),
            )
            .collect()?;

        let before = df.height();
        let df = filter_below(df, DURATION_MIN, MAX_DURATION_MIN)?;
        stages.record(TRACKS_TABLE, "duration_below_15_min", before, df.height());

        Ok((df, stages))
    }
}
