use std::path::Path;

use polars::prelude::*;

use crate::error::PipelineResult;
use crate::parsing::csv_parser;

/// Name of the media catalog in logs, stage records and errors
pub const MEDIA_TABLE: &str = "media";

/// Name of the track catalog in logs, stage records and errors
pub const TRACKS_TABLE: &str = "tracks";

/// Result of loading both catalogs
#[derive(Debug, Clone)]
pub struct CatalogLoadResult {
    pub media: DataFrame,
    pub tracks: DataFrame,
}

/// Unified interface for loading the media and track catalogs
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load both catalogs; fails on the first missing or malformed file
    pub fn load(media_path: &Path, tracks_path: &Path) -> PipelineResult<CatalogLoadResult> {
        let media = Self::load_media(media_path)?;
        let tracks = Self::load_tracks(tracks_path)?;
        Ok(CatalogLoadResult { media, tracks })
    }

    /// Load the media catalog from a CSV file
    pub fn load_media(path: &Path) -> PipelineResult<DataFrame> {
        Self::load_table(path, MEDIA_TABLE)
    }

    /// Load the track catalog from a CSV file
    pub fn load_tracks(path: &Path) -> PipelineResult<DataFrame> {
        Self::load_table(path, TRACKS_TABLE)
    }

    fn load_table(path: &Path, name: &str) -> PipelineResult<DataFrame> {
        let df = csv_parser::parse_csv(path)?;
        log::info!(
            "Loaded {} rows x {} columns into '{}' from {}",
            df.height(),
            df.width(),
            name,
            path.display()
        );
        Ok(df)
    }
}
