use std::path::Path;

use polars::prelude::*;

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::io::{CatalogLoader, TableExporter, MEDIA_TABLE, TRACKS_TABLE};
use crate::preprocessing::media::{MediaCleaner, CONTENT_AGE};
use crate::preprocessing::stages::StageLog;
use crate::preprocessing::tracks::{
    TrackCleaner, DURATION_MIN, ENERGY, ENERGY_BAND, POPULARITY, POPULARITY_BAND,
};
use crate::services::{ConsoleReport, Summary};
use crate::transformations::{add_band_column, filter_iqr_outliers, AppliedFilter, Bins};

/// Both catalogs after cleaning, filtering and banding
#[derive(Debug, Clone)]
pub struct ProcessedCatalog {
    pub media: DataFrame,
    pub tracks: DataFrame,
    pub stages: StageLog,
    pub filters: Vec<AppliedFilter>,
}

/// Result of a full pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub catalog: ProcessedCatalog,
    pub summary: Summary,
    pub report: ConsoleReport,
}

/// Clean, filter and band both catalogs.
///
/// Steps run in a fixed order: media cleaning, track cleaning, then IQR
/// filters on `tracks.popularity`, `tracks.duration_min` and
/// `media.content_age`, each computing its quartiles on the frame left by
/// the previous step. Bands are assigned last.
pub fn process(
    media: DataFrame,
    tracks: DataFrame,
    reference_year: i32,
) -> PipelineResult<ProcessedCatalog> {
    let mut stages = StageLog::new();
    let mut filters = Vec::new();

    let (media, media_stages) = MediaCleaner::new(reference_year).clean(media)?;
    stages.extend(media_stages);

    let (tracks, track_stages) = TrackCleaner::new().clean(tracks)?;
    stages.extend(track_stages);

    let tracks = apply_iqr(tracks, TRACKS_TABLE, POPULARITY, &mut stages, &mut filters)?;
    let tracks = apply_iqr(tracks, TRACKS_TABLE, DURATION_MIN, &mut stages, &mut filters)?;
    let media = apply_iqr(media, MEDIA_TABLE, CONTENT_AGE, &mut stages, &mut filters)?;

    let tracks = add_band_column(tracks, POPULARITY, POPULARITY_BAND, &Bins::popularity())?;
    let tracks = add_band_column(tracks, ENERGY, ENERGY_BAND, &Bins::energy())?;

    Ok(ProcessedCatalog {
        media,
        tracks,
        stages,
        filters,
    })
}

fn apply_iqr(
    df: DataFrame,
    table: &str,
    column: &str,
    stages: &mut StageLog,
    filters: &mut Vec<AppliedFilter>,
) -> PipelineResult<DataFrame> {
    let before = df.height();
    let (df, fences) = filter_iqr_outliers(df, table, column)?;
    let after = df.height();

    stages.record(table, &format!("iqr:{column}"), before, after);
    filters.push(AppliedFilter {
        table: table.to_string(),
        column: column.to_string(),
        fences,
        before,
        after,
    });
    Ok(df)
}

/// File name shown in the summary for an output path.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load → clean → filter → band → summarize → export.
pub struct CatalogPipeline {
    config: PipelineConfig,
}

impl CatalogPipeline {
    /// Create a pipeline with default file locations
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the whole batch once.
    ///
    /// Both cleaned tables and the summary file are fully overwritten.
    /// Nothing is written unless every step before export succeeded.
    pub fn run(&self) -> PipelineResult<PipelineOutcome> {
        let inputs = &self.config.inputs;
        let outputs = &self.config.outputs;

        // Step 1: Load both catalogs
        let loaded = CatalogLoader::load(&inputs.media, &inputs.tracks)?;

        // Step 2: Clean, filter and band
        let catalog = process(loaded.media, loaded.tracks, self.config.reference_year())?;

        // Step 3: Statistics
        let summary = Summary::from_tables(
            &catalog.media,
            &catalog.tracks,
            &display_name(&outputs.media),
            &display_name(&outputs.tracks),
        )?;
        let report = ConsoleReport::build(&catalog.media, &catalog.tracks, &catalog.filters)?;

        // Step 4: Export
        TableExporter::write_csv(&catalog.media, MEDIA_TABLE, &outputs.media)?;
        TableExporter::write_csv(&catalog.tracks, TRACKS_TABLE, &outputs.tracks)?;
        summary.write_to(&outputs.summary)?;

        log::info!(
            "Wrote {} media rows to {}, {} track rows to {}, summary to {}",
            catalog.media.height(),
            outputs.media.display(),
            catalog.tracks.height(),
            outputs.tracks.display(),
            outputs.summary.display()
        );

        Ok(PipelineOutcome {
            catalog,
            summary,
            report,
        })
    }
}

impl Default for CatalogPipeline {
    fn default() -> Self {
        Self::new()
    }
}
