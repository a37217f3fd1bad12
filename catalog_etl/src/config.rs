//! Pipeline configuration file support.
//!
//! Reads file locations from an optional TOML file. Every key has a
//! default, so a missing file or a partial one both work.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};

/// File name searched for by [`PipelineConfig::from_default_location`]
pub const CONFIG_FILE_NAME: &str = "catalog_etl.toml";

/// Pipeline configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub inputs: InputSettings,
    #[serde(default)]
    pub outputs: OutputSettings,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

/// Source file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    #[serde(default = "default_media_input")]
    pub media: PathBuf,
    #[serde(default = "default_tracks_input")]
    pub tracks: PathBuf,
}

/// Destination file locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_media_output")]
    pub media: PathBuf,
    #[serde(default = "default_tracks_output")]
    pub tracks: PathBuf,
    #[serde(default = "default_summary_output")]
    pub summary: PathBuf,
}

/// Processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Year `content_age` is measured from; the current local year when unset.
    #[serde(default)]
    pub reference_year: Option<i32>,
}

fn default_media_input() -> PathBuf {
    PathBuf::from("netflix_titles.csv")
}

fn default_tracks_input() -> PathBuf {
    PathBuf::from("data.csv")
}

fn default_media_output() -> PathBuf {
    PathBuf::from("cleaned_netflix.csv")
}

fn default_tracks_output() -> PathBuf {
    PathBuf::from("cleaned_spotify.csv")
}

fn default_summary_output() -> PathBuf {
    PathBuf::from("charts/summary.txt")
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            media: default_media_input(),
            tracks: default_tracks_input(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            media: default_media_output(),
            tracks: default_tracks_output(),
            summary: default_summary_output(),
        }
    }
}

impl PipelineConfig {
    /// Load pipeline configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` if successful
    /// * `Err(PipelineError::Config)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> PipelineResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            PipelineError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse pipeline configuration from TOML text.
    pub fn from_toml_str(content: &str) -> PipelineResult<Self> {
        toml::from_str(content)
            .map_err(|e| PipelineError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Load configuration from the default location, falling back to defaults.
    ///
    /// Searches for `catalog_etl.toml` in:
    /// 1. Current directory
    /// 2. `catalog_etl/` directory
    pub fn from_default_location() -> PipelineResult<Self> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("catalog_etl").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
        }

        log::info!("No {} found; using built-in defaults", CONFIG_FILE_NAME);
        Ok(Self::default())
    }

    /// Reference year for `content_age`, defaulting to the current local year.
    pub fn reference_year(&self) -> i32 {
        use chrono::Datelike;
        self.pipeline
            .reference_year
            .unwrap_or_else(|| chrono::Local::now().year())
    }
}
