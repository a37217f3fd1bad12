//! End-to-end tests for the catalog pipeline.
//!
//! These tests ensure that:
//! 1. Cleaned media rows keep every required field and the summary reflects them
//! 2. Tracks of 15 minutes or more never reach the output
//! 3. Re-running on cleaned output removes no further duplicates
//! 4. Missing or malformed inputs abort the run before anything is written

use std::fs;
use std::path::{Path, PathBuf};

use catalog_etl::config::{InputSettings, OutputSettings, PipelineSettings};
use catalog_etl::parsing::parse_csv;
use catalog_etl::preprocessing::tracks::{DURATION_MIN, POPULARITY, POPULARITY_BAND};
use catalog_etl::{CatalogPipeline, PipelineConfig, PipelineError};
use polars::prelude::*;
use tempfile::TempDir;

// ==================== Helper Functions ====================

const MEDIA_CSV: &str = "show_id,type,title,country,date_added,release_year,duration
s1,Movie,Alpha,India,\"September 25, 2021\",2020,90 min
s2,Movie,Beta,\"India, Nepal\",,2019,100 min
s3,TV Show,Gamma,United States,2021-06-01,2021,2 Seasons
s4,,Delta,France,,2020,95 min
s5,Movie,Epsilon,,,2020,1 Season
";

const TRACKS_CSV: &str = "popularity,energy,danceability,valence,duration_ms,genre
50,0.5,0.6,0.4,60000,pop
60,0.7,0.8,0.9,120000,rock
70,0.9,0.5,0.2,2000000,ambient
";

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn config(media: PathBuf, tracks: PathBuf, out: &Path) -> PipelineConfig {
    PipelineConfig {
        inputs: InputSettings { media, tracks },
        outputs: OutputSettings {
            media: out.join("cleaned_netflix.csv"),
            tracks: out.join("cleaned_spotify.csv"),
            summary: out.join("charts").join("summary.txt"),
        },
        pipeline: PipelineSettings {
            reference_year: Some(2024),
        },
    }
}

fn text(df: &DataFrame, column: &str, row: usize) -> Option<String> {
    let values = df.column(column).unwrap().cast(&DataType::String).unwrap();
    values.str().unwrap().get(row).map(str::to_string)
}

fn numbers(df: &DataFrame, column: &str) -> Vec<Option<f64>> {
    let values = df.column(column).unwrap().cast(&DataType::Float64).unwrap();
    values.f64().unwrap().into_iter().collect()
}

fn setup() -> (TempDir, PipelineConfig) {
    let dir = TempDir::new().unwrap();
    let media = write(dir.path(), "netflix_titles.csv", MEDIA_CSV);
    let tracks = write(dir.path(), "data.csv", TRACKS_CSV);
    let out = dir.path().join("out");
    let config = config(media, tracks, &out);
    (dir, config)
}

// ==================== End-to-end ====================

#[test]
fn test_media_row_missing_type_is_dropped() {
    let (_dir, config) = setup();
    let outcome = CatalogPipeline::with_config(config.clone()).run().unwrap();

    let media = parse_csv(&config.outputs.media).unwrap();
    assert_eq!(media.height(), 4);
    assert_eq!(outcome.catalog.media.height(), 4);
    for column in ["title", "type", "release_year"] {
        assert_eq!(media.column(column).unwrap().null_count(), 0, "missing {}", column);
    }

    let summary = fs::read_to_string(&config.outputs.summary).unwrap();
    let first_line = summary.lines().next().unwrap();
    assert_eq!(first_line, "Netflix Most Common Type: Movie");
}

#[test]
fn test_summary_file_format() {
    let (_dir, config) = setup();
    CatalogPipeline::with_config(config.clone()).run().unwrap();

    let summary = fs::read_to_string(&config.outputs.summary).unwrap();
    assert_eq!(
        summary,
        "Netflix Most Common Type: Movie\n\
         Top Country: India\n\
         Spotify Popularity Mean: 55.0\n\
         Spotify Energy Mean: 0.6\n\
         Cleaned datasets saved as cleaned_netflix.csv and cleaned_spotify.csv\n"
    );
}

#[test]
fn test_long_track_is_dropped() {
    let (_dir, config) = setup();
    let outcome = CatalogPipeline::with_config(config.clone()).run().unwrap();

    let tracks = parse_csv(&config.outputs.tracks).unwrap();
    assert_eq!(tracks.height(), 2);
    assert!(numbers(&tracks, DURATION_MIN).into_iter().all(|m| m.unwrap() < 15.0));

    let step = outcome
        .catalog
        .stages
        .find("tracks", "duration_below_15_min")
        .unwrap();
    assert_eq!((step.before, step.after), (3, 2));
}

#[test]
fn test_exported_columns_include_derived_fields() {
    let (_dir, config) = setup();
    CatalogPipeline::with_config(config.clone()).run().unwrap();

    let media = parse_csv(&config.outputs.media).unwrap();
    for column in ["content_age", "added_year", "duration_int", "duration_type"] {
        assert!(media.column(column).is_ok(), "missing {}", column);
    }
    assert_eq!(text(&media, "date_added", 0).as_deref(), Some("2021-09-25"));
    assert_eq!(text(&media, "country", 1).as_deref(), Some("India"));
    assert_eq!(text(&media, "country", 3).as_deref(), Some("Unknown"));

    let tracks = parse_csv(&config.outputs.tracks).unwrap();
    for column in ["duration_min", "popularity_band", "energy_band"] {
        assert!(tracks.column(column).is_ok(), "missing {}", column);
    }
    assert_eq!(numbers(&tracks, POPULARITY)[0], Some(50.0));
    assert_eq!(text(&tracks, POPULARITY_BAND, 0).as_deref(), Some("Medium"));
}

#[test]
fn test_rerun_on_cleaned_output_removes_no_duplicates() {
    let (dir, first) = setup();
    CatalogPipeline::with_config(first.clone()).run().unwrap();

    let second_out = dir.path().join("second");
    let second = config(
        first.outputs.media.clone(),
        first.outputs.tracks.clone(),
        &second_out,
    );
    let outcome = CatalogPipeline::with_config(second).run().unwrap();

    for table in ["media", "tracks"] {
        let dedup = outcome.catalog.stages.find(table, "deduplicate").unwrap();
        assert_eq!(dedup.removed(), 0, "{} lost rows to deduplication", table);
    }
    assert_eq!(outcome.catalog.media.height(), 4);
    assert_eq!(outcome.catalog.tracks.height(), 2);
}

#[test]
fn test_outputs_are_overwritten() {
    let (_dir, config) = setup();
    fs::create_dir_all(config.outputs.summary.parent().unwrap()).unwrap();
    fs::write(&config.outputs.summary, "stale\nstale\nstale\nstale\nstale\nstale\nstale\n").unwrap();

    CatalogPipeline::with_config(config.clone()).run().unwrap();

    let summary = fs::read_to_string(&config.outputs.summary).unwrap();
    assert_eq!(summary.lines().count(), 5);
    assert!(!summary.contains("stale"));
}

// ==================== Failures ====================

#[test]
fn test_missing_input_aborts_run() {
    let (dir, mut config) = setup();
    config.inputs.tracks = dir.path().join("absent.csv");

    let err = CatalogPipeline::with_config(config.clone()).run().unwrap_err();
    assert!(matches!(err, PipelineError::InputNotFound { .. }));
    assert!(!config.outputs.media.exists());
    assert!(!config.outputs.summary.exists());
}

#[test]
fn test_malformed_row_aborts_run() {
    let (dir, mut config) = setup();
    config.inputs.media = write(
        dir.path(),
        "broken.csv",
        "title,type,release_year\nA,Movie,2001\nB,Movie,2002,extra\n",
    );

    let err = CatalogPipeline::with_config(config.clone()).run().unwrap_err();
    assert!(matches!(err, PipelineError::Parse { .. }));
    assert!(!config.outputs.tracks.exists());
}

#[test]
fn test_all_tracks_filtered_fails_loudly() {
    let (dir, mut config) = setup();
    config.inputs.tracks = write(
        dir.path(),
        "long.csv",
        "popularity,energy,duration_ms\n50,0.5,1000000\n60,0.6,2000000\n",
    );

    let err = CatalogPipeline::with_config(config).run().unwrap_err();
    assert!(matches!(err, PipelineError::EmptyResultSet { .. }));
}

#[test]
fn test_popularity_mean_tie_rounds_to_even() {
    let (dir, mut config) = setup();
    let mut tracks = String::from("popularity,energy,duration_ms\n");
    for (popularity, duration_ms) in [
        (48, 180000),
        (49, 181000),
        (50, 182000),
        (50, 183000),
        (50, 184000),
        (51, 185000),
        (51, 186000),
        (52, 187000),
    ] {
        tracks.push_str(&format!("{},0.5,{}\n", popularity, duration_ms));
    }
    config.inputs.tracks = write(dir.path(), "ties.csv", &tracks);

    let outcome = CatalogPipeline::with_config(config.clone()).run().unwrap();
    assert_eq!(outcome.catalog.tracks.height(), 8);

    // mean is exactly 50.125
    let summary = fs::read_to_string(&config.outputs.summary).unwrap();
    assert!(
        summary.contains("Spotify Popularity Mean: 50.12\n"),
        "unexpected summary:\n{}",
        summary
    );
}
