//! Cleaning and field derivation for the media catalog.
//!
//! Missing values are handled per field: rows missing `title`, `type` or
//! `release_year` are dropped, `country` and `duration` are filled with
//! sentinels, unparseable `date_added` cells become missing.

use chrono::Datelike;
use polars::prelude::*;

use crate::core::{has_column, map_text, require_columns};
use crate::error::PipelineResult;
use crate::io::MEDIA_TABLE;
use crate::parsing::dates::{format_date, parse_date};
use crate::parsing::text::{first_component, title_case, DIGIT_RUN, LETTER_RUN};
use crate::preprocessing::stages::StageLog;
use crate::transformations::{drop_missing, remove_duplicates};

pub const TITLE: &str = "title";
pub const TYPE: &str = "type";
pub const RELEASE_YEAR: &str = "release_year";
pub const DATE_ADDED: &str = "date_added";
pub const COUNTRY: &str = "country";
pub const DURATION: &str = "duration";

pub const CONTENT_AGE: &str = "content_age";
pub const ADDED_YEAR: &str = "added_year";
pub const DURATION_INT: &str = "duration_int";
pub const DURATION_TYPE: &str = "duration_type";

/// Columns whose absence makes a row unusable
pub const REQUIRED_COLUMNS: [&str; 3] = [TITLE, TYPE, RELEASE_YEAR];

/// Country used when the cell is missing
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Duration used when the cell is missing
pub const UNKNOWN_DURATION: &str = "0 Unknown";

/// Unit words rewritten after title casing
const DURATION_UNITS: &[(&str, &str)] = &[("Min", "Minutes"), ("Season", "Seasons")];

/// Normalize the unit word extracted from a duration string.
///
/// # Examples
///
/// ```
/// use catalog_etl::preprocessing::media::duration_unit;
///
/// assert_eq!(duration_unit("min"), "Minutes");
/// assert_eq!(duration_unit("Season"), "Seasons");
/// assert_eq!(duration_unit("Seasons"), "Seasons");
/// assert_eq!(duration_unit("Unknown"), "Unknown");
/// ```
pub fn duration_unit(word: &str) -> String {
    let word = title_case(word);
    DURATION_UNITS
        .iter()
        .find(|(from, _)| *from == word)
        .map(|(_, to)| to.to_string())
        .unwrap_or(word)
}

/// Primary country: title-cased, first comma-separated entry, `Unknown` when missing.
pub fn primary_country(raw: Option<&str>) -> String {
    let raw = raw.unwrap_or(UNKNOWN_COUNTRY);
    first_component(&title_case(raw)).to_string()
}

/// Cleans the media frame and derives its analysis fields.
#[derive(Debug, Clone)]
pub struct MediaCleaner {
    reference_year: i32,
}

impl MediaCleaner {
    /// `reference_year` is the year `content_age` is measured from.
    pub fn new(reference_year: i32) -> Self {
        Self { reference_year }
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    /// Run every cleaning and derivation step, in order.
    pub fn clean(&self, df: DataFrame) -> PipelineResult<(DataFrame, StageLog)> {
        require_columns(&df, MEDIA_TABLE, &REQUIRED_COLUMNS)?;
        let mut stages = StageLog::new();

        let df = Self::ensure_optional_columns(df)?;

        let before = df.height();
        let df = drop_missing(&df, &REQUIRED_COLUMNS)?;
        stages.record(MEDIA_TABLE, "drop_missing_required", before, df.height());

        let before = df.height();
        let df = remove_duplicates(&df)?;
        stages.record(MEDIA_TABLE, "deduplicate", before, df.height());

        let before = df.height();
        let df = self.coerce_release_year(df)?;
        stages.record(MEDIA_TABLE, "coerce_release_year", before, df.height());

        let df = Self::parse_date_added(df)?;
        let df = map_text(df, COUNTRY, |raw| Some(primary_country(raw)))?;
        let df = map_text(df, TYPE, |raw| raw.map(|t| title_case(t.trim())))?;
        let df = map_text(df, DURATION, |raw| {
            Some(raw.unwrap_or(UNKNOWN_DURATION).to_string())
        })?;

        Ok((self.derive(df)?, stages))
    }

    fn ensure_optional_columns(mut df: DataFrame) -> PipelineResult<DataFrame> {
        for column in [DATE_ADDED, COUNTRY, DURATION] {
            if !has_column(&df, column) {
                log::warn!(
                    "Table '{}' has no '{}' column; treating it as missing",
                    MEDIA_TABLE,
                    column
                );
                let height = df.height();
                df.with_column(Series::full_null(column.into(), height, &DataType::String))?;
            }
        }
        Ok(df)
    }

    /// Integer release years; rows whose year is unusable are dropped.
    ///
    /// A year is unusable when it cannot be read as an integer or when
    /// `reference_year - year` does not fit in an `i64`.
    fn coerce_release_year(&self, mut df: DataFrame) -> PipelineResult<DataFrame> {
        let reference_year = i64::from(self.reference_year);
        let years = df.column(RELEASE_YEAR)?.cast(&DataType::Int64)?;
        let usable: Vec<Option<i64>> = years
            .i64()?
            .into_iter()
            .map(|year| year.filter(|y| reference_year.checked_sub(*y).is_some()))
            .collect();
        df.with_column(Series::new(RELEASE_YEAR.into(), usable))?;

        let before = df.height();
        let df = drop_missing(&df, &[RELEASE_YEAR])?;
        if df.height() < before {
            log::warn!(
                "Dropped {} rows whose release_year is not a usable integer",
                before - df.height()
            );
        }
        Ok(df)
    }

    fn parse_date_added(df: DataFrame) -> PipelineResult<DataFrame> {
        let mut unparseable = 0usize;
        let df = map_text(df, DATE_ADDED, |raw| {
            let parsed = parse_date(raw?).map(format_date);
            if parsed.is_none() {
                unparseable += 1;
            }
            parsed
        })?;
        if unparseable > 0 {
            log::warn!("{} date_added cells could not be parsed", unparseable);
        }
        Ok(df)
    }

    fn derive(&self, df: DataFrame) -> PipelineResult<DataFrame> {
        let reference_year = i64::from(self.reference_year);

        let mut df = df
            .lazy()
            .with_columns([
                col(DURATION)
                    .str()
                    .extract(lit(DIGIT_RUN), 1)
                    .cast(DataType::Int64)
                    .alias(DURATION_INT),
                col(DURATION)
                    .str()
                    .extract(lit(LETTER_RUN), 1)
                    .alias(DURATION_TYPE),
            ])
            .collect()?;

        let ages: Vec<Option<i64>> = df
            .column(RELEASE_YEAR)?
            .i64()?
            .into_iter()
            .map(|year| year.and_then(|y| reference_year.checked_sub(y)))
            .collect();
        let added: Vec<Option<i64>> = df
            .column(DATE_ADDED)?
            .str()?
            .into_iter()
            .map(|date| date.and_then(parse_date).map(|d| i64::from(d.year())))
            .collect();
        df.with_column(Series::new(CONTENT_AGE.into(), ages))?;
        df.with_column(Series::new(ADDED_YEAR.into(), added))?;

        map_text(df, DURATION_TYPE, |word| word.map(duration_unit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_csv_str;

    const MEDIA_CSV: &str = "show_id,type,title,country,date_added,release_year,duration\n\
s1, movie ,Dick Johnson Is Dead,united states,\"September 25, 2021\",2020,90 min\n\
s2,TV Show,Blood & Water,\"South Africa, India\",not a date,2021,2 Seasons\n\
s3,TV Show,Ganglands,,\"September 24, 2021\",2021,1 Season\n\
s4,Movie,,India,,2019,\n\
s5,Movie,Sankofa,,,1993,\n";

    fn cleaned() -> (DataFrame, StageLog) {
        let df = parse_csv_str(MEDIA_CSV).unwrap();
        MediaCleaner::new(2024).clean(df).unwrap()
    }

    fn text(df: &DataFrame, column: &str, row: usize) -> Option<String> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .get(row)
            .map(str::to_string)
    }

    fn int(df: &DataFrame, column: &str, row: usize) -> Option<i64> {
        df.column(column).unwrap().i64().unwrap().get(row)
    }

    #[test]
    fn test_drops_rows_missing_required_fields() {
        let (df, stages) = cleaned();
        assert_eq!(df.height(), 4);
        assert_eq!(stages.find("media", "drop_missing_required").unwrap().removed(), 1);
        for column in REQUIRED_COLUMNS {
            assert_eq!(df.column(column).unwrap().null_count(), 0);
        }
    }

    #[test]
    fn test_normalizes_type_and_country() {
        let (df, _) = cleaned();
        assert_eq!(text(&df, TYPE, 0).as_deref(), Some("Movie"));
        assert_eq!(text(&df, TYPE, 1).as_deref(), Some("Tv Show"));
        assert_eq!(text(&df, COUNTRY, 0).as_deref(), Some("United States"));
        assert_eq!(text(&df, COUNTRY, 1).as_deref(), Some("South Africa"));
        assert_eq!(text(&df, COUNTRY, 2).as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_dates_and_derived_years() {
        let (df, _) = cleaned();
        assert_eq!(text(&df, DATE_ADDED, 0).as_deref(), Some("2021-09-25"));
        assert_eq!(text(&df, DATE_ADDED, 1), None);
        assert_eq!(int(&df, ADDED_YEAR, 0), Some(2021));
        assert_eq!(int(&df, ADDED_YEAR, 1), None);
        assert_eq!(int(&df, CONTENT_AGE, 0), Some(4));
        assert_eq!(int(&df, CONTENT_AGE, 3), Some(31));
    }

    #[test]
    fn test_duration_fields() {
        let (df, _) = cleaned();
        assert_eq!(int(&df, DURATION_INT, 0), Some(90));
        assert_eq!(text(&df, DURATION_TYPE, 0).as_deref(), Some("Minutes"));
        assert_eq!(text(&df, DURATION_TYPE, 1).as_deref(), Some("Seasons"));
        assert_eq!(text(&df, DURATION_TYPE, 2).as_deref(), Some("Seasons"));
        assert_eq!(text(&df, DURATION, 3).as_deref(), Some("0 Unknown"));
        assert_eq!(int(&df, DURATION_INT, 3), Some(0));
        assert_eq!(text(&df, DURATION_TYPE, 3).as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_duration_int_matches_ascii_digits_only() {
        let df = df!(
            TITLE => ["A", "B"],
            TYPE => ["TV Show", "Movie"],
            RELEASE_YEAR => [2020i64, 2021],
            DURATION => ["٣ Seasons", "min 45"],
        )
        .unwrap();

        let (cleaned, _) = MediaCleaner::new(2024).clean(df).unwrap();
        assert_eq!(int(&cleaned, DURATION_INT, 0), None);
        assert_eq!(text(&cleaned, DURATION_TYPE, 0).as_deref(), Some("Seasons"));
        assert_eq!(int(&cleaned, DURATION_INT, 1), Some(45));
        assert_eq!(text(&cleaned, DURATION_TYPE, 1).as_deref(), Some("Minutes"));
    }

    #[test]
    fn test_unparseable_release_year_drops_row() {
        let df = parse_csv_str("title,type,release_year\nA,Movie,2001\nB,Movie,unknown\n").unwrap();
        let (cleaned, _) = MediaCleaner::new(2024).clean(df).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(int(&cleaned, RELEASE_YEAR, 0), Some(2001));
        assert_eq!(text(&cleaned, COUNTRY, 0).as_deref(), Some("Unknown"));
        assert_eq!(text(&cleaned, DURATION, 0).as_deref(), Some("0 Unknown"));
    }

    #[test]
    fn test_release_year_overflowing_content_age_drops_row() {
        let df = df!(
            TITLE => ["A", "B"],
            TYPE => ["Movie", "Movie"],
            RELEASE_YEAR => [2001i64, i64::MIN],
        )
        .unwrap();

        let (cleaned, stages) = MediaCleaner::new(2024).clean(df).unwrap();
        assert_eq!(cleaned.height(), 1);
        assert_eq!(int(&cleaned, CONTENT_AGE, 0), Some(23));
        assert_eq!(stages.find("media", "coerce_release_year").unwrap().removed(), 1);
    }

    #[test]
    fn test_missing_required_column_fails() {
        let df = parse_csv_str("title,release_year\nA,2001\n").unwrap();
        assert!(MediaCleaner::new(2024).clean(df).is_err());
    }

    #[test]
    fn test_exact_duplicates_removed() {
        let df = parse_csv_str(
            "title,type,release_year\nA,Movie,2001\nA,Movie,2001\nA,Movie,2002\n",
        )
        .unwrap();
        let (cleaned, stages) = MediaCleaner::new(2024).clean(df).unwrap();
        assert_eq!(cleaned.height(), 2);
        assert_eq!(stages.find("media", "deduplicate").unwrap().removed(), 1);
    }

    #[test]
    fn test_rerun_replaces_derived_columns() {
        let (first, _) = cleaned();
        let width = first.width();
        let (second, stages) = MediaCleaner::new(2024).clean(first).unwrap();
        assert_eq!(second.width(), width);
        assert_eq!(stages.find("media", "deduplicate").unwrap().removed(), 0);
    }
}
