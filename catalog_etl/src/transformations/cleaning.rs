use polars::prelude::*;

/// Remove rows with a missing value in any of `subset`
pub fn drop_missing(df: &DataFrame, subset: &[&str]) -> PolarsResult<DataFrame> {
    let subset: Vec<String> = subset.iter().map(|column| column.to_string()).collect();
    df.drop_nulls(Some(subset.as_slice()))
}

/// Remove rows with a missing value in any column
pub fn drop_any_missing(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.drop_nulls::<String>(None)
}

/// Remove exact-duplicate rows, keeping the first occurrence in row order
pub fn remove_duplicates(df: &DataFrame) -> PolarsResult<DataFrame> {
    df.unique_stable(None, UniqueKeepStrategy::First, None)
}

/// Coerce a text column to `Float64`; unparseable cells become missing.
///
/// Numeric columns are returned untouched. Also returns the number of
/// cells that were present but could not be read as numbers.
pub fn coerce_numeric(mut df: DataFrame, column: &str) -> PolarsResult<(DataFrame, usize)> {
    let original = df.column(column)?;
    if original.dtype() != &DataType::String {
        return Ok((df, 0));
    }

    let missing_before = original.null_count();
    let coerced = original.cast(&DataType::Float64)?;
    let failures = coerced.null_count().saturating_sub(missing_before);
    df.with_column(coerced)?;
    Ok((df, failures))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_duplicates() {
        let df = df!(
            "id" => [1, 2, 2, 3],
            "value" => [10, 20, 20, 30],
        )
        .unwrap();

        let unique = remove_duplicates(&df).unwrap();
        assert_eq!(unique.height(), 3);
        let ids = unique.column("id").unwrap().i32().unwrap();
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_remove_duplicates_compares_whole_rows() {
        let df = df!(
            "title" => ["A", "A", "A"],
            "release_year" => [2001i64, 2001, 2002],
        )
        .unwrap();
        assert_eq!(remove_duplicates(&df).unwrap().height(), 2);
    }

    #[test]
    fn test_drop_missing_subset() {
        let df = df!(
            "title" => [Some("A"), None],
            "director" => [None, Some("B")],
        )
        .unwrap();

        let kept = drop_missing(&df, &["title"]).unwrap();
        assert_eq!(kept.height(), 1);
        assert_eq!(kept.column("title").unwrap().str().unwrap().get(0), Some("A"));
    }

    #[test]
    fn test_drop_any_missing() {
        let df = df!(
            "energy" => [Some(0.5), None, Some(0.7)],
            "genre" => [Some("pop"), Some("rock"), None],
        )
        .unwrap();
        assert_eq!(drop_any_missing(&df).unwrap().height(), 1);
    }

    #[test]
    fn test_coerce_numeric() {
        let df = df!("popularity" => [Some("50"), Some("61.5"), Some("loud"), None]).unwrap();

        let (coerced, failures) = coerce_numeric(df, "popularity").unwrap();
        assert_eq!(failures, 1);
        let popularity = coerced.column("popularity").unwrap().f64().unwrap();
        assert_eq!(popularity.get(0), Some(50.0));
        assert_eq!(popularity.get(1), Some(61.5));
        assert_eq!(popularity.get(2), None);
        assert_eq!(popularity.get(3), None);
    }

    #[test]
    fn test_coerce_numeric_keeps_numeric_columns() {
        let df = df!("popularity" => [50i64, 61]).unwrap();
        let (coerced, failures) = coerce_numeric(df, "popularity").unwrap();
        assert_eq!(failures, 0);
        assert_eq!(coerced.column("popularity").unwrap().dtype(), &DataType::Int64);
    }
}
