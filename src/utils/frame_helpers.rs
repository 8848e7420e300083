//! DataFrame helpers with column validation
//!
//! Provides explicit patterns for reading taxonomy tables with Polars so
//! a missing or misnamed column fails early with a useful message.

use polars::prelude::*;
use anyhow::{Context, Result, anyhow};
use std::path::Path;

/// Read a CSV with every column kept as a string
///
/// Taxonomy tables are pass-through data; inferring numeric types would
/// rewrite values such as `001` on the way back out.
pub fn read_string_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to create CSV reader: {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to load CSV: {}", path.display()))
}

/// Validate that every column in `columns` is present
///
/// # Errors
/// Names the first missing column and lists the available ones.
///
/// # Example
/// ```rust,ignore
/// require_columns(&df, &["name_adjudicated", "level"], "lichen taxa")?;
/// ```
pub fn require_columns(df: &DataFrame, columns: &[&str], context: &str) -> Result<()> {
    let actual: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for &expected in columns {
        if !actual.iter().any(|name| name == expected) {
            return Err(anyhow!(
                "{}: Missing expected column '{}'. Available columns: {:?}",
                context, expected, actual
            ));
        }
    }

    Ok(())
}

/// Copy a column out as optional strings, casting if needed
pub fn string_values(df: &DataFrame, column: &str, context: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(column)
        .with_context(|| format!("{}: Missing {} column", context, column))?
        .cast(&DataType::String)
        .with_context(|| format!("{}: Column '{}' cannot be read as text", context, column))?;

    let values = col
        .str()
        .with_context(|| format!("{}: Column '{}' is not string type", context, column))?
        .into_iter()
        .map(|opt| opt.map(|s| s.to_string()))
        .collect();

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_columns_success() {
        let df = df![
            "name_adjudicated" => &["Salix pulchra"],
            "level" => &["species"],
        ].unwrap();

        assert!(require_columns(&df, &["name_adjudicated", "level"], "test").is_ok());
    }

    #[test]
    fn test_require_columns_missing() {
        let df = df![
            "name_adjudicated" => &["Salix pulchra"],
        ].unwrap();

        let err = require_columns(&df, &["status_adjudicated"], "vascular").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("status_adjudicated"));
        assert!(msg.contains("vascular"));
    }

    #[test]
    fn test_string_values_keeps_nulls() {
        let df = df![
            "name_adjudicated" => &[Some("Salix"), None],
        ].unwrap();

        let values = string_values(&df, "name_adjudicated", "test").unwrap();
        assert_eq!(values, vec![Some("Salix".to_string()), None]);
    }

    #[test]
    fn test_string_values_casts_numbers() {
        let df = df![
            "rank_order" => &[1i32, 2],
        ].unwrap();

        let values = string_values(&df, "rank_order", "test").unwrap();
        assert_eq!(values, vec![Some("1".to_string()), Some("2".to_string())]);
    }
}
