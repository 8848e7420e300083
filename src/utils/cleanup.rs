//! String Cleanup
//!
//! Normalizes text cells before code generation: NBSP becomes a plain
//! space, whitespace runs collapse to one space, ends are trimmed.
//! Rows whose text cells are all null or blank are dropped.

use polars::prelude::*;
use anyhow::{Context, Result};

/// Normalize whitespace in a single value
pub fn normalize_whitespace(value: &str) -> String {
    // char::is_whitespace already covers U+00A0
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Apply `normalize_whitespace` to every string column
pub fn clean_string_columns(df: &DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(df.width());

    for column in df.get_columns() {
        if column.dtype() == &DataType::String {
            let cleaned: StringChunked = column
                .str()?
                .into_iter()
                .map(|opt| opt.map(normalize_whitespace))
                .collect();
            columns.push(cleaned.with_name(column.name().clone()).into_series().into_column());
        } else {
            columns.push(column.clone());
        }
    }

    DataFrame::new(columns).with_context(|| "Failed to rebuild cleaned table")
}

/// Drop rows whose string cells are all null or blank
pub fn drop_empty_rows(df: &DataFrame) -> Result<DataFrame> {
    let text_columns: Vec<&StringChunked> = df
        .get_columns()
        .iter()
        .filter(|column| column.dtype() == &DataType::String)
        .map(|column| column.str())
        .collect::<PolarsResult<_>>()?;

    let mask: BooleanChunked = (0..df.height())
        .map(|idx| {
            text_columns
                .iter()
                .any(|ca| ca.get(idx).map_or(false, |value| !value.trim().is_empty()))
        })
        .collect();

    df.filter(&mask).with_context(|| "Failed to drop empty rows")
}
