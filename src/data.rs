//! Data Loading and Writing
//!
//! Loads the three lineage taxonomy tables with Polars, merges them into
//! one table, and writes the coded result as CSV or Parquet.

use polars::prelude::*;
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::{ColumnNames, OutputFormat};
use crate::taxonomy::TaxonRecord;
use crate::utils::{read_string_csv, require_columns, string_values};

/// Paths of the three lineage taxonomy tables
#[derive(Debug, Clone)]
pub struct TaxonomySources {
    /// Eudicots, monocots, ferns, gymnosperms, lycophytes, horsetails
    pub vascular: PathBuf,

    /// Mosses, liverworts, hornworts
    pub bryophyte: PathBuf,

    /// Lichens
    pub lichen: PathBuf,
}

impl TaxonomySources {
    /// Load and merge all three sources
    ///
    /// Each source is validated for the required columns before merging.
    pub fn load(&self, columns: &ColumnNames) -> Result<DataFrame> {
        let mut frames = Vec::with_capacity(3);

        for (label, path) in [
            ("vascular", &self.vascular),
            ("bryophyte", &self.bryophyte),
            ("lichen", &self.lichen),
        ] {
            let df = read_string_csv(path)?;
            require_columns(&df, &columns.required(), &format!("{} taxa ({})", label, path.display()))?;
            tracing::info!("  {} taxa: {} rows from {}", label, df.height(), path.display());
            frames.push(df);
        }

        merge_frames(frames)
    }
}

/// Stack tables whose columns may differ
///
/// The result carries the union of columns in first-seen order; cells
/// from tables lacking a column are null. All columns become strings.
pub fn merge_frames(frames: Vec<DataFrame>) -> Result<DataFrame> {
    let mut names: Vec<PlSmallStr> = Vec::new();
    for df in &frames {
        for name in df.get_column_names() {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }

    let mut merged: Option<DataFrame> = None;
    for df in frames {
        let height = df.height();
        let mut columns: Vec<Column> = Vec::with_capacity(names.len());
        for name in &names {
            let column = match df.column(name.as_str()) {
                Ok(existing) => existing
                    .cast(&DataType::String)
                    .with_context(|| format!("Column '{}' cannot be read as text", name))?,
                Err(_) => Series::full_null(name.clone(), height, &DataType::String).into_column(),
            };
            columns.push(column);
        }

        let aligned = DataFrame::new(columns).with_context(|| "Failed to align taxonomy columns")?;
        merged = Some(match merged {
            None => aligned,
            Some(acc) => acc
                .vstack(&aligned)
                .with_context(|| "Failed to stack taxonomy tables")?,
        });
    }

    merged.ok_or_else(|| anyhow!("No taxonomy tables to merge"))
}

/// Extract the fields code assignment needs, one record per row
pub fn extract_records(df: &DataFrame, columns: &ColumnNames) -> Result<Vec<TaxonRecord>> {
    require_columns(df, &columns.required(), "merged taxonomy")?;

    let names = string_values(df, &columns.name, "merged taxonomy")?;
    let statuses = string_values(df, &columns.status, "merged taxonomy")?;
    let categories = string_values(df, &columns.category, "merged taxonomy")?;
    let levels = string_values(df, &columns.level, "merged taxonomy")?;

    let records = names
        .into_iter()
        .zip(statuses)
        .zip(categories)
        .zip(levels)
        .map(|(((name, status), category), level)| TaxonRecord {
            name: name.unwrap_or_default(),
            status: status.unwrap_or_default(),
            category: category.unwrap_or_default(),
            level: level.unwrap_or_default(),
        })
        .collect();

    Ok(records)
}

/// Add (or replace) the code column and sort rows by name
pub fn attach_codes(mut df: DataFrame, codes: Vec<String>, columns: &ColumnNames) -> Result<DataFrame> {
    if codes.len() != df.height() {
        return Err(anyhow!(
            "Code count {} does not match table height {}",
            codes.len(),
            df.height()
        ));
    }

    df.with_column(Series::new(columns.code.as_str().into(), codes))
        .with_context(|| format!("Failed to attach '{}' column", columns.code))?;

    df.sort(
        [columns.name.as_str()],
        SortMultipleOptions::default().with_maintain_order(true),
    )
    .with_context(|| format!("Failed to sort by '{}'", columns.name))
}

/// Write the table, overwriting any existing file
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = OutputFormat::from_path(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;

    match format {
        OutputFormat::Csv => {
            CsvWriter::new(file)
                .include_header(true)
                .finish(df)
                .with_context(|| format!("Failed to write CSV: {}", path.display()))?;
        }
        OutputFormat::Parquet => {
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Zstd(None))
                .finish(df)
                .with_context(|| format!("Failed to write Parquet: {}", path.display()))?;
        }
    }

    Ok(())
}
