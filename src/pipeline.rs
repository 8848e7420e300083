//! Code Assignment Pipeline
//!
//! load → cleanup → extract records → assign → attach codes → write.
//! The output file is only written when every row received a code.

use polars::prelude::*;
use anyhow::Result;
use std::path::Path;

use crate::config::AssignerConfig;
use crate::data::{attach_codes, extract_records, write_table, TaxonomySources};
use crate::report::AssignmentReport;
use crate::taxonomy::CodeAssigner;
use crate::utils::{clean_string_columns, drop_empty_rows};

/// Result of processing one merged table
pub struct ProcessedTaxonomy {
    /// Coded table, present only when the report has no errors
    pub table: Option<DataFrame>,
    pub report: AssignmentReport,
}

/// Assign codes to an already merged table
pub fn process_table(df: DataFrame, config: &AssignerConfig) -> Result<ProcessedTaxonomy> {
    let df = if config.cleanup {
        let before = df.height();
        let cleaned = drop_empty_rows(&clean_string_columns(&df)?)?;
        if cleaned.height() < before {
            tracing::info!("Dropped {} empty rows", before - cleaned.height());
        }
        cleaned
    } else {
        df
    };

    let records = extract_records(&df, &config.columns)?;
    let assignment = CodeAssigner::new(config.overrides.clone()).assign(&records);
    let report = AssignmentReport::from_assignment(&assignment);

    for err in &report.errors {
        tracing::warn!("{}", err);
    }

    let table = match assignment.into_codes() {
        Ok(codes) => Some(attach_codes(df, codes, &config.columns)?),
        Err(failure) => {
            tracing::error!("{}", failure);
            None
        }
    };

    Ok(ProcessedTaxonomy { table, report })
}

/// Load the three sources, assign codes and write the output
///
/// Returns the report either way; the output file is left untouched when
/// the report carries errors.
pub fn run(sources: &TaxonomySources, output: &Path, config: &AssignerConfig) -> Result<AssignmentReport> {
    tracing::info!("Loading taxonomy sources...");
    let merged = sources.load(&config.columns)?;
    tracing::info!("Merged taxonomy: {} rows x {} columns", merged.height(), merged.width());

    let processed = process_table(merged, config)?;

    if let Some(mut table) = processed.table {
        write_table(&mut table, output)?;
        tracing::info!("Wrote {} coded rows to {}", table.height(), output.display());
    }

    Ok(processed.report)
}
