//! Run Report
//!
//! Serializable summary of one assignment run: row counts, pass
//! statistics and every row error.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::CodeError;
use crate::taxonomy::{Assignment, PassStats};

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentReport {
    pub generated_at: DateTime<Utc>,
    pub total_rows: usize,
    pub coded_rows: usize,
    pub pinned_rows: usize,
    pub unrecognized_categories: usize,
    pub passes: PassStats,
    pub errors: Vec<CodeError>,
}

impl AssignmentReport {
    pub fn from_assignment(assignment: &Assignment) -> Self {
        AssignmentReport {
            generated_at: Utc::now(),
            total_rows: assignment.codes.len(),
            coded_rows: assignment.coded_rows(),
            pinned_rows: assignment.pinned,
            unrecognized_categories: assignment.unrecognized_categories,
            passes: assignment.stats,
            errors: assignment.errors(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .with_context(|| "Failed to serialize assignment report")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write report: {}", path.display()))
    }

    /// Human-readable summary lines
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Rows:                     {}", self.total_rows),
            format!("Coded:                    {}", self.coded_rows),
            format!("Pinned by override:       {}", self.pinned_rows),
            format!("Shared provisional codes: {}", self.passes.shared_provisional_codes),
            format!("Synonyms suffixed:        {}", self.passes.suffixed),
            format!("Accepted names widened:   {}", self.passes.widened),
        ];
        if self.unrecognized_categories > 0 {
            lines.push(format!("Unrecognized categories:  {}", self.unrecognized_categories));
        }
        lines.push(format!("Errors:                   {}", self.errors.len()));
        lines
    }
}
