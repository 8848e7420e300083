//! Run Configuration
//!
//! Column names and processing switches for one code assignment run.

use std::path::Path;

use anyhow::{anyhow, Result};

use crate::overrides::CodeOverrides;

/// Input and output column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub name: String,
    pub status: String,
    pub category: String,
    pub level: String,
    /// Column the assigned code is written to
    pub code: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        ColumnNames {
            name: "name_adjudicated".to_string(),
            status: "status_adjudicated".to_string(),
            category: "category".to_string(),
            level: "level".to_string(),
            code: "code".to_string(),
        }
    }
}

impl ColumnNames {
    /// Columns every input table must carry
    pub fn required(&self) -> [&str; 4] {
        [
            self.name.as_str(),
            self.status.as_str(),
            self.category.as_str(),
            self.level.as_str(),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct AssignerConfig {
    pub columns: ColumnNames,
    pub overrides: CodeOverrides,
    /// Normalize whitespace and drop empty rows before assignment
    pub cleanup: bool,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        AssignerConfig {
            columns: ColumnNames::default(),
            overrides: CodeOverrides::default(),
            cleanup: true,
        }
    }
}

/// Output table format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("parquet") => Ok(OutputFormat::Parquet),
            _ => Err(anyhow!(
                "Unsupported output extension for {:?} (expected .csv or .parquet)",
                path
            )),
        }
    }
}
