//! AKVEG Taxon Code Assigner
//!
//! Assigns short, unique, lower-case codes to taxa in the AKVEG taxonomy.
//!
//! - `taxonomy/`: Name parsing, code rules and two-pass duplicate resolution
//! - `data`: Loading the three lineage tables with Polars, writing output
//! - `utils/`: Column validation and string cleanup
//! - `pipeline`: End-to-end run used by the `assign_taxon_codes` binary

pub mod config;
pub mod data;
pub mod error;
pub mod overrides;
pub mod pipeline;
pub mod report;
pub mod taxonomy;
pub mod utils;

// Re-export commonly used types
pub use config::{AssignerConfig, ColumnNames, OutputFormat};
pub use data::TaxonomySources;
pub use error::{AssignmentFailure, CodeError};
pub use overrides::CodeOverrides;
pub use pipeline::{process_table, run, ProcessedTaxonomy};
pub use report::AssignmentReport;
pub use taxonomy::{Assignment, CodeAssigner, TaxonRecord};
