//! Utility modules for taxonomy tables
//!
//! Contains shared functionality used by loading and assignment:
//! - Frame helpers: CSV reading and column validation
//! - Cleanup: Whitespace normalization and empty-row removal

pub mod frame_helpers;
pub mod cleanup;

// Re-export commonly used functions
pub use frame_helpers::{read_string_csv, require_columns, string_values};
pub use cleanup::{clean_string_columns, drop_empty_rows, normalize_whitespace};
