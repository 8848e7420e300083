//! Error types for taxon code assignment
//!
//! Row-level problems are collected as `CodeError` values rather than
//! raised one at a time, so a single run reports every defect at once.

use serde::Serialize;
use thiserror::Error;

/// Why a single taxon record could not receive a code
#[derive(Error, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CodeError {
    /// Name does not match any code construction rule
    #[error("Malformed name '{name}': {reason}")]
    MalformedName { name: String, reason: String },

    /// Status is neither accepted-like nor synonym-like
    #[error("Unclassified status '{status}' for '{name}'")]
    UnclassifiedStatus { name: String, status: String },

    /// Code still shared by several taxa after both resolution passes
    #[error("Duplicate code '{code}' shared by: {}", .names.join(", "))]
    DuplicateCode { code: String, names: Vec<String> },

    /// Same adjudicated name appears on more than one row
    #[error("Duplicate name '{name}' appears {count} times")]
    DuplicateName { name: String, count: usize },
}

impl CodeError {
    pub fn malformed(name: &str, reason: impl Into<String>) -> Self {
        CodeError::MalformedName {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Strict-mode failure: at least one row could not be coded
#[derive(Error, Debug)]
#[error("{} taxon record(s) failed code assignment", .errors.len())]
pub struct AssignmentFailure {
    pub errors: Vec<CodeError>,
}
