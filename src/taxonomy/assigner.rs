//! Taxon Code Assigner
//!
//! Turns merged taxon records into one short, unique, lower-case code per
//! row. Every row ends with either `Ok(code)` or `Err(reason)`; nothing is
//! encoded as a placeholder string.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{AssignmentFailure, CodeError};
use crate::overrides::CodeOverrides;
use super::code_rules::provisional_code;
use super::dedup::{find_duplicate_codes, resolve_duplicates, CodeSlot, PassStats};
use super::status::{Lineage, TaxonStatus};

/// One row of the merged taxonomy table
///
/// Missing cells are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonRecord {
    pub name: String,
    pub status: String,
    pub category: String,
    pub level: String,
}

impl TaxonRecord {
    pub fn new(name: &str, status: &str, category: &str, level: &str) -> Self {
        TaxonRecord {
            name: name.to_string(),
            status: status.to_string(),
            category: category.to_string(),
            level: level.to_string(),
        }
    }
}

/// Per-row results of one assignment run
#[derive(Debug, Clone)]
pub struct Assignment {
    /// Same length and order as the input records
    pub codes: Vec<Result<String, CodeError>>,
    pub stats: PassStats,
    /// Rows whose code came from the override table
    pub pinned: usize,
    /// Rows whose category matched no lineage group
    pub unrecognized_categories: usize,
}

impl Assignment {
    pub fn coded_rows(&self) -> usize {
        self.codes.iter().filter(|code| code.is_ok()).count()
    }

    /// Distinct errors in row order
    ///
    /// A duplicate-code error is shared by every colliding row and is
    /// listed once.
    pub fn errors(&self) -> Vec<CodeError> {
        let mut seen: FxHashSet<&CodeError> = FxHashSet::default();
        self.codes
            .iter()
            .filter_map(|code| code.as_ref().err())
            .filter(|err| seen.insert(*err))
            .cloned()
            .collect()
    }

    pub fn is_clean(&self) -> bool {
        self.codes.iter().all(|code| code.is_ok())
    }

    /// All codes, or every error if any row failed
    pub fn into_codes(self) -> Result<Vec<String>, AssignmentFailure> {
        if self.is_clean() {
            return Ok(self.codes.into_iter().filter_map(Result::ok).collect());
        }
        Err(AssignmentFailure {
            errors: self.errors(),
        })
    }
}

/// Assigns taxon codes, honouring manual overrides
#[derive(Debug, Clone, Default)]
pub struct CodeAssigner {
    overrides: CodeOverrides,
}

impl CodeAssigner {
    pub fn new(overrides: CodeOverrides) -> Self {
        CodeAssigner { overrides }
    }

    pub fn assign(&self, records: &[TaxonRecord]) -> Assignment {
        let mut codes: Vec<Result<String, CodeError>> = vec![Ok(String::new()); records.len()];
        let duplicate_names = count_duplicate_names(records);

        let mut slots: Vec<CodeSlot<'_>> = Vec::with_capacity(records.len());
        let mut pinned = 0;
        let mut unrecognized_categories = 0;

        for (row, record) in records.iter().enumerate() {
            let name = record.name.trim();

            if let Some(&count) = duplicate_names.get(name) {
                codes[row] = Err(CodeError::DuplicateName {
                    name: name.to_string(),
                    count,
                });
                continue;
            }

            let Some(status) = TaxonStatus::parse(&record.status) else {
                codes[row] = Err(CodeError::UnclassifiedStatus {
                    name: name.to_string(),
                    status: record.status.clone(),
                });
                continue;
            };

            let lineage = Lineage::from_category(&record.category);
            if lineage == Lineage::Unrecognized {
                tracing::warn!("Unrecognized category '{}' for '{}'", record.category, name);
                unrecognized_categories += 1;
            }

            let (code, is_pinned) = match self.overrides.get(name) {
                Some(manual) => {
                    pinned += 1;
                    (manual.to_lowercase(), true)
                }
                None => match provisional_code(name) {
                    Ok(code) => (code, false),
                    Err(err) => {
                        codes[row] = Err(err);
                        continue;
                    }
                },
            };

            slots.push(CodeSlot {
                row,
                name,
                level: record.level.trim(),
                class: status.class(),
                lineage_rank: lineage.rank(),
                pinned: is_pinned,
                code,
            });
        }

        let stats = resolve_duplicates(&mut slots);
        tracing::debug!(
            "Resolution: {} shared provisional codes, {} suffixed, {} widened",
            stats.shared_provisional_codes,
            stats.suffixed,
            stats.widened
        );

        let mut collided = vec![false; slots.len()];
        for (members, err) in find_duplicate_codes(&slots) {
            for idx in members {
                collided[idx] = true;
                codes[slots[idx].row] = Err(err.clone());
            }
        }

        for (slot, collided) in slots.into_iter().zip(collided) {
            if !collided {
                codes[slot.row] = Ok(slot.code);
            }
        }

        Assignment {
            codes,
            stats,
            pinned,
            unrecognized_categories,
        }
    }
}

/// Names (trimmed, non-blank) appearing on more than one row
fn count_duplicate_names(records: &[TaxonRecord]) -> FxHashMap<&str, usize> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for record in records {
        let name = record.name.trim();
        if !name.is_empty() {
            *counts.entry(name).or_insert(0) += 1;
        }
    }
    counts.retain(|_, count| *count > 1);
    counts
}
