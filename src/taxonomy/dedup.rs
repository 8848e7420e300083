//! Duplicate Code Resolution
//!
//! Two passes over the provisional codes, each driven by an explicit
//! grouping of code → ordered slot indices:
//!
//! 1. Secondary (synonym-like) rows in a shared group get their 1-based
//!    group position appended (`salpul` → `salpul2`).
//! 2. Primary rows still sharing a code take the longer alternate code.
//!
//! Group order is (status class, lineage rank, name), so the result does
//! not depend on input row order. A final check over every slot reports
//! any code that is still shared.

use rustc_hash::FxHashMap;

use crate::error::CodeError;
use super::code_rules::alternate_code;
use super::status::StatusClass;

/// One codable row taking part in resolution
#[derive(Debug, Clone)]
pub struct CodeSlot<'a> {
    /// Row index in the source table
    pub row: usize,
    pub name: &'a str,
    pub level: &'a str,
    pub class: StatusClass,
    pub lineage_rank: u8,
    /// Manually assigned; never rewritten by either pass
    pub pinned: bool,
    pub code: String,
}

/// Counts of rewrites per pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct PassStats {
    /// Provisional codes shared by more than one row
    pub shared_provisional_codes: usize,
    /// Secondary rows suffixed in pass 1
    pub suffixed: usize,
    /// Primary rows widened to an alternate code in pass 2
    pub widened: usize,
}

/// Group unpinned slots by code
///
/// Each group lists slot indices ordered by (class, lineage rank, name).
pub fn group_by_code(slots: &[CodeSlot<'_>]) -> FxHashMap<String, Vec<usize>> {
    let mut groups: FxHashMap<String, Vec<usize>> = FxHashMap::default();
    for (idx, slot) in slots.iter().enumerate() {
        if !slot.pinned {
            groups.entry(slot.code.clone()).or_default().push(idx);
        }
    }

    for members in groups.values_mut() {
        members.sort_by(|&a, &b| {
            let (a, b) = (&slots[a], &slots[b]);
            a.class
                .cmp(&b.class)
                .then(a.lineage_rank.cmp(&b.lineage_rank))
                .then_with(|| a.name.cmp(b.name))
        });
    }

    groups
}

/// Pass 1: append group position to secondary rows in shared groups
pub fn suffix_secondary_duplicates(slots: &mut [CodeSlot<'_>], stats: &mut PassStats) {
    let groups = group_by_code(slots);

    for members in groups.values().filter(|members| members.len() > 1) {
        stats.shared_provisional_codes += 1;
        for (position, &idx) in members.iter().enumerate() {
            let slot = &mut slots[idx];
            if slot.class == StatusClass::Secondary {
                slot.code = format!("{}{}", slot.code, position + 1);
                stats.suffixed += 1;
            }
        }
    }
}

/// Pass 2: widen primary rows that still share a code
///
/// Rows with no alternate shape keep their code; the final check
/// reports them.
pub fn widen_primary_duplicates(slots: &mut [CodeSlot<'_>], stats: &mut PassStats) {
    let groups = group_by_code(slots);

    for members in groups.values().filter(|members| members.len() > 1) {
        for &idx in members {
            let slot = &mut slots[idx];
            if slot.class != StatusClass::Primary {
                continue;
            }
            if let Some(alternate) = alternate_code(slot.name, slot.level) {
                slot.code = alternate;
                stats.widened += 1;
            } else {
                tracing::debug!("No alternate code shape for '{}' ({})", slot.name, slot.level);
            }
        }
    }
}

/// Find codes shared by more than one slot, pinned slots included
///
/// Returns `(slot indices, error)` pairs sorted by code.
pub fn find_duplicate_codes(slots: &[CodeSlot<'_>]) -> Vec<(Vec<usize>, CodeError)> {
    let mut by_code: FxHashMap<&str, Vec<usize>> = FxHashMap::default();
    for (idx, slot) in slots.iter().enumerate() {
        by_code.entry(slot.code.as_str()).or_default().push(idx);
    }

    let mut duplicates: Vec<(Vec<usize>, CodeError)> = by_code
        .into_iter()
        .filter(|(_, members)| members.len() > 1)
        .map(|(code, mut members)| {
            members.sort_by(|&a, &b| slots[a].name.cmp(slots[b].name));
            let names = members.iter().map(|&idx| slots[idx].name.to_string()).collect();
            let err = CodeError::DuplicateCode {
                code: code.to_string(),
                names,
            };
            (members, err)
        })
        .collect();

    duplicates.sort_by(|a, b| match (&a.1, &b.1) {
        (CodeError::DuplicateCode { code: x, .. }, CodeError::DuplicateCode { code: y, .. }) => x.cmp(y),
        _ => std::cmp::Ordering::Equal,
    });
    duplicates
}

/// Run both passes in order
pub fn resolve_duplicates(slots: &mut [CodeSlot<'_>]) -> PassStats {
    let mut stats = PassStats::default();
    suffix_secondary_duplicates(slots, &mut stats);
    widen_primary_duplicates(slots, &mut stats);
    stats
}
