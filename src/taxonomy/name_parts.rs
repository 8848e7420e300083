//! Scientific Name Parsing
//!
//! Splits an adjudicated name into genus, species epithet, infrataxon
//! label and infrataxon epithet. Trailing parts may be absent.

use smallvec::SmallVec;

/// Hybrid marker used both in the species slot and the infrataxon slot
pub const HYBRID_MARKER: &str = "×";

/// Infrataxon labels that take the long `f.`/`ssp.`/`var.` code shape
pub const RANK_LABELS: [&str; 3] = ["f.", "ssp.", "var."];

/// Parsed name components, borrowed from the source string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    pub genus: &'a str,
    pub species: Option<&'a str>,
    pub infra_label: Option<&'a str>,
    pub infra_epithet: Option<&'a str>,
}

impl<'a> NameParts<'a> {
    /// Split on whitespace into at most four parts
    ///
    /// Anything past the fourth token belongs to the infrataxon epithet
    /// slot; only its leading characters ever reach a code.
    /// Returns `None` for a blank name.
    pub fn parse(name: &'a str) -> Option<Self> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return None;
        }

        let mut parts: SmallVec<[&str; 4]> = SmallVec::new();
        let mut rest = trimmed;
        while parts.len() < 3 {
            match rest.split_once(char::is_whitespace) {
                Some((head, tail)) => {
                    parts.push(head);
                    rest = tail.trim_start();
                }
                None => break,
            }
        }
        if !rest.is_empty() {
            parts.push(rest);
        }

        Some(NameParts {
            genus: parts[0],
            species: parts.get(1).copied(),
            infra_label: parts.get(2).copied(),
            infra_epithet: parts.get(3).copied(),
        })
    }

    pub fn is_hybrid_species(&self) -> bool {
        self.species == Some(HYBRID_MARKER)
    }

    pub fn is_hybrid_infra(&self) -> bool {
        self.infra_label == Some(HYBRID_MARKER)
    }

    /// Label is one of `f.`, `ssp.`, `var.`
    pub fn has_rank_label(&self) -> bool {
        self.infra_label
            .map_or(false, |label| RANK_LABELS.contains(&label))
    }

    /// Genus must be letters, optionally led by the hybrid marker (e.g. `×Elyhordeum`)
    pub fn genus_is_well_formed(&self) -> bool {
        let genus = self.genus.strip_prefix(HYBRID_MARKER).unwrap_or(self.genus);
        !genus.is_empty() && genus.chars().all(char::is_alphabetic)
    }
}
