//! Status and Lineage Classification
//!
//! Maps the free-text `status_adjudicated` and `category` values onto the
//! small integer keys used to order rows inside a duplicate-code group.

use serde::Serialize;

/// Adjudicated taxonomic status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonStatus {
    // Accepted-like
    Accepted,
    Microspecies,
    HybridOrigin,
    AdjacentRegion,
    Unresolved,

    // Synonym-like
    Synonym,
    Misapplied,
    SpellingVariant,
    Historic,
}

impl TaxonStatus {
    /// Parse a status label
    ///
    /// Case-insensitive; spaces, hyphens and underscores are interchangeable
    /// ("hybrid origin", "hybrid-origin", "Hybrid_Origin").
    pub fn parse(raw: &str) -> Option<Self> {
        let key: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | '_' | ' ' => ' ',
                other => other.to_ascii_lowercase(),
            })
            .collect();

        match key.as_str() {
            "accepted" => Some(TaxonStatus::Accepted),
            "microspecies" => Some(TaxonStatus::Microspecies),
            "hybrid origin" => Some(TaxonStatus::HybridOrigin),
            "adjacent region" => Some(TaxonStatus::AdjacentRegion),
            "unresolved" => Some(TaxonStatus::Unresolved),
            "synonym" => Some(TaxonStatus::Synonym),
            "misapplied" | "name misapplied" => Some(TaxonStatus::Misapplied),
            "spelling variant" => Some(TaxonStatus::SpellingVariant),
            "historic" => Some(TaxonStatus::Historic),
            _ => None,
        }
    }

    pub fn class(self) -> StatusClass {
        match self {
            TaxonStatus::Accepted
            | TaxonStatus::Microspecies
            | TaxonStatus::HybridOrigin
            | TaxonStatus::AdjacentRegion
            | TaxonStatus::Unresolved => StatusClass::Primary,
            TaxonStatus::Synonym
            | TaxonStatus::Misapplied
            | TaxonStatus::SpellingVariant
            | TaxonStatus::Historic => StatusClass::Secondary,
        }
    }
}

/// Resolution priority; primary rows sort ahead of secondary rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StatusClass {
    Primary = 1,
    Secondary = 2,
}

/// Major lineage group a taxon belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lineage {
    Vascular,
    Bryophyte,
    Lichen,
    Unrecognized,
}

impl Lineage {
    pub fn from_category(category: &str) -> Self {
        match category.trim().to_ascii_lowercase().as_str() {
            "lichen" => Lineage::Lichen,
            "hornwort" | "liverwort" | "moss" => Lineage::Bryophyte,
            "eudicot" | "fern" | "forb" | "gymnosperm" | "horsetail" | "lycophyte"
            | "monocot" => Lineage::Vascular,
            _ => Lineage::Unrecognized,
        }
    }

    /// lichen=3, bryophyte=2, vascular=1, unrecognized=0
    pub fn rank(self) -> u8 {
        match self {
            Lineage::Lichen => 3,
            Lineage::Bryophyte => 2,
            Lineage::Vascular => 1,
            Lineage::Unrecognized => 0,
        }
    }
}
