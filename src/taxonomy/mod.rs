//! Taxonomic code assignment
//!
//! - `name_parts`: Splitting adjudicated names into rank components
//! - `status`: Status classes and lineage ranks
//! - `code_rules`: Provisional and alternate code shapes
//! - `dedup`: Two-pass duplicate resolution and the final uniqueness check
//! - `assigner`: Per-row orchestration with typed errors

pub mod name_parts;
pub mod status;
pub mod code_rules;
pub mod dedup;
pub mod assigner;

pub use name_parts::NameParts;
pub use status::{Lineage, StatusClass, TaxonStatus};
pub use code_rules::{alternate_code, provisional_code};
pub use dedup::PassStats;
pub use assigner::{Assignment, CodeAssigner, TaxonRecord};
