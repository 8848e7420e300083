//! Code Construction Rules
//!
//! Provisional codes come from the parsed name alone. Alternate codes
//! are the longer, rank-sensitive abbreviations used when accepted names
//! still collide after the first resolution pass.
//!
//! All slicing is by character, not byte, so the `×` marker counts as one.

use crate::error::CodeError;
use super::name_parts::{NameParts, HYBRID_MARKER};

/// First `n` characters of `s` (fewer if `s` is shorter)
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Build the provisional code for a name
///
/// | shape                  | code                          |
/// |------------------------|-------------------------------|
/// | `Genus`                | genus[6]                      |
/// | `Genus × epithet`      | genus[3] × epithet[3]         |
/// | `Genus species`        | genus[3] species[3]           |
/// | `Genus sp × infra`     | genus[3] sp[1] × infra[1]     |
/// | `Genus sp ssp. infra`  | genus[3] sp[3] s infra[3]     |
pub fn provisional_code(name: &str) -> Result<String, CodeError> {
    let parts = NameParts::parse(name)
        .ok_or_else(|| CodeError::malformed(name, "name is blank"))?;

    if !parts.genus_is_well_formed() {
        return Err(CodeError::malformed(name, "genus is not alphabetic"));
    }

    let genus = parts.genus;
    let code = match (parts.species, parts.infra_label, parts.infra_epithet) {
        (None, _, _) => prefix(genus, 6).to_string(),
        (Some(_), label, _) if parts.is_hybrid_species() => {
            let epithet = label
                .ok_or_else(|| CodeError::malformed(name, "hybrid marker without epithet"))?;
            format!("{}{}{}", prefix(genus, 3), HYBRID_MARKER, prefix(epithet, 3))
        }
        (Some(species), None, _) => format!("{}{}", prefix(genus, 3), prefix(species, 3)),
        (Some(species), Some(_), epithet) if parts.is_hybrid_infra() => {
            let epithet = epithet
                .ok_or_else(|| CodeError::malformed(name, "hybrid marker without epithet"))?;
            format!(
                "{}{}{}{}",
                prefix(genus, 3),
                prefix(species, 1),
                HYBRID_MARKER,
                prefix(epithet, 1)
            )
        }
        (Some(_), Some(_), _) if parts.has_rank_label() => rank_label_code(name, &parts)?,
        (Some(_), Some(label), _) => {
            return Err(CodeError::malformed(
                name,
                format!("unrecognized infrataxon label '{}'", label),
            ));
        }
    };

    Ok(code.to_lowercase())
}

/// Build the alternate code used by the second resolution pass
///
/// Genus-level records widen to genus[8], species-level records to
/// genus[3] species[4]. Infraspecific records reuse the `f.`/`ssp.`/`var.`
/// shape, which can leave them colliding; the final uniqueness check
/// reports those. Returns `None` when no alternate shape applies.
pub fn alternate_code(name: &str, level: &str) -> Option<String> {
    let parts = NameParts::parse(name)?;
    let level = level.trim().to_ascii_lowercase();

    let code = if level == "genus" || parts.species.is_none() {
        prefix(parts.genus, 8).to_string()
    } else if parts.has_rank_label() {
        rank_label_code(name, &parts).ok()?
    } else {
        let species = parts.species?;
        if parts.is_hybrid_species() || parts.infra_label.is_some() {
            return None;
        }
        format!("{}{}", prefix(parts.genus, 3), prefix(species, 4))
    };

    Some(code.to_lowercase())
}

fn rank_label_code(name: &str, parts: &NameParts<'_>) -> Result<String, CodeError> {
    let (Some(species), Some(label)) = (parts.species, parts.infra_label) else {
        return Err(CodeError::malformed(name, "missing species or infrataxon label"));
    };
    let epithet = parts
        .infra_epithet
        .ok_or_else(|| CodeError::malformed(name, format!("'{}' without infrataxon epithet", label)))?;

    Ok(format!(
        "{}{}{}{}",
        prefix(parts.genus, 3),
        prefix(species, 3),
        prefix(label, 1),
        prefix(epithet, 3)
    ))
}
