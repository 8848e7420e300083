//! Manual Code Overrides
//!
//! Explicit name → code table for taxa whose code was set by hand.
//! Overridden rows skip generation and both resolution passes, but still
//! take part in the final uniqueness check.

use std::path::Path;

use anyhow::Result;
use rustc_hash::FxHashMap;

use crate::utils::{read_string_csv, string_values};

#[derive(Debug, Clone, Default)]
pub struct CodeOverrides {
    codes: FxHashMap<String, String>,
}

impl CodeOverrides {
    /// Build from (name, code) pairs
    ///
    /// Both sides are trimmed; pairs with a blank name or code are skipped.
    pub fn from_pairs<I, N, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, C)>,
        N: AsRef<str>,
        C: AsRef<str>,
    {
        let codes = pairs
            .into_iter()
            .filter_map(|(name, code)| {
                let (name, code) = (name.as_ref().trim(), code.as_ref().trim());
                if name.is_empty() || code.is_empty() {
                    return None;
                }
                Some((name.to_string(), code.to_string()))
            })
            .collect();
        CodeOverrides { codes }
    }

    /// Load from a CSV with `name_column` and `code_column`
    ///
    /// Rows with a blank name or code are skipped.
    pub fn load_csv(path: &Path, name_column: &str, code_column: &str) -> Result<Self> {
        let df = read_string_csv(path)?;
        let context = format!("overrides {}", path.display());
        let names = string_values(&df, name_column, &context)?;
        let codes = string_values(&df, code_column, &context)?;

        let pairs = names
            .into_iter()
            .zip(codes)
            .map(|(name, code)| (name.unwrap_or_default(), code.unwrap_or_default()));

        let overrides = Self::from_pairs(pairs);
        tracing::info!("Loaded {} code overrides from {}", overrides.len(), path.display());
        Ok(overrides)
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.codes.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_pairs_trims() {
        let overrides = CodeOverrides::from_pairs([(" Salix pulchra ", " salpul ")]);
        assert_eq!(overrides.get("Salix pulchra"), Some("salpul"));
        assert_eq!(overrides.get("Salix"), None);
    }

    #[test]
    fn test_from_pairs_skips_blank_entries() {
        let overrides = CodeOverrides::from_pairs([
            ("Salix pulchra", "   "),
            ("  ", "betnan"),
            ("Betula nana", "betnan"),
        ]);
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("Salix pulchra"), None);
        assert_eq!(overrides.get("Betula nana"), Some("betnan"));
    }

    #[test]
    fn test_load_csv_skips_blank_rows() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name_adjudicated,code").unwrap();
        writeln!(file, "Salix pulchra,salpul").unwrap();
        writeln!(file, "Betula nana,").unwrap();
        file.flush().unwrap();

        let overrides = CodeOverrides::load_csv(file.path(), "name_adjudicated", "code").unwrap();
        assert_eq!(overrides.len(), 1);
        assert_eq!(overrides.get("Salix pulchra"), Some("salpul"));
    }

    #[test]
    fn test_load_csv_missing_column() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name,code").unwrap();
        writeln!(file, "Salix pulchra,salpul").unwrap();
        file.flush().unwrap();

        let err = CodeOverrides::load_csv(file.path(), "name_adjudicated", "code").unwrap_err();
        assert!(err.to_string().contains("name_adjudicated"));
    }
}
