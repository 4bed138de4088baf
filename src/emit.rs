//! Row projection and output serialization.
//!
//! The compiled registry is handed to consumers as typed rows and
//! construction-descriptor pairs, serialized as JSON. No source-code
//! dialect or column-aligned text is rendered here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::preferred::{resolve_preferred_values, PreferredValuePair};
use crate::registry::{Registry, RegistryRecord};

/// Fixed-shape row for an `extlang`, `variant`, or `grandfathered`
/// registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtagRow {
    /// The subtag (lower-cased) or grandfathered tag
    pub code: String,
    /// Description text as stored by the parser
    pub description: String,
    /// Declared prefixes; order-irrelevant, emitted sorted
    pub prefixes: Vec<String>,
    /// Whether the entry is deprecated
    pub deprecated: bool,
}

/// Complete registry pipeline output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryOutput {
    pub extlangs: Vec<SubtagRow>,
    pub variants: Vec<SubtagRow>,
    pub grandfathered: Vec<SubtagRow>,
    pub preferred_values: Vec<PreferredValuePair>,
}

impl RegistryOutput {
    /// Project the full registry into its emission shape
    pub fn build(registry: &Registry) -> Result<Self> {
        Ok(Self {
            extlangs: project_bucket(registry.bucket("extlang")),
            variants: project_bucket(registry.bucket("variant")),
            grandfathered: project_grandfathered(registry.bucket("grandfathered")),
            preferred_values: resolve_preferred_values(registry)?,
        })
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the JSON output to a file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

/// Project one extlang/variant record
fn project_record(record: &RegistryRecord) -> SubtagRow {
    let mut prefixes = record.prefixes.clone();
    prefixes.sort();

    SubtagRow {
        code: record.code().unwrap_or_default().to_lowercase(),
        description: record.description().to_string(),
        prefixes,
        deprecated: record.is_deprecated(),
    }
}

fn project_bucket(records: &[RegistryRecord]) -> Vec<SubtagRow> {
    let mut rows: Vec<SubtagRow> = records.iter().map(project_record).collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));
    rows
}

/// Grandfathered entries keep their tag casing, never declare prefixes,
/// and are deprecated by definition of the bucket.
fn project_grandfathered(records: &[RegistryRecord]) -> Vec<SubtagRow> {
    let mut rows: Vec<SubtagRow> = records
        .iter()
        .map(|record| SubtagRow {
            code: record.code().unwrap_or_default().to_string(),
            description: record.description().to_string(),
            prefixes: Vec::new(),
            deprecated: true,
        })
        .collect();
    rows.sort_by(|a, b| a.code.cmp(&b.code));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::parse_registry;

    #[test]
    fn test_variant_row_projection() {
        let registry = parse_registry(
            "Type: variant\nSubtag: fonipa\nDescription: International Phonetic Alphabet\n%%",
        );

        let output = RegistryOutput::build(&registry).unwrap();
        assert_eq!(
            output.variants,
            vec![SubtagRow {
                code: "fonipa".to_string(),
                description: "International Phonetic Alphabet".to_string(),
                prefixes: Vec::new(),
                deprecated: false,
            }]
        );
    }

    #[test]
    fn test_prefixes_emitted_sorted() {
        let registry = parse_registry(
            "Type: variant\nSubtag: 1994\nPrefix: sl-rozaj-solba\nPrefix: sl-rozaj-biske\n%%",
        );

        let output = RegistryOutput::build(&registry).unwrap();
        assert_eq!(
            output.variants[0].prefixes,
            vec!["sl-rozaj-biske", "sl-rozaj-solba"]
        );
    }

    #[test]
    fn test_subtag_lowercased() {
        let registry = parse_registry("Type: variant\nSubtag: 1901\nDescription: Traditional\n%%\n\
            Type: extlang\nSubtag: ASE\nDescription: American Sign Language\nPrefix: sgn\n%%");

        let output = RegistryOutput::build(&registry).unwrap();
        assert_eq!(output.extlangs[0].code, "ase");
    }

    #[test]
    fn test_grandfathered_always_deprecated_with_no_prefixes() {
        let registry = parse_registry(
            "Type: grandfathered\nTag: i-klingon\nDescription: Klingon\nPreferred-Value: tlh\n%%\n\
             Type: grandfathered\nTag: cel-gaulish\nDescription: Gaulish\n%%",
        );

        let output = RegistryOutput::build(&registry).unwrap();
        assert_eq!(output.grandfathered.len(), 2);
        for row in &output.grandfathered {
            assert!(row.deprecated);
            assert!(row.prefixes.is_empty());
        }
        // Tag casing preserved, rows sorted by code
        assert_eq!(output.grandfathered[0].code, "cel-gaulish");
        assert_eq!(output.grandfathered[1].code, "i-klingon");
    }

    #[test]
    fn test_json_round_trip() {
        let registry = parse_registry(
            "Type: variant\nSubtag: heploc\nPrefix: ja-Latn-hepburn\nDeprecated: 2010-02-07\nPreferred-Value: alalc97\n%%",
        );

        let output = RegistryOutput::build(&registry).unwrap();
        let json = output.to_json().unwrap();
        let parsed: RegistryOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, output);
    }
}
