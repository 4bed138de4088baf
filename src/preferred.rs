//! Preferred-value resolution.
//!
//! Every registry record carrying a `Preferred-Value:` field names a
//! canonical replacement for itself. This module classifies both sides
//! of that relation and produces deterministic, ordered pairs of
//! construction descriptors for the emission stage.
//!
//! The original and target sides deliberately classify differently: a
//! bare two- or three-letter lowercase code on the *target* side is
//! always a full tag, while the same shape on the original side keeps
//! its bucket's natural type. This asymmetry matches the registry's
//! semantics and must not be "simplified" away.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};
use crate::registry::Registry;

/// Bare two- or three-letter lowercase code, the shape of a primary
/// language subtag
static SHORT_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]{2,3}$").unwrap());

/// Opaque instruction for building a full language-tag value from a
/// classified string. Rendering is the emission stage's concern; the
/// resolver only decides the kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TagConstruction {
    /// Parse the string as a complete language tag
    Parse(String),
    /// Empty tag with its region subtag set, marked valid
    Region(String),
    /// Empty tag with its grandfathered tag set, marked valid
    Grandfathered(String),
    /// Empty tag whose extended-language-subtag list holds only the
    /// string, marked valid
    ExtendedLanguage(String),
    /// Empty tag whose variant list holds only the string, marked valid
    Variant(String),
}

/// One deprecated-representation / canonical-representation pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredValuePair {
    /// Construction for the record's own identifying string
    pub original: TagConstruction,
    /// Construction for the record's `Preferred-Value:` string
    pub preferred: TagConstruction,
}

/// Classified construction type for one side of a pair.
///
/// A closed set: the five buildable kinds plus `Invalid` for bucket
/// types (`script`, unknown future types) that can never legally carry
/// this classification. `Invalid` surfacing at build time is fatal — it
/// means the upstream format changed underneath the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConstructionClass {
    Tag,
    Language,
    Region,
    Grandfathered,
    Extlang,
    Variant,
    Invalid,
}

impl ConstructionClass {
    fn from_bucket(record_type: &str) -> Self {
        match record_type {
            "language" => Self::Language,
            "region" => Self::Region,
            "grandfathered" => Self::Grandfathered,
            "extlang" => Self::Extlang,
            "variant" => Self::Variant,
            _ => Self::Invalid,
        }
    }
}

/// Classify the record's own identifying string: hyphenated strings are
/// composite tags, everything else keeps its bucket's natural type
fn classify_original(record_type: &str, value: &str) -> ConstructionClass {
    if value.contains('-') {
        ConstructionClass::Tag
    } else {
        ConstructionClass::from_bucket(record_type)
    }
}

/// Classify the `Preferred-Value:` string. Unlike the original side, a
/// bare short lowercase code is always a full tag here.
fn classify_target(record_type: &str, value: &str) -> ConstructionClass {
    if value.contains('-') || SHORT_CODE.is_match(value) {
        ConstructionClass::Tag
    } else {
        ConstructionClass::from_bucket(record_type)
    }
}

/// Build the typed construction for one classified string
fn build_construction(
    class: ConstructionClass,
    record_type: &str,
    value: &str,
) -> Result<TagConstruction> {
    let value = value.to_string();
    match class {
        ConstructionClass::Tag | ConstructionClass::Language => Ok(TagConstruction::Parse(value)),
        ConstructionClass::Region => Ok(TagConstruction::Region(value)),
        ConstructionClass::Grandfathered => Ok(TagConstruction::Grandfathered(value)),
        ConstructionClass::Extlang => Ok(TagConstruction::ExtendedLanguage(value)),
        ConstructionClass::Variant => Ok(TagConstruction::Variant(value)),
        ConstructionClass::Invalid => Err(RegistryError::UnknownConstructionKind {
            kind: record_type.to_string(),
            value,
        }),
    }
}

/// Resolve every preferred-value relation in the registry into ordered
/// construction pairs.
///
/// Ordering is by descending specificity of the original identifying
/// string (more hyphens first), then by its lowercased form; the result
/// is stable and reproducible for identical input.
pub fn resolve_preferred_values(registry: &Registry) -> Result<Vec<PreferredValuePair>> {
    let mut candidates: Vec<(&str, String, &str)> = Vec::new();

    for (record_type, records) in registry.buckets() {
        for record in records {
            let Some(preferred) = record.preferred_value() else {
                continue;
            };
            let Some(code) = record.code() else {
                tracing::debug!(
                    "preferred-value record in `{record_type}` bucket has no subtag or tag"
                );
                continue;
            };
            let original = match record.prefixes.first() {
                Some(prefix) => format!("{prefix}-{code}"),
                None => code.to_string(),
            };
            candidates.push((record_type, original, preferred));
        }
    }

    candidates.sort_by_key(|(_, original, _)| {
        let hyphens = original.matches('-').count() as i64;
        (10 - hyphens, original.to_lowercase())
    });

    candidates
        .into_iter()
        .map(|(record_type, original, preferred)| {
            let original_class = classify_original(record_type, &original);
            let target_class = classify_target(record_type, preferred);
            Ok(PreferredValuePair {
                original: build_construction(original_class, record_type, &original)?,
                preferred: build_construction(target_class, record_type, preferred)?,
            })
        })
        .collect()
}
