//! IANA language subtag registry data model.
//!
//! The registry is a semi-structured text document: records separated by
//! `%%` delimiter lines, `Key: value` fields with indented continuation
//! lines, and a repeatable `Prefix:` field. Parsing turns it into a
//! bucket map from record type (`language`, `variant`, ...) to the
//! records of that type, in source order.

pub mod parser;
pub mod provider;

use std::collections::BTreeMap;

pub use parser::parse_registry;
pub use provider::shared_registry;

/// One parsed registry record: normalized field names mapped to their
/// accumulated values, plus the ordered list of `Prefix:` values.
///
/// Field names are lower-cased with `-` replaced by `_`, so the
/// registry's `Preferred-Value` becomes `preferred_value`. Fields are
/// recognized but not schema-enforced; anything the source document
/// carries is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryRecord {
    /// Scalar fields (last assignment wins, continuations append)
    pub fields: BTreeMap<String, String>,
    /// `Prefix:` values in source order; never overwritten
    pub prefixes: Vec<String>,
}

impl RegistryRecord {
    /// Look up a scalar field by its normalized name
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// The record's identifying code: `subtag` for most buckets, `tag`
    /// for grandfathered and redundant entries
    pub fn code(&self) -> Option<&str> {
        self.field("subtag").or_else(|| self.field("tag"))
    }

    /// The record's description, empty if absent
    pub fn description(&self) -> &str {
        self.field("description").unwrap_or_default()
    }

    /// Whether the record carries a `Deprecated:` field. The field's
    /// value (a date) carries no meaning here; presence alone marks the
    /// record deprecated.
    pub fn is_deprecated(&self) -> bool {
        self.fields.contains_key("deprecated")
    }

    /// The canonical replacement code, if the record is deprecated in
    /// favor of another representation
    pub fn preferred_value(&self) -> Option<&str> {
        self.field("preferred_value")
    }
}

/// The parsed registry: record-type buckets in deterministic key order,
/// each holding its records in source order.
///
/// Bucket keys stay strings rather than a closed enum: the registry
/// format is not schema-enforced, and an unknown type must survive
/// parsing (it only becomes fatal if such a record carries a
/// preferred value that cannot be classified).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    buckets: BTreeMap<String, Vec<RegistryRecord>>,
}

impl Registry {
    /// Parse the raw registry text into buckets
    pub fn parse(text: &str) -> Self {
        parser::parse_registry(text)
    }

    pub(crate) fn insert(&mut self, record_type: String, record: RegistryRecord) {
        self.buckets.entry(record_type).or_default().push(record);
    }

    /// Records of one bucket, in source order; empty for unknown types
    pub fn bucket(&self, record_type: &str) -> &[RegistryRecord] {
        self.buckets
            .get(record_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterate buckets in deterministic (sorted key) order
    pub fn buckets(&self) -> impl Iterator<Item = (&str, &[RegistryRecord])> {
        self.buckets
            .iter()
            .map(|(ty, records)| (ty.as_str(), records.as_slice()))
    }

    /// Total number of records across all buckets
    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
