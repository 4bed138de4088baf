//! Registry record parser.
//!
//! Converts the raw registry text into a [`Registry`]. Lines are
//! processed in order against a fixed rule sequence; anything that
//! matches no rule is skipped silently, since the registry's preamble
//! and any future format extensions must not break the build.
//!
//! Rule order per line (first match wins):
//!
//! 1. `%%` — record delimiter, finalize the accumulated record
//! 2. `Prefix: value` — appended to the prefix list, never overwritten
//! 3. `Key: value` — normalized key set (last assignment wins)
//! 4. leading-whitespace continuation — appended to the last set field
//! 5. anything else — ignored

use std::sync::LazyLock;

use regex::Regex;

use super::{Registry, RegistryRecord};

/// Record delimiter line
const DELIMITER: &str = "%%";

/// Subtags whose description carries a parenthesized qualifier in the
/// source document that is stripped before storage. A data-cleanliness
/// correction for these specific codes, not a general rule.
const SHORTEN_DESCRIPTION_FOR: &[&str] = &["1959acad", "abl1943", "ao1990", "colb1945"];

/// Matches `Prefix: value` (case-insensitive key)
static PREFIX_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^prefix: *(.+)").unwrap());

/// Matches `Key: value`, splitting at the first colon
static FIELD_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?): *(.+)").unwrap());

/// Matches an indented continuation line
static CONTINUATION_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^ +(.+)").unwrap());

/// Matches a parenthesized qualifier run, ` (...)`, in a description
static DESCRIPTION_QUALIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +\(.*?\)").unwrap());

/// Accumulator for the record currently being read.
///
/// Holds the mapping-so-far and the name of the most recently set field
/// (the continuation target); flushed into the registry on every
/// delimiter and once more at end of input.
#[derive(Default)]
struct RecordBuilder {
    record: RegistryRecord,
    current_field: Option<String>,
}

impl RecordBuilder {
    /// Normalize a field key: lower-cased, hyphens become underscores
    fn normalize_key(key: &str) -> String {
        key.to_lowercase().replace('-', "_")
    }

    fn push_prefix(&mut self, value: &str) {
        self.record.prefixes.push(value.to_string());
        // Prefix continuations are not supported; clear the target so a
        // following indented line cannot extend the prefix list.
        self.current_field = None;
    }

    fn set_field(&mut self, key: &str, value: &str) {
        let key = Self::normalize_key(key);
        self.record.fields.insert(key.clone(), value.to_string());
        self.current_field = Some(key);
    }

    /// Append continuation text to the last set field, space-joined.
    /// Returns false when no field is open to continue.
    fn continue_field(&mut self, text: &str) -> bool {
        let Some(field) = &self.current_field else {
            return false;
        };
        if let Some(value) = self.record.fields.get_mut(field) {
            value.push(' ');
            value.push_str(text);
        }
        true
    }

    /// Finalize the accumulated record: apply the description
    /// correction, file the record under its type bucket, and reset.
    /// Records with no `type` field (the registry's preamble metadata)
    /// are discarded.
    fn finish(&mut self, registry: &mut Registry) {
        let builder = std::mem::take(self);
        let mut record = builder.record;

        if record
            .field("subtag")
            .is_some_and(|subtag| SHORTEN_DESCRIPTION_FOR.contains(&subtag))
        {
            if let Some(description) = record.fields.get_mut("description") {
                *description = DESCRIPTION_QUALIFIER
                    .replace_all(description, "")
                    .into_owned();
            }
        }

        match record.fields.get("type").cloned() {
            Some(record_type) => registry.insert(record_type, record),
            None => {
                if !record.fields.is_empty() || !record.prefixes.is_empty() {
                    tracing::debug!("discarding untyped registry record: {:?}", record.fields);
                }
            }
        }
    }
}

/// Parse the full registry text.
///
/// Pre-processing matches what the fetcher guarantees: lines are split
/// on line breaks, trailing whitespace is trimmed, and blank lines are
/// dropped (blank runs collapse).
pub fn parse_registry(text: &str) -> Registry {
    parse_lines(
        text.lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty()),
    )
}

/// Parse an already pre-processed line sequence
pub fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Registry {
    let mut registry = Registry::default();
    let mut builder = RecordBuilder::default();

    for line in lines {
        if line == DELIMITER {
            builder.finish(&mut registry);
        } else if let Some(captures) = PREFIX_LINE.captures(line) {
            builder.push_prefix(&captures[1]);
        } else if let Some(captures) = FIELD_LINE.captures(line) {
            builder.set_field(&captures[1], &captures[2]);
        } else if let Some(captures) = CONTINUATION_LINE.captures(line) {
            if !builder.continue_field(&captures[1]) {
                tracing::trace!("skipping continuation with no open field: {line}");
            }
        } else {
            tracing::trace!("skipping unrecognized registry line: {line}");
        }
    }

    // The final record has no trailing delimiter
    builder.finish(&mut registry);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_record() {
        let registry = parse_registry(
            "Type: variant\nSubtag: fonipa\nDescription: International Phonetic Alphabet\n%%",
        );

        let bucket = registry.bucket("variant");
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].field("subtag"), Some("fonipa"));
        assert_eq!(
            bucket[0].description(),
            "International Phonetic Alphabet"
        );
        assert!(bucket[0].prefixes.is_empty());
        assert!(!bucket[0].is_deprecated());
    }

    #[test]
    fn test_untyped_record_discarded() {
        let registry = parse_registry("File-Date: 2024-03-07\n%%\nType: script\nSubtag: Latn\n%%");

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.bucket("script").len(), 1);
    }

    #[test]
    fn test_continuation_accumulates_space_joined() {
        let registry = parse_registry(
            "Type: variant\nSubtag: alalc97\nDescription: ALA-LC Romanization,\n  1997 edition\n%%",
        );

        let record = &registry.bucket("variant")[0];
        assert_eq!(record.description(), "ALA-LC Romanization, 1997 edition");
    }

    #[test]
    fn test_prefix_accumulates_in_order() {
        let registry = parse_registry(
            "Type: variant\nSubtag: 1994\nPrefix: sl-rozaj\nPrefix: sl-rozaj-biske\n%%",
        );

        let record = &registry.bucket("variant")[0];
        assert_eq!(record.prefixes, vec!["sl-rozaj", "sl-rozaj-biske"]);
    }

    #[test]
    fn test_prefix_has_no_continuation() {
        // The indented line after Prefix must not extend anything
        let registry =
            parse_registry("Type: extlang\nSubtag: aao\nPrefix: ar\n  orphaned text\n%%");

        let record = &registry.bucket("extlang")[0];
        assert_eq!(record.prefixes, vec!["ar"]);
        assert!(!record.fields.values().any(|v| v.contains("orphaned")));
    }

    #[test]
    fn test_repeated_scalar_field_overwritten() {
        let registry =
            parse_registry("Type: region\nSubtag: DE\nDescription: first\nDescription: second\n%%");

        assert_eq!(registry.bucket("region")[0].description(), "second");
    }

    #[test]
    fn test_key_normalization() {
        let registry =
            parse_registry("Type: language\nSubtag: in\nPreferred-Value: id\nDeprecated: 1989-01-01\n%%");

        let record = &registry.bucket("language")[0];
        assert_eq!(record.preferred_value(), Some("id"));
        assert!(record.is_deprecated());
    }

    #[test]
    fn test_final_record_without_delimiter() {
        let registry = parse_registry("Type: script\nSubtag: Cyrl\nDescription: Cyrillic");

        assert_eq!(registry.bucket("script").len(), 1);
    }

    #[test]
    fn test_description_qualifier_stripped_for_listed_subtags() {
        let registry = parse_registry(
            "Type: variant\nSubtag: ao1990\nDescription: Portuguese Language Orthographic Agreement of 1990 (Acordo Ortográfico da Língua Portuguesa de 1990)\n%%",
        );

        assert_eq!(
            registry.bucket("variant")[0].description(),
            "Portuguese Language Orthographic Agreement of 1990"
        );
    }

    #[test]
    fn test_description_qualifier_kept_for_other_subtags() {
        let registry = parse_registry(
            "Type: variant\nSubtag: fonxsamp\nDescription: Transcription in X-SAMPA (computer readable)\n%%",
        );

        assert_eq!(
            registry.bucket("variant")[0].description(),
            "Transcription in X-SAMPA (computer readable)"
        );
    }

    #[test]
    fn test_blank_lines_collapsed() {
        let registry =
            parse_registry("Type: variant\n\n\nSubtag: fonipa\n%%\n\nType: variant\nSubtag: simple\n%%");

        assert_eq!(registry.bucket("variant").len(), 2);
    }

    #[test]
    fn test_parsing_is_idempotent() {
        let text = "Type: variant\nSubtag: fonipa\nDescription: International\n  Phonetic Alphabet\nPrefix: en\n%%\nType: region\nSubtag: DD\nPreferred-Value: DE\n%%";

        assert_eq!(parse_registry(text), parse_registry(text));
    }
}
