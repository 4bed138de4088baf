//! ISO 639-3 code table parser.
//!
//! Consumes the SIL tab-delimited code table (header row first) and
//! projects it into [`Iso639Entry`] records. Only constructed, living,
//! and special languages are kept; macrolanguage groupings and
//! historic/extinct/ancient codes are rejected, as is the reserved
//! `qaa`–`qtz` private-use block, which is replaced by four fixed
//! placeholder rows for `qaa`..`qad`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// `Language_Type` category codes that survive filtering: constructed,
/// living, special
const KEPT_LANGUAGE_TYPES: &[&str] = &["C", "L", "S"];

/// One accepted language code entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iso639Entry {
    /// Reference name
    pub name: String,
    /// Terminology (ISO 639-3 id) code
    pub alpha_3: String,
    /// The three-letter code to use: bibliographic when one exists,
    /// otherwise the terminology code
    pub alpha_3_to_use: String,
    /// Two-letter ISO 639-1 code, when assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_2: Option<String>,
    /// Distinct bibliographic code; absent when it equals the
    /// terminology code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bibliographic: Option<String>,
    /// Whether the language also has an ISO 639-2 code
    pub has_639_2: bool,
}

/// Column indices resolved from the header row
struct Columns {
    id: usize,
    part2b: usize,
    part2t: usize,
    part1: usize,
    language_type: usize,
    ref_name: usize,
}

impl Columns {
    fn from_header(header: &str) -> Result<Self> {
        let index: HashMap<String, usize> = header
            .split('\t')
            .enumerate()
            .map(|(idx, name)| (name.trim().to_lowercase(), idx))
            .collect();

        let lookup = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| RegistryError::Other(format!("missing table column `{name}`")))
        };

        Ok(Self {
            id: lookup("id")?,
            part2b: lookup("part2b")?,
            part2t: lookup("part2t")?,
            part1: lookup("part1")?,
            language_type: lookup("language_type")?,
            ref_name: lookup("ref_name")?,
        })
    }
}

/// An absent or empty-string cell is no value
fn cell(cells: &[&str], idx: usize) -> Option<String> {
    cells
        .get(idx)
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Parse and filter the full code table, append the reserved
/// private-use placeholders, and order by name for reproducible output.
pub fn compile_table(text: &str) -> Result<Vec<Iso639Entry>> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| RegistryError::Other("empty ISO 639-3 table".to_string()))?;
    let columns = Columns::from_header(header)?;

    let mut entries = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();
        if let Some(entry) = project_row(&cells, &columns) {
            entries.push(entry);
        }
    }

    entries.extend(reserved_local_use_entries());
    entries.sort_by(|a, b| (&a.name, &a.alpha_3).cmp(&(&b.name, &b.alpha_3)));

    Ok(entries)
}

/// Project one data row, or reject it
fn project_row(cells: &[&str], columns: &Columns) -> Option<Iso639Entry> {
    let id = cell(cells, columns.id)?;
    let language_type = cell(cells, columns.language_type)?;

    if !KEPT_LANGUAGE_TYPES.contains(&language_type.as_str()) {
        return None;
    }
    // The private-use block is synthesized explicitly instead
    if id.starts_with("qaa") {
        return None;
    }

    let part2b = cell(cells, columns.part2b);
    let part2t = cell(cells, columns.part2t);
    let has_639_2 = part2b.is_some();
    let bibliographic = part2b.filter(|code| part2t.as_ref() != Some(code));

    Some(Iso639Entry {
        name: cell(cells, columns.ref_name).unwrap_or_default(),
        alpha_3_to_use: bibliographic.clone().unwrap_or_else(|| id.clone()),
        alpha_3: id,
        alpha_2: cell(cells, columns.part1),
        bibliographic,
        has_639_2,
    })
}

/// The four fixed placeholder entries for the reserved `qaa`..`qad`
/// codes. `has_639_2` is a fixed literal here, reproduced as the
/// generated lists always carried it.
fn reserved_local_use_entries() -> Vec<Iso639Entry> {
    ('a'..='d')
        .map(|letter| {
            let code = format!("qa{letter}");
            Iso639Entry {
                name: format!("Reserved for local use: {code}"),
                alpha_3: code.clone(),
                alpha_3_to_use: code,
                alpha_2: None,
                bibliographic: None,
                has_639_2: true,
            }
        })
        .collect()
}
