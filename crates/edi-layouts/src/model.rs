//! Layout model definitions
//!
//! Positions follow the convention of the printed NOTFIS/OCOREN manuals:
//! 1-based, counted in characters. A field at `pos: 4, len: 15` covers
//! characters 4 through 18 inclusive.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The merged set of known layouts, keyed by layout key (`NOTFIS_5_0`,
/// `OCOREN_3_1`, ...).
///
/// Iteration order is insertion order; format detection walks it front to
/// back, so earlier layouts win ties.
pub type LayoutSet = IndexMap<String, LayoutDefinition>;

/// One fixed-width file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDefinition {
    /// Display label, carrying the version/width annotation, e.g.
    /// `NOTFIS 5.0 (320c)`.
    pub name: String,
    /// Exact expected character width of every data line.
    pub record_width: usize,
    /// Record definitions keyed by their 3-character identifier.
    pub records: IndexMap<String, RecordDefinition>,
}

/// One record type within a layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDefinition {
    /// Human-readable label shown next to the record identifier.
    pub name: String,
    /// Field mappings in output-column order.
    pub fields: IndexMap<String, FieldMapping>,
}

/// How to slice one field out of a fixed-width line.
///
/// Serialized with the historical `pos`/`len` key names so persisted
/// override documents stay compatible with the layout-editing UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    /// 1-based character offset where the field begins.
    #[serde(rename = "pos")]
    pub start: usize,
    /// Number of characters to extract.
    #[serde(rename = "len")]
    pub length: usize,
    /// Optional value reinterpretation applied after slicing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

/// Value reinterpretation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueFormat {
    /// Fixed-point decimal with an implied 2-decimal-place suffix.
    #[serde(rename = "valor")]
    Decimal,
}

impl FieldMapping {
    /// Plain text field at the given 1-based position.
    pub fn new(start: usize, length: usize) -> Self {
        Self {
            start,
            length,
            format: None,
        }
    }

    /// Implied-decimal field at the given 1-based position.
    pub fn decimal(start: usize, length: usize) -> Self {
        Self {
            start,
            length,
            format: Some(ValueFormat::Decimal),
        }
    }

    /// Slice this field out of `line`, char-accurately.
    ///
    /// Slices past the end of the line are truncated; a start position past
    /// the end yields an empty string. The caller trims and reinterprets.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let start = self.start.saturating_sub(1);
        let Some((begin, _)) = line.char_indices().nth(start) else {
            return "";
        };
        let end = line
            .char_indices()
            .nth(start + self.length)
            .map_or(line.len(), |(i, _)| i);
        &line[begin..end]
    }
}

/// Normalize a format identifier (`NOTFIS.5.0`) to its layout key
/// (`NOTFIS_5_0`).
pub fn layout_key(format: &str) -> String {
    format.replace('.', "_")
}

/// Render a layout key (`NOTFIS_5_0`) as its format identifier
/// (`NOTFIS.5.0`).
pub fn format_id(key: &str) -> String {
    key.replace('_', ".")
}
