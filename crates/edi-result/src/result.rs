//! Parse-result container and per-line records

use crate::issue::LineIssue;
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde::Serialize;

/// One decoded line (fixed-width record or PROCEDA segment).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedLine {
    /// 1-based position among the lines the decoder actually processed.
    pub line_number: usize,
    /// Record-type or segment-tag identifier (normally 3 characters).
    pub identifier: String,
    /// Original line text, trailing whitespace trimmed.
    pub raw: String,
    /// Extracted fields, in layout/extraction order.
    pub fields: IndexMap<String, FieldValue>,
    /// Raw `+`-delimited tokens of a PROCEDA segment, `'` terminators
    /// stripped. `None` for fixed-width records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<String>>,
}

impl ParsedLine {
    /// Build a fixed-width record line.
    pub fn record(
        line_number: usize,
        identifier: impl Into<String>,
        raw: impl Into<String>,
        fields: IndexMap<String, FieldValue>,
    ) -> Self {
        Self {
            line_number,
            identifier: identifier.into(),
            raw: raw.into(),
            fields,
            segments: None,
        }
    }

    /// Build a PROCEDA segment line, preserving its raw tokens.
    pub fn segment(
        line_number: usize,
        identifier: impl Into<String>,
        raw: impl Into<String>,
        fields: IndexMap<String, FieldValue>,
        segments: Vec<String>,
    ) -> Self {
        Self {
            line_number,
            identifier: identifier.into(),
            raw: raw.into(),
            fields,
            segments: Some(segments),
        }
    }
}

/// Uniform output of both decoders.
///
/// `lines` preserves original file order for export; `records` groups the
/// same lines by identifier for tabular display. Per-line problems land in
/// `errors`/`warnings` instead of aborting the parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    /// Detected format name, e.g. `NOTFIS.5.0` or `PROCEDA DELFOR`.
    pub model: String,
    /// Format version, or `N/A` when the file does not carry one.
    pub version: String,
    /// Count of lines parsed as data, after any filtering.
    pub total_lines: usize,
    /// Per-line failures, in encounter order.
    pub errors: Vec<LineIssue>,
    /// Per-line advisories, in encounter order.
    pub warnings: Vec<LineIssue>,
    /// Lines grouped by record/segment identifier, groups in first-seen
    /// order.
    pub records: IndexMap<String, Vec<ParsedLine>>,
    /// All lines in original file order.
    pub lines: Vec<ParsedLine>,
}

impl ParseResult {
    /// Create an empty result for the given model and version.
    pub fn new(model: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            version: version.into(),
            total_lines: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            records: IndexMap::new(),
            lines: Vec::new(),
        }
    }

    /// Append a decoded line to both the flat sequence and its identifier
    /// group.
    pub fn push_line(&mut self, line: ParsedLine) {
        self.records
            .entry(line.identifier.clone())
            .or_default()
            .push(line.clone());
        self.lines.push(line);
    }

    /// Record a per-line failure.
    pub fn push_error(&mut self, issue: LineIssue) {
        self.errors.push(issue);
    }

    /// Record a per-line advisory.
    pub fn push_warning(&mut self, issue: LineIssue) {
        self.warnings.push(issue);
    }

    /// True when no per-line failures were recorded.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_line(n: usize, id: &str) -> ParsedLine {
        let mut fields = IndexMap::new();
        fields.insert("Campo 1".to_string(), FieldValue::from("X"));
        ParsedLine::record(n, id, format!("{id}..."), fields)
    }

    #[test]
    fn push_line_groups_by_identifier_and_keeps_file_order() {
        let mut result = ParseResult::new("NOTFIS.3.1", "3.1");
        result.push_line(sample_line(1, "310"));
        result.push_line(sample_line(2, "313"));
        result.push_line(sample_line(3, "313"));

        assert_eq!(result.lines.len(), 3);
        assert_eq!(result.records["310"].len(), 1);
        assert_eq!(result.records["313"].len(), 2);
        // group order follows first appearance
        let keys: Vec<_> = result.records.keys().cloned().collect();
        assert_eq!(keys, vec!["310", "313"]);
    }

    #[test]
    fn clean_result_has_no_errors() {
        let mut result = ParseResult::new("EDIFACT", "N/A");
        assert!(result.is_clean());
        result.push_error(LineIssue::new(2, "segmento inválido"));
        assert!(!result.is_clean());
    }

    #[test]
    fn fixed_width_lines_omit_segments_in_json() {
        let mut result = ParseResult::new("NOTFIS.5.0", "5.0");
        result.push_line(sample_line(1, "500"));
        let json = serde_json::to_string(&result).unwrap();
        assert!(!json.contains("\"segments\""));
    }
}
