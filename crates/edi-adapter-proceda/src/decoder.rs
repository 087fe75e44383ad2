//! PROCEDA segment decoding
//!
//! The message sub-type is read from the first `UNH` segment; the version
//! is the `D:<digits><letter>` token of the same line. Neither is required:
//! a file without a `UNH` still decodes, reported as plain `EDIFACT`.

use crate::extract::SegmentTable;
use edi_result::{LineIssue, ParseResult, ParsedLine};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static VERSION_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"D:(\d+[A-Z])").expect("version pattern"));

/// Message sub-types recognized in the UNH header, checked in order.
const MESSAGE_TYPES: [&str; 5] = ["DELFOR", "DELJIT", "DESADV", "INVOIC", "INVRPT"];

/// Decode `lines` as a PROCEDA/EDIFACT interchange.
///
/// Every line is processed; there is no preamble or blank-line filtering.
/// Lines shorter than 3 characters yield their degenerate identifier as-is
/// (an empty line groups under the empty identifier), consistent with the
/// tolerant posture of the rest of the decoder.
pub fn parse_proceda(lines: &[&str]) -> ParseResult {
    let table = SegmentTable::standard();
    let mut result = ParseResult::new("EDIFACT", "N/A");
    result.total_lines = lines.len();

    if let Some(unh_line) = lines.iter().find(|line| line.starts_with("UNH")) {
        if let Some(message_type) = MESSAGE_TYPES
            .iter()
            .find(|candidate| unh_line.contains(*candidate))
        {
            result.model = format!("PROCEDA {message_type}");
        }
        if let Some(captures) = VERSION_TOKEN.captures(unh_line) {
            result.version = captures[1].to_string();
        }
    }

    for (index, raw_line) in lines.iter().enumerate() {
        let line_number = index + 1;
        match decode_segment(line_number, raw_line.trim_end(), &table) {
            Ok(parsed) => result.push_line(parsed),
            Err(issue) => result.push_error(issue),
        }
    }

    debug!(
        model = %result.model,
        version = %result.version,
        lines = result.total_lines,
        "PROCEDA file decoded"
    );
    result
}

fn decode_segment(
    line_number: usize,
    line: &str,
    table: &SegmentTable,
) -> std::result::Result<ParsedLine, LineIssue> {
    let tag: String = line.chars().take(3).collect();
    let tokens: Vec<String> = line
        .split('+')
        .map(|token| token.replace('\'', ""))
        .collect();

    let fields = table.extract(&tag, &tokens);
    Ok(ParsedLine::segment(line_number, tag, line, fields, tokens))
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_result::FieldValue;

    #[test]
    fn unh_sets_model_version_and_message_number() {
        let result = parse_proceda(&["UNH+1+DELFOR:D:96A:UN:EAN008'"]);

        assert_eq!(result.model, "PROCEDA DELFOR");
        assert_eq!(result.version, "96A");
        assert_eq!(result.total_lines, 1);

        let parsed = &result.lines[0];
        assert_eq!(parsed.identifier, "UNH");
        assert_eq!(parsed.fields["Número Mensagem"], FieldValue::Text("1".into()));
        assert_eq!(
            parsed.fields["Tipo Mensagem"],
            FieldValue::Text("DELFOR:D:96A:UN:EAN008".into())
        );
    }

    #[test]
    fn file_without_unh_stays_generic_edifact() {
        let result = parse_proceda(&["UNB+UNOA:1+REMETENTE+DESTINO+260801:1200'"]);
        assert_eq!(result.model, "EDIFACT");
        assert_eq!(result.version, "N/A");
    }

    #[test]
    fn apostrophe_terminators_are_stripped_from_tokens() {
        let result = parse_proceda(&["UNT+5+1'"]);
        let parsed = &result.lines[0];
        assert_eq!(parsed.fields["Total Segmentos"], FieldValue::Text("5".into()));
        assert_eq!(
            parsed.segments.as_deref(),
            Some(&["UNT".to_string(), "5".to_string(), "1".to_string()][..])
        );
    }

    #[test]
    fn full_message_groups_segments_by_tag() {
        let lines = [
            "UNB+UNOA:1+REMETENTE+DESTINO+260801:1200'",
            "UNH+1+DESADV:D:96A:UN'",
            "BGM+351+40001234+9'",
            "DTM+137:20260801:102'",
            "LIN+1++7891234567890:EN'",
            "QTY+12:100'",
            "LIN+2++7899876543210:EN'",
            "QTY+12:40'",
            "UNT+8+1'",
            "UNZ+1+1'",
        ];
        let result = parse_proceda(&lines);

        assert_eq!(result.model, "PROCEDA DESADV");
        assert_eq!(result.total_lines, 10);
        assert!(result.is_clean());
        assert_eq!(result.records["LIN"].len(), 2);
        assert_eq!(result.records["QTY"].len(), 2);
        assert_eq!(
            result.records["LIN"][0].fields["Código Item"],
            FieldValue::Text("7891234567890".into())
        );
        // flat sequence preserves file order
        let ids: Vec<_> = result.lines.iter().map(|l| l.identifier.as_str()).collect();
        assert_eq!(
            ids,
            vec!["UNB", "UNH", "BGM", "DTM", "LIN", "QTY", "LIN", "QTY", "UNT", "UNZ"]
        );
    }

    #[test]
    fn unknown_tag_falls_back_to_numbered_capture() {
        let result = parse_proceda(&["FTX+AAI++observação de entrega'"]);
        let parsed = &result.lines[0];
        assert_eq!(parsed.fields["Campo 1"], FieldValue::Text("AAI".into()));
        assert_eq!(
            parsed.fields["Campo 3"],
            FieldValue::Text("observação de entrega".into())
        );
    }

    #[test]
    fn degenerate_short_lines_are_tolerated() {
        let result = parse_proceda(&["AB", ""]);

        assert_eq!(result.total_lines, 2);
        assert_eq!(result.lines[0].identifier, "AB");
        assert_eq!(result.lines[1].identifier, "");
        assert!(result.records.contains_key(""));
    }

    #[test]
    fn version_defaults_when_unh_carries_no_token() {
        let result = parse_proceda(&["UNH+1+DELJIT'"]);
        assert_eq!(result.model, "PROCEDA DELJIT");
        assert_eq!(result.version, "N/A");
    }
}
