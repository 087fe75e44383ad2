//! Fixed-width line decoding
//!
//! Mirrors how carriers actually emit these files: a `000` preamble line,
//! data lines of a nominal fixed width that are frequently short or
//! overlong, and the occasional record type newer than the layout in use.
//! Decoding therefore favors extracting as much as possible over failing
//! fast.

use crate::numeric::unpack_decimal;
use crate::{Error, Result};
use edi_layouts::{LayoutDefinition, LayoutSet, RecordDefinition, ValueFormat, layout_key};
use edi_result::{FieldValue, LineIssue, ParseResult, ParsedLine};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static NAME_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("annotation pattern"));

/// Catch-all label for records the layout does not know.
const FALLBACK_LABEL: &str = "Conteúdo";

/// Decode `lines` as the fixed-width format named by `format`
/// (e.g. `NOTFIS.5.0`).
///
/// Fatal only when `format` resolves to no layout in `layouts`. Blank lines
/// and `000` preamble lines are dropped before counting; every surviving
/// line contributes to the result even when its width is wrong or its
/// record type is unknown.
pub fn parse_fixed(lines: &[&str], format: &str, layouts: &LayoutSet) -> Result<ParseResult> {
    let key = layout_key(format);
    let layout = layouts
        .get(&key)
        .ok_or_else(|| Error::LayoutNotFound(format.to_string()))?;

    let mut result = ParseResult::new(format, layout_version(layout, format));
    let expected = layout.record_width;

    let data_lines: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with("000")
        })
        .collect();
    result.total_lines = data_lines.len();

    for (index, raw_line) in data_lines.iter().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim_end();

        let width = line.chars().count();
        if width != expected {
            result.push_warning(LineIssue::new(
                line_number,
                format!("tamanho {width} (esperado {expected})"),
            ));
        }

        match decode_line(line_number, line, layout) {
            Ok(parsed) => result.push_line(parsed),
            Err(issue) => result.push_error(issue),
        }
    }

    debug!(
        model = %result.model,
        lines = result.total_lines,
        warnings = result.warnings.len(),
        "fixed-width file decoded"
    );
    Ok(result)
}

/// Version label shown next to the model: the parenthesized annotation of
/// the layout display name, falling back to the version substring of the
/// format identifier.
fn layout_version(layout: &LayoutDefinition, format: &str) -> String {
    if let Some(captures) = NAME_ANNOTATION.captures(&layout.name) {
        return captures[1].to_string();
    }
    if format.contains("5.0") { "5.0" } else { "3.1" }.to_string()
}

fn decode_line(
    line_number: usize,
    line: &str,
    layout: &LayoutDefinition,
) -> std::result::Result<ParsedLine, LineIssue> {
    let identifier: String = line.chars().take(3).collect();

    let fields = match layout.records.get(&identifier) {
        Some(record) => extract_fields(line, record),
        None => fallback_content(line),
    };

    Ok(ParsedLine::record(line_number, identifier, line, fields))
}

fn extract_fields(line: &str, record: &RecordDefinition) -> IndexMap<String, FieldValue> {
    let mut fields = IndexMap::with_capacity(record.fields.len());
    for (label, mapping) in &record.fields {
        let raw = mapping.slice(line).trim();
        let value = match mapping.format {
            Some(ValueFormat::Decimal) => FieldValue::Number(unpack_decimal(raw)),
            None => FieldValue::Text(raw.to_string()),
        };
        fields.insert(label.clone(), value);
    }
    fields
}

/// Unknown record types degrade to a single trimmed content capture of at
/// most 97 characters of body, ellipsis-suffixed when the line runs longer.
fn fallback_content(line: &str) -> IndexMap<String, FieldValue> {
    let width = line.chars().count();
    let body: String = line.chars().skip(3).take(97).collect();
    let mut content = body.trim().to_string();
    if width > 100 {
        content.push_str("...");
    }

    let mut fields = IndexMap::new();
    fields.insert(FALLBACK_LABEL.to_string(), FieldValue::Text(content));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_layouts::default_layouts;

    /// Build a fixed-width line by writing `parts` at their 1-based
    /// positions into a space-padded buffer.
    fn fixed_line(width: usize, parts: &[(usize, &str)]) -> String {
        let mut buffer = vec![' '; width];
        for (pos, text) in parts {
            for (offset, ch) in text.chars().enumerate() {
                buffer[pos - 1 + offset] = ch;
            }
        }
        buffer.into_iter().collect()
    }

    /// A full-width header line; the filler at the last column keeps the
    /// nominal width through trailing-whitespace trimming, like real files
    /// whose final field is populated.
    fn notfis_5_0_header() -> String {
        fixed_line(
            320,
            &[
                (1, "500"),
                (4, "REMETENTE1"),
                (19, "DESTINO LTDA"),
                (34, "01082026"),
                (42, "12:00:00"),
                (50, "5.0"),
                (320, "X"),
            ],
        )
    }

    #[test]
    fn header_record_extracts_named_fields() {
        let layouts = default_layouts();
        let line = notfis_5_0_header();
        let result = parse_fixed(&[line.as_str()], "NOTFIS.5.0", &layouts).unwrap();

        assert_eq!(result.model, "NOTFIS.5.0");
        assert_eq!(result.version, "320c");
        assert_eq!(result.total_lines, 1);
        assert!(result.warnings.is_empty());

        let parsed = &result.lines[0];
        assert_eq!(parsed.identifier, "500");
        assert_eq!(
            parsed.fields["Remetente"],
            FieldValue::Text("REMETENTE1".to_string())
        );
        assert_eq!(
            parsed.fields["Destinatário"],
            FieldValue::Text("DESTINO LTDA".to_string())
        );
    }

    #[test]
    fn preamble_and_blank_lines_are_not_data() {
        let layouts = default_layouts();
        let header = notfis_5_0_header();
        let lines = ["000NOTFIS ENVIO", "", "   ", header.as_str()];

        let result = parse_fixed(&lines, "NOTFIS.5.0", &layouts).unwrap();
        assert_eq!(result.total_lines, 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn width_mismatch_warns_but_still_extracts() {
        let layouts = default_layouts();
        let full = notfis_5_0_header();
        // four full lines, then a fifth that is only 280 characters wide
        let short = fixed_line(280, &[(1, "500"), (4, "REMETENTE1"), (280, "X")]);
        let lines = [
            full.as_str(),
            full.as_str(),
            full.as_str(),
            full.as_str(),
            short.as_str(),
        ];

        let result = parse_fixed(&lines, "NOTFIS.5.0", &layouts).unwrap();
        assert_eq!(result.total_lines, 5);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].line, 5);
        assert!(result.warnings[0].message.contains("280"));

        // line 5 still produced a record with its fields extracted
        let parsed = &result.lines[4];
        assert_eq!(parsed.line_number, 5);
        assert_eq!(
            parsed.fields["Remetente"],
            FieldValue::Text("REMETENTE1".to_string())
        );
    }

    #[test]
    fn slices_past_line_end_yield_empty_or_zero_fields() {
        let layouts = default_layouts();
        // a 503 totals record cut before the "Volumes" column
        let full = fixed_line(
            320,
            &[(1, "503"), (4, "000000000001050"), (64, "00002")],
        );
        let short: String = full.chars().take(40).collect();

        let result = parse_fixed(&[short.as_str()], "NOTFIS.5.0", &layouts).unwrap();
        let parsed = &result.lines[0];
        assert_eq!(parsed.fields["Valor Produtos"], FieldValue::Number(10.50));
        assert_eq!(parsed.fields["Volumes"], FieldValue::Text(String::new()));
        // truncated decimal field unpacks whatever characters survived
        assert_eq!(parsed.fields["Peso Bruto"], FieldValue::Number(0.0));
    }

    #[test]
    fn unknown_record_type_degrades_to_content_capture() {
        let layouts = default_layouts();
        let line = fixed_line(320, &[(1, "599"), (4, "CONTEUDO LIVRE"), (320, "X")]);

        let result = parse_fixed(&[line.as_str()], "NOTFIS.5.0", &layouts).unwrap();
        let parsed = &result.lines[0];
        assert_eq!(parsed.identifier, "599");
        let content = parsed.fields["Conteúdo"].as_text().unwrap();
        assert!(content.starts_with("CONTEUDO LIVRE"));
        assert!(content.ends_with("..."));
    }

    #[test]
    fn unknown_format_key_is_fatal_and_names_the_key() {
        let layouts = default_layouts();
        let error = parse_fixed(&["500"], "NOTFIS.9.9", &layouts).unwrap_err();
        assert!(error.to_string().contains("NOTFIS.9.9"));
    }

    #[test]
    fn text_fields_round_trip_against_the_raw_line() {
        let layouts = default_layouts();
        let line = notfis_5_0_header();
        let result = parse_fixed(&[line.as_str()], "NOTFIS.5.0", &layouts).unwrap();

        let parsed = &result.lines[0];
        let record = &layouts["NOTFIS_5_0"].records["500"];
        for (label, mapping) in &record.fields {
            assert_eq!(
                parsed.fields[label],
                FieldValue::Text(mapping.slice(&parsed.raw).trim().to_string()),
                "field {label} does not round-trip"
            );
        }
    }

    #[test]
    fn version_falls_back_to_format_substring() {
        let mut layouts = default_layouts();
        layouts.get_mut("NOTFIS_5_0").unwrap().name = "NOTFIS 5.0".to_string();
        let line = notfis_5_0_header();

        let result = parse_fixed(&[line.as_str()], "NOTFIS.5.0", &layouts).unwrap();
        assert_eq!(result.version, "5.0");
    }

    #[test]
    fn records_group_by_identifier_in_first_seen_order() {
        let layouts = default_layouts();
        let header = notfis_5_0_header();
        let totals = fixed_line(320, &[(1, "503"), (4, "000000000001050")]);
        let lines = [header.as_str(), totals.as_str(), totals.as_str()];

        let result = parse_fixed(&lines, "NOTFIS.5.0", &layouts).unwrap();
        let keys: Vec<_> = result.records.keys().cloned().collect();
        assert_eq!(keys, vec!["500", "503"]);
        assert_eq!(result.records["503"].len(), 2);
        assert_eq!(result.lines.len(), 3);
    }
}
