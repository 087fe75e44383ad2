//! Format detection and decoder dispatch
//!
//! Detection reads the first line that looks like data: longer than 3
//! characters after trimming and not a `000` preamble. `UNB`/`UNH` there
//! means PROCEDA; anything else is matched against the layout set, first
//! requiring the exact record width (strict), then by identifier alone
//! (tolerant — width mismatches surface later as per-line warnings).

use crate::{Error, Result};
use edi_adapter_fixed::parse_fixed;
use edi_adapter_proceda::parse_proceda;
use edi_layouts::{LayoutSet, format_id};
use edi_result::ParseResult;
use tracing::debug;

/// Detect the format of `content` and decode it.
///
/// Fatal when the file has no parseable lines at all or when no layout
/// matches the leading identifier. Which layout wins a shared identifier
/// is decided by layout-set iteration order; this is implementation-defined
/// ordering, not a guaranteed priority.
pub fn detect(content: &str, layouts: &LayoutSet) -> Result<ParseResult> {
    let lines = split_lines(content);

    let Some(candidate) = lines
        .iter()
        .copied()
        .find(|line| line.trim().chars().count() > 3 && !line.starts_with("000"))
    else {
        return detect_from_preamble(&lines, layouts);
    };

    let cleaned = candidate.trim_end();
    let identifier: String = cleaned.chars().take(3).collect();

    if identifier == "UNB" || identifier == "UNH" {
        debug!("interchange/message header found, dispatching to PROCEDA");
        return Ok(parse_proceda(&lines));
    }

    let width = cleaned.chars().count();

    // strict pass: identifier and exact record width
    let strict = layouts
        .iter()
        .find(|(_, layout)| {
            layout.records.contains_key(&identifier) && layout.record_width == width
        })
        .map(|(key, _)| format_id(key));

    // tolerant pass: identifier alone; the chosen layout's width may not
    // match the file, which downstream reports as per-line warnings
    let model = strict.or_else(|| {
        layouts
            .iter()
            .find(|(_, layout)| layout.records.contains_key(&identifier))
            .map(|(key, layout)| {
                debug!(
                    layout = key.as_str(),
                    expected = layout.record_width,
                    observed = width,
                    "tolerant detection: identifier matched but width did not"
                );
                format_id(key)
            })
    });

    match model {
        Some(format) => {
            debug!(format = format.as_str(), "fixed-width format detected");
            Ok(parse_fixed(&lines, &format, layouts)?)
        }
        None => Err(Error::UnrecognizedFormat { identifier, length: width }),
    }
}

/// Decode `content` as the caller-supplied format, bypassing detection.
pub fn detect_with_format(content: &str, format: &str, layouts: &LayoutSet) -> Result<ParseResult> {
    let lines = split_lines(content);
    if format.contains("PROCEDA") || format.contains("EDIFACT") {
        return Ok(parse_proceda(&lines));
    }
    Ok(parse_fixed(&lines, format, layouts)?)
}

/// Last resort for files whose every line is a `000` preamble: the header
/// itself sometimes names the message type.
fn detect_from_preamble(lines: &[&str], layouts: &LayoutSet) -> Result<ParseResult> {
    if let Some(header) = lines.iter().find(|line| line.starts_with("000")) {
        if header.contains("NOT") {
            return Ok(parse_fixed(lines, "NOTFIS.3.1", layouts)?);
        }
        if header.contains("OCO") {
            return Ok(parse_fixed(lines, "OCOREN.3.1", layouts)?);
        }
    }
    Err(Error::EmptyFile)
}

/// Split on `\r?\n`, like the upload layer the buffer came from.
fn split_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_layouts::default_layouts;

    #[test]
    fn unb_line_dispatches_to_proceda() {
        let layouts = default_layouts();
        let content = "UNB+UNOA:1+REMETENTE+DESTINO+260801:1200'\nUNH+1+INVRPT:D:96A:UN'\n";
        let result = detect(content, &layouts).unwrap();
        assert_eq!(result.model, "PROCEDA INVRPT");
    }

    #[test]
    fn empty_content_is_fatal() {
        let layouts = default_layouts();
        assert!(matches!(detect("", &layouts), Err(Error::EmptyFile)));
        assert!(matches!(detect("\n\n  \n", &layouts), Err(Error::EmptyFile)));
    }

    #[test]
    fn unknown_identifier_is_fatal_and_names_it() {
        let layouts = default_layouts();
        let content = format!("ZZZ{}", "X".repeat(287));
        let error = detect(&content, &layouts).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("ZZZ"));
        assert!(message.contains("290"));
    }

    #[test]
    fn crlf_terminators_are_accepted() {
        let layouts = default_layouts();
        let content = "UNH+1+DELJIT:D:96A:UN'\r\nUNT+2+1'\r\n";
        let result = detect(content, &layouts).unwrap();
        assert_eq!(result.model, "PROCEDA DELJIT");
        assert_eq!(result.lines[0].raw, "UNH+1+DELJIT:D:96A:UN'");
    }
}
