//! Per-tag field extraction table
//!
//! Each known segment tag maps to a pure function from the segment's raw
//! tokens to an ordered label/value map. The table is built once and the
//! decoder's control flow never changes when a tag is added: unknown tags
//! hit the numbered-field fallback.

use edi_result::FieldValue;
use indexmap::IndexMap;
use std::collections::HashMap;

/// A pure extraction function: raw `+`-split tokens in, ordered fields out.
///
/// Token 0 is the tag itself; element positions follow the PROCEDA usage of
/// each segment. Missing tokens extract as empty strings.
pub type Extractor = fn(&[String]) -> IndexMap<String, FieldValue>;

/// Extraction table over the known segment tags.
pub struct SegmentTable {
    extractors: HashMap<&'static str, Extractor>,
}

impl SegmentTable {
    /// The standard table: interchange/message envelopes, document header,
    /// date/time, name/address, line item, quantity, and reference
    /// segments.
    pub fn standard() -> Self {
        let mut extractors: HashMap<&'static str, Extractor> = HashMap::new();
        extractors.insert("UNB", extract_unb);
        extractors.insert("UNH", extract_unh);
        extractors.insert("BGM", extract_bgm);
        extractors.insert("DTM", extract_dtm);
        extractors.insert("NAD", extract_nad);
        extractors.insert("LIN", extract_lin);
        extractors.insert("QTY", extract_qty);
        extractors.insert("RFF", extract_rff);
        extractors.insert("UNT", extract_unt);
        extractors.insert("UNZ", extract_unz);
        Self { extractors }
    }

    /// Extract the fields of one segment, falling back to numbered-field
    /// capture for tags the table does not know.
    pub fn extract(&self, tag: &str, tokens: &[String]) -> IndexMap<String, FieldValue> {
        match self.extractors.get(tag) {
            Some(extractor) => extractor(tokens),
            None => numbered_fields(tokens),
        }
    }
}

impl Default for SegmentTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Whole token at `index`, or empty.
fn token(tokens: &[String], index: usize) -> String {
    tokens.get(index).cloned().unwrap_or_default()
}

/// `:`-separated component `comp` of the token at `index`, or empty.
fn component(tokens: &[String], index: usize, comp: usize) -> String {
    tokens
        .get(index)
        .and_then(|t| t.split(':').nth(comp))
        .unwrap_or_default()
        .to_string()
}

fn fields<const N: usize>(entries: [(&str, String); N]) -> IndexMap<String, FieldValue> {
    entries
        .into_iter()
        .map(|(label, value)| (label.to_string(), FieldValue::Text(value)))
        .collect()
}

fn extract_unb(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Remetente", token(tokens, 2)),
        ("Destinatário", token(tokens, 3)),
        ("Data/Hora", token(tokens, 4)),
    ])
}

fn extract_unh(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Número Mensagem", token(tokens, 1)),
        ("Tipo Mensagem", token(tokens, 2)),
    ])
}

fn extract_bgm(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Tipo Documento", token(tokens, 1)),
        ("Número Documento", token(tokens, 2)),
    ])
}

fn extract_dtm(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Qualificador", component(tokens, 1, 0)),
        ("Data/Hora", component(tokens, 1, 1)),
    ])
}

fn extract_nad(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Qualificador", token(tokens, 1)),
        ("Código", component(tokens, 2, 0)),
        ("Nome", token(tokens, 3)),
    ])
}

fn extract_lin(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Número Linha", token(tokens, 1)),
        ("Código Item", component(tokens, 3, 0)),
    ])
}

fn extract_qty(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Qualificador", component(tokens, 1, 0)),
        ("Quantidade", component(tokens, 1, 1)),
    ])
}

fn extract_rff(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([
        ("Qualificador", component(tokens, 1, 0)),
        ("Referência", component(tokens, 1, 1)),
    ])
}

fn extract_unt(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([("Total Segmentos", token(tokens, 1))])
}

fn extract_unz(tokens: &[String]) -> IndexMap<String, FieldValue> {
    fields([("Total Mensagens", token(tokens, 1))])
}

/// Fallback for unknown tags: every non-empty token after the tag becomes
/// `Campo N`.
fn numbered_fields(tokens: &[String]) -> IndexMap<String, FieldValue> {
    let mut map = IndexMap::new();
    for (index, value) in tokens.iter().enumerate() {
        if index > 0 && !value.is_empty() {
            map.insert(format!("Campo {index}"), FieldValue::Text(value.clone()));
        }
    }
    map
}
