//! Record/segment display-name resolution

use edi_layouts::{LayoutSet, layout_key};

/// Resolve a record/segment identifier to its display label.
///
/// Fixed-width models resolve through the layout set; PROCEDA/EDIFACT
/// models fall back to the standard segment-name table. Unknown
/// identifiers get a generic `Segmento`/`Registro` label, never an error.
pub fn record_name(identifier: &str, model: &str, layouts: &LayoutSet) -> String {
    if let Some(record) = layouts
        .get(&layout_key(model))
        .and_then(|layout| layout.records.get(identifier))
    {
        return record.name.clone();
    }

    if model.contains("PROCEDA") || model.contains("EDIFACT") {
        return segment_name(identifier)
            .map_or_else(|| format!("Segmento {identifier}"), ToString::to_string);
    }

    format!("Registro {identifier}")
}

fn segment_name(tag: &str) -> Option<&'static str> {
    match tag {
        "UNB" => Some("Cabeçalho de Intercâmbio"),
        "UNH" => Some("Cabeçalho de Mensagem"),
        "BGM" => Some("Início da Mensagem"),
        "DTM" => Some("Data/Hora"),
        "NAD" => Some("Nome e Endereço"),
        "LIN" => Some("Item de Linha"),
        "QTY" => Some("Quantidade"),
        "PRI" => Some("Preço"),
        "RFF" => Some("Referência"),
        "UNT" => Some("Fim da Mensagem"),
        "UNZ" => Some("Fim do Intercâmbio"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edi_layouts::default_layouts;

    #[test]
    fn fixed_width_records_resolve_through_the_layout_set() {
        let layouts = default_layouts();
        assert_eq!(
            record_name("500", "NOTFIS.5.0", &layouts),
            "Header do Arquivo"
        );
        assert_eq!(
            record_name("420", "OCOREN.3.1", &layouts),
            "Ocorrência na Entrega"
        );
    }

    #[test]
    fn proceda_models_use_the_segment_table() {
        let layouts = default_layouts();
        assert_eq!(
            record_name("NAD", "PROCEDA DELFOR", &layouts),
            "Nome e Endereço"
        );
        assert_eq!(record_name("UNZ", "EDIFACT", &layouts), "Fim do Intercâmbio");
        assert_eq!(record_name("FTX", "EDIFACT", &layouts), "Segmento FTX");
    }

    #[test]
    fn unknown_fixed_width_identifiers_get_a_generic_label() {
        let layouts = default_layouts();
        assert_eq!(record_name("599", "NOTFIS.5.0", &layouts), "Registro 599");
        assert_eq!(record_name("123", "DESCONHECIDO", &layouts), "Registro 123");
    }
}
