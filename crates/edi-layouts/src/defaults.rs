//! Built-in default layouts
//!
//! Field positions transcribed from the PROCEDA NOTFIS/OCOREN manuals as
//! used by Brazilian carriers. Labels are the Portuguese column names the
//! display layer shows verbatim.

use crate::model::{FieldMapping, LayoutDefinition, LayoutSet, RecordDefinition};
use indexmap::IndexMap;

fn f(start: usize, length: usize) -> FieldMapping {
    FieldMapping::new(start, length)
}

fn val(start: usize, length: usize) -> FieldMapping {
    FieldMapping::decimal(start, length)
}

fn record(
    name: &str,
    fields: impl IntoIterator<Item = (&'static str, FieldMapping)>,
) -> RecordDefinition {
    RecordDefinition {
        name: name.to_string(),
        fields: fields
            .into_iter()
            .map(|(label, mapping)| (label.to_string(), mapping))
            .collect(),
    }
}

fn layout(
    name: &str,
    record_width: usize,
    records: impl IntoIterator<Item = (&'static str, RecordDefinition)>,
) -> LayoutDefinition {
    LayoutDefinition {
        name: name.to_string(),
        record_width,
        records: records
            .into_iter()
            .map(|(id, definition)| (id.to_string(), definition))
            .collect(),
    }
}

/// A fresh copy of the built-in layout set.
///
/// Always complete: the four known formats are present in detection
/// priority order (NOTFIS before OCOREN, 5.0 before 3.1).
pub fn default_layouts() -> LayoutSet {
    let mut layouts = IndexMap::new();
    layouts.insert("NOTFIS_5_0".to_string(), notfis_5_0());
    layouts.insert("NOTFIS_3_1".to_string(), notfis_3_1());
    layouts.insert("OCOREN_5_0".to_string(), ocoren_5_0());
    layouts.insert("OCOREN_3_1".to_string(), ocoren_3_1());
    layouts
}

fn notfis_5_0() -> LayoutDefinition {
    layout(
        "NOTFIS 5.0 (320c)",
        320,
        [
            (
                "500",
                record(
                    "Header do Arquivo",
                    [
                        ("Remetente", f(4, 15)),
                        ("Destinatário", f(19, 15)),
                        ("Data Emissão", f(34, 8)),
                        ("Hora", f(42, 8)),
                        ("Versão", f(50, 3)),
                    ],
                ),
            ),
            (
                "501",
                record(
                    "Dados da Nota Fiscal",
                    [
                        ("Série", f(4, 3)),
                        ("Número NF", f(7, 9)),
                        ("Data Emissão", f(16, 8)),
                        ("CNPJ Emitente", f(24, 14)),
                        ("Razão Social", f(53, 60)),
                        ("CFOP", f(113, 5)),
                    ],
                ),
            ),
            (
                "502",
                record(
                    "Destinatário da NF",
                    [
                        ("CNPJ/CPF", f(4, 14)),
                        ("Razão Social", f(33, 60)),
                        ("Endereço", f(93, 60)),
                        ("Bairro", f(153, 40)),
                        ("CEP", f(193, 8)),
                        ("Cidade", f(201, 45)),
                        ("UF", f(246, 2)),
                    ],
                ),
            ),
            (
                "503",
                record(
                    "Totais da NF",
                    [
                        ("Valor Produtos", val(4, 15)),
                        ("Valor Total NF", val(19, 15)),
                        ("Peso Bruto", val(34, 15)),
                        ("Volumes", f(64, 5)),
                    ],
                ),
            ),
            (
                "504",
                record(
                    "Item da NF",
                    [
                        ("Nº Item", f(4, 4)),
                        ("Código Produto", f(8, 25)),
                        ("Descrição", f(33, 80)),
                        ("Quantidade", val(113, 15)),
                        ("Valor Unit", val(134, 15)),
                    ],
                ),
            ),
            (
                "506",
                record(
                    "Chave NFe",
                    [("Chave NFe", f(4, 44)), ("Protocolo", f(48, 15))],
                ),
            ),
            (
                "509",
                record("Trailer do Arquivo", [("Total Registros", f(4, 6))]),
            ),
        ],
    )
}

fn notfis_3_1() -> LayoutDefinition {
    layout(
        "NOTFIS 3.1 (290c)",
        290,
        [
            (
                "310",
                record(
                    "Header do Arquivo",
                    [
                        ("Remetente", f(4, 15)),
                        ("Destinatário", f(19, 15)),
                        ("Data Emissão", f(34, 8)),
                        ("Hora", f(42, 8)),
                        ("Versão", f(50, 3)),
                    ],
                ),
            ),
            (
                "311",
                record(
                    "Entidade 1 (Remetente)",
                    [
                        ("CNPJ/CPF", f(4, 14)),
                        ("IE", f(18, 15)),
                        ("Nome/Razão", f(33, 60)),
                        ("Endereço", f(93, 40)),
                        ("Bairro", f(133, 35)),
                        ("Cidade", f(168, 35)),
                        ("CEP", f(203, 8)),
                        ("UF", f(211, 2)),
                    ],
                ),
            ),
            (
                "312",
                record(
                    "Entidade 2 (Destinatário)",
                    [
                        ("Nome", f(4, 40)),
                        ("CNPJ/CPF", f(44, 14)),
                        ("IE", f(58, 15)),
                        ("Endereço", f(73, 40)),
                        ("Bairro", f(113, 35)),
                        ("Cidade", f(148, 35)),
                        ("CEP", f(183, 8)),
                        ("UF", f(201, 2)),
                        ("Telefone", f(214, 15)),
                    ],
                ),
            ),
            (
                "313",
                record(
                    "Dados da Nota Fiscal",
                    [
                        ("Série", f(4, 23)),
                        ("Número NF", f(27, 10)),
                        ("Data Emissão", f(37, 8)),
                        ("Valor Total", val(45, 15)),
                        ("Peso Bruto", val(60, 15)),
                        ("Volume", f(75, 5)),
                        ("Espécie", f(80, 10)),
                        ("CFOP", f(148, 4)),
                        ("Chave NFe", f(212, 44)),
                    ],
                ),
            ),
            (
                "314",
                record(
                    "Item da NF",
                    [
                        ("Código Produto", f(4, 15)),
                        ("Quantidade", f(19, 15)),
                        ("Descrição", f(34, 60)),
                    ],
                ),
            ),
            (
                "317",
                record(
                    "Entidade 3 (Transportadora)",
                    [
                        ("Nome", f(4, 40)),
                        ("CNPJ/CPF", f(44, 14)),
                        ("IE", f(58, 15)),
                        ("Endereço", f(73, 40)),
                        ("Bairro", f(113, 35)),
                        ("Cidade", f(148, 35)),
                        ("CEP", f(183, 8)),
                        ("UF", f(201, 2)),
                    ],
                ),
            ),
            (
                "333",
                record(
                    "Dados Complementares",
                    [
                        ("Código Serviço", f(4, 5)),
                        ("Serviço Adicional", f(9, 40)),
                        ("Informações", f(49, 152)),
                    ],
                ),
            ),
            (
                "350",
                record("Tracking Code (Intelipost)", [("Tracking Code", f(4, 13))]),
            ),
            (
                "319",
                record("Trailer do Arquivo", [("Total Registros", f(4, 6))]),
            ),
        ],
    )
}

fn ocoren_5_0() -> LayoutDefinition {
    layout(
        "OCOREN 5.0 (320c)",
        320,
        [
            (
                "510",
                record(
                    "Header do Arquivo",
                    [
                        ("Remetente", f(4, 15)),
                        ("Destinatário", f(19, 15)),
                        ("Data", f(34, 8)),
                        ("Hora", f(42, 8)),
                    ],
                ),
            ),
            (
                "511",
                record(
                    "Dados da Ocorrência",
                    [
                        ("Tipo Ocorrência", f(4, 2)),
                        ("Data", f(6, 8)),
                        ("Hora", f(14, 4)),
                        ("CT-e", f(18, 12)),
                        ("Número NF", f(33, 9)),
                        ("Chave NFe", f(45, 44)),
                        ("CNPJ Dest", f(89, 14)),
                    ],
                ),
            ),
            (
                "512",
                record(
                    "Detalhes da Ocorrência",
                    [
                        ("Código Ocorrência", f(4, 5)),
                        ("Descrição", f(9, 100)),
                        ("Recebedor", f(109, 60)),
                        ("Documento", f(169, 14)),
                    ],
                ),
            ),
            (
                "513",
                record(
                    "Valores e Quantidades",
                    [
                        ("Valor Frete", val(4, 15)),
                        ("Peso", val(19, 15)),
                        ("Volumes", f(34, 5)),
                    ],
                ),
            ),
            (
                "519",
                record(
                    "Trailer do Arquivo",
                    [("Total Registros", f(4, 6)), ("Total Ocorrências", f(10, 6))],
                ),
            ),
        ],
    )
}

fn ocoren_3_1() -> LayoutDefinition {
    layout(
        "OCOREN 3.1 (290c)",
        290,
        [
            (
                "410",
                record(
                    "Header do Arquivo",
                    [
                        ("Remetente", f(4, 15)),
                        ("Destinatário", f(19, 15)),
                        ("Data Criação", f(34, 8)),
                        ("Hora", f(42, 8)),
                        ("Versão", f(50, 3)),
                    ],
                ),
            ),
            (
                "411",
                record(
                    "Entidade (Transportadora)",
                    [
                        ("CNPJ/CPF", f(4, 14)),
                        ("IE", f(18, 15)),
                        ("Nome", f(33, 60)),
                        ("Endereço", f(93, 40)),
                        ("Cidade", f(133, 35)),
                        ("UF", f(168, 2)),
                    ],
                ),
            ),
            (
                "412",
                record(
                    "Dados do CT-e",
                    [
                        ("Série CT-e", f(4, 3)),
                        ("Número CT-e", f(7, 12)),
                        ("Data Emissão", f(19, 8)),
                        ("Valor Frete", val(27, 15)),
                        ("Peso", val(42, 15)),
                    ],
                ),
            ),
            (
                "413",
                record(
                    "Dados da Nota Fiscal",
                    [
                        ("Série NF", f(4, 3)),
                        ("Número NF", f(7, 8)),
                        ("Data Emissão", f(15, 8)),
                        ("Valor NF", val(23, 15)),
                        ("Peso", val(38, 15)),
                        ("Volume", f(53, 5)),
                    ],
                ),
            ),
            (
                "420",
                record(
                    "Ocorrência na Entrega",
                    [
                        ("Tipo Ocorrência", f(4, 2)),
                        ("Data Ocorrência", f(6, 8)),
                        ("Hora", f(14, 4)),
                        ("Código Ocorrência", f(18, 5)),
                        ("Descrição", f(23, 100)),
                        ("Nome Recebedor", f(123, 60)),
                        ("Documento", f(183, 14)),
                    ],
                ),
            ),
            (
                "429",
                record(
                    "Trailer do Arquivo",
                    [
                        ("Total Registros", f(4, 6)),
                        ("Total CT-e", f(10, 6)),
                        ("Total Ocorrências", f(16, 6)),
                    ],
                ),
            ),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn four_formats_in_detection_order() {
        let layouts = default_layouts();
        let keys: Vec<_> = layouts.keys().cloned().collect();
        assert_eq!(keys, vec!["NOTFIS_5_0", "NOTFIS_3_1", "OCOREN_5_0", "OCOREN_3_1"]);
    }

    #[test]
    fn record_identifiers_are_three_characters() {
        for layout in default_layouts().values() {
            assert!(layout.record_width > 0);
            for id in layout.records.keys() {
                assert_eq!(id.chars().count(), 3, "bad record id {id:?}");
            }
        }
    }

    #[test]
    fn notfis_5_0_header_fields() {
        let layouts = default_layouts();
        let header = &layouts["NOTFIS_5_0"].records["500"];
        assert_eq!(header.name, "Header do Arquivo");
        assert_eq!(header.fields["Remetente"], FieldMapping::new(4, 15));
        // field order drives output column order
        let labels: Vec<_> = header.fields.keys().cloned().collect();
        assert_eq!(
            labels,
            vec!["Remetente", "Destinatário", "Data Emissão", "Hora", "Versão"]
        );
    }

    #[test]
    fn widths_match_display_names() {
        let layouts = default_layouts();
        assert_eq!(layouts["NOTFIS_5_0"].record_width, 320);
        assert_eq!(layouts["NOTFIS_3_1"].record_width, 290);
        assert_eq!(layouts["OCOREN_5_0"].record_width, 320);
        assert_eq!(layouts["OCOREN_3_1"].record_width, 290);
        for layout in layouts.values() {
            assert!(layout.name.contains(&format!("({}c)", layout.record_width)));
        }
    }
}
