//! Synonym dictionary for the auto-mapper.
//!
//! Static configuration: per target field, the header spellings seen in real
//! spreadsheets, Portuguese and English. Entries are written pre-normalized
//! (lowercase, no separators); comparison happens after
//! [`crate::engine::normalize_text`] on both sides.

use grc_model::FieldKey;

/// Known header aliases for a target field.
#[must_use]
pub fn synonyms_for(key: FieldKey) -> &'static [&'static str] {
    match key {
        FieldKey::Code => &["codigo", "código", "cod", "code", "id", "identificador"],
        FieldKey::Name => &["nome", "name", "titulo", "título", "controle", "control"],
        FieldKey::Category => &[
            "categoria",
            "category",
            "grupo",
            "dominio",
            "domínio",
            "area",
            "área",
        ],
        FieldKey::Description => &[
            "descricao",
            "descrição",
            "description",
            "detalhe",
            "detalhamento",
            "resumo",
        ],
        FieldKey::Weight => &["peso", "weight", "pontuacao", "pontuação", "score"],
        FieldKey::Criticality => &[
            "criticidade",
            "criticality",
            "severidade",
            "severity",
            "prioridade",
            "priority",
        ],
        FieldKey::WeightReason => &[
            "justificativadopeso",
            "justificativa",
            "motivodopeso",
            "razaodopeso",
            "weightreason",
            "reason",
        ],
        FieldKey::ImplementationExample => &[
            "exemplodeimplementacao",
            "exemplodeimplementação",
            "exemploimplementacao",
            "implementacao",
            "implementação",
            "implementation",
        ],
        FieldKey::EvidenceExample => &[
            "exemplodeevidencia",
            "exemplodeevidência",
            "exemploevidencia",
            "evidencia",
            "evidência",
            "evidence",
        ],
        FieldKey::OrderIndex => &[
            "ordem",
            "order",
            "orderindex",
            "ordemexibicao",
            "posicao",
            "posição",
            "sequencia",
        ],
    }
}
