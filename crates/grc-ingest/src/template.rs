//! Import template generation.

use grc_model::target_fields;

use crate::error::IngestError;

/// Builds the downloadable CSV template: catalog labels as headers, in
/// schema order, plus one illustrative row.
pub fn template_csv() -> Result<String, IngestError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let labels: Vec<&str> = target_fields().iter().map(|field| field.label).collect();
    writer.write_record(&labels)?;
    writer.write_record([
        "CTRL-001",
        "Política de Segurança da Informação",
        "Governança",
        "Define as diretrizes de segurança da organização",
        "5",
        "alta",
        "Controle base do programa de segurança",
        "Política aprovada pela diretoria",
        "Documento publicado na intranet",
        "1",
    ])?;

    let bytes = writer
        .into_inner()
        .map_err(|err| IngestError::InvalidWorkbook(err.to_string()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
