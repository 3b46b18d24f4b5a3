//! Error-type frequency summary shown before commit.

use std::collections::BTreeMap;

use grc_model::{FieldKey, ImportResult, field_for};

/// Counts row errors by type, most frequent first (ties by label).
///
/// Duplicate-code errors embed the offending code in their message; they are
/// collapsed into a single bucket regardless of which code duplicated.
#[must_use]
pub fn error_summary(result: &ImportResult) -> Vec<(String, usize)> {
    let code_label = field_for(FieldKey::Code).label;
    let duplicate_bucket = format!("{code_label} duplicado");

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for row in &result.rows {
        for error in &row.errors {
            let bucket = if error.starts_with(code_label) && error.ends_with("duplicado") {
                duplicate_bucket.clone()
            } else {
                error.clone()
            };
            *counts.entry(bucket).or_insert(0) += 1;
        }
    }

    let mut summary: Vec<(String, usize)> = counts.into_iter().collect();
    summary.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use grc_model::{Delimiter, FieldMapping};

    use crate::validator::validate_rows;

    #[test]
    fn duplicates_collapse_into_one_bucket() {
        let mut mapping = FieldMapping::new();
        mapping.set("codigo", Some(FieldKey::Code));
        mapping.set("nome", Some(FieldKey::Name));
        let text = "codigo,nome\nA1,One\nA1,Two\nB2,Three\nB2,Four\n,Five\n";
        let result = validate_rows(text, &mapping, Delimiter::Comma).unwrap();

        let summary = error_summary(&result);
        assert_eq!(
            summary,
            vec![
                ("Código duplicado".to_string(), 2),
                ("Código é obrigatório".to_string(), 1),
            ]
        );
    }

    #[test]
    fn clean_result_has_empty_summary() {
        let mut mapping = FieldMapping::new();
        mapping.set("codigo", Some(FieldKey::Code));
        mapping.set("nome", Some(FieldKey::Name));
        let result =
            validate_rows("codigo,nome\nA1,One\n", &mapping, Delimiter::Comma).unwrap();
        assert!(error_summary(&result).is_empty());
    }
}
