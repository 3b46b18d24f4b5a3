//! Applies a confirmed mapping to every data row of a delimited text.

use std::collections::BTreeSet;

use tracing::debug;

use grc_ingest::{split_delimited, split_records};
use grc_model::{
    Delimiter, FieldKey, FieldMapping, FieldRule, ImportResult, ImportRow, field_for,
    target_fields,
};

use crate::error::ValidateError;

/// Validates all data rows of `text` under `mapping`.
///
/// Fails only for structural problems: a mapping with no usable targets, or
/// with neither required field mapped. Content problems never fail the pass;
/// they accumulate on the affected row. Duplicate target claims in the
/// mapping are tolerated and resolved first-column-wins before anything runs.
///
/// Row numbers are 1-based and count non-blank data lines only; the header
/// line and fully blank lines are dropped without consuming a number.
pub fn validate_rows(
    text: &str,
    mapping: &FieldMapping,
    delimiter: Delimiter,
) -> Result<ImportResult, ValidateError> {
    let mapping = mapping.deduplicated();
    let targets = mapping.mapped_targets();
    if targets.is_empty() {
        return Err(ValidateError::NoMappedFields);
    }
    if !targets.contains(&FieldKey::Code) && !targets.contains(&FieldKey::Name) {
        return Err(ValidateError::MissingRequiredMapping);
    }

    // Records, not raw lines: a quoted cell may span multiple lines.
    let mut lines = split_records(text)
        .into_iter()
        .filter(|line| !line.trim().is_empty());

    // Header cells are kept unfiltered so cell indexes stay aligned.
    let header_cells: Vec<String> = match lines.next() {
        Some(header_line) => split_delimited(header_line, delimiter),
        None => Vec::new(),
    };

    let mut rows = Vec::new();
    let mut seen_codes: BTreeSet<String> = BTreeSet::new();

    for (index, line) in lines.enumerate() {
        let mut row = ImportRow::new(index + 1);

        for (cell_index, cell) in split_delimited(line, delimiter).into_iter().enumerate() {
            let Some(header) = header_cells.get(cell_index) else {
                // Ragged row wider than the header; out-of-schema content is
                // ignored, not an error.
                continue;
            };
            if let Some(target) = mapping.target_for(header) {
                row.values.insert(target, cell);
            }
        }

        check_fields(&mut row);
        check_duplicate_code(&mut row, &mut seen_codes);
        rows.push(row);
    }

    let result = ImportResult::from_rows(rows);
    debug!(
        total = result.total_count,
        valid = result.valid_count,
        invalid = result.invalid_count,
        "validation pass complete"
    );
    Ok(result)
}

fn check_fields(row: &mut ImportRow) {
    for field in target_fields() {
        let value = row.value(field.key);
        if field.required && value.is_none_or(str::is_empty) {
            row.errors.push(format!("{} é obrigatório", field.label));
            continue;
        }
        let Some(raw) = value else {
            continue;
        };
        match field.rule {
            FieldRule::Text => {}
            // An empty cell under a mapped weight column is a range error,
            // not an absent field; nothing coerces to a default.
            FieldRule::IntRange { min, max } => {
                let in_range = raw
                    .parse::<i64>()
                    .is_ok_and(|parsed| (min..=max).contains(&parsed));
                if !in_range {
                    row.errors.push(format!(
                        "{} deve ser um número inteiro entre {min} e {max}",
                        field.label
                    ));
                }
            }
            FieldRule::Integer => {
                if !raw.is_empty() && raw.parse::<i64>().is_err() {
                    row.errors
                        .push(format!("{} deve ser um número inteiro", field.label));
                }
            }
            FieldRule::EnumValues => {
                if !raw.is_empty() && raw.parse::<grc_model::Criticality>().is_err() {
                    row.errors.push(format!(
                        "{} deve ser {}",
                        field.label,
                        join_alternatives(grc_model::Criticality::allowed_values())
                    ));
                }
            }
        }
    }
}

/// File-wide duplicate check on `code`, normalized to trimmed lowercase so
/// case or surrounding-whitespace variants still collide. The first
/// occurrence stays clean; every later one gets the error.
fn check_duplicate_code(row: &mut ImportRow, seen_codes: &mut BTreeSet<String>) {
    let Some(code) = row.value(FieldKey::Code) else {
        return;
    };
    let normalized = code.trim().to_lowercase();
    if normalized.is_empty() {
        return;
    }
    if !seen_codes.insert(normalized) {
        let label = field_for(FieldKey::Code).label;
        row.errors.push(format!("{label} \"{code}\" duplicado"));
    }
}

fn join_alternatives(values: &[&str]) -> String {
    match values {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} ou {}", init.join(", "), last),
    }
}
