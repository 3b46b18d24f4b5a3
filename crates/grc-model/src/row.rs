//! Validated import rows and the per-pass aggregate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::control::Control;
use crate::schema::{Criticality, FieldKey};

/// One source data row after a mapping has been applied.
///
/// `row_number` is 1-based and counted over non-blank data lines only (the
/// header line is excluded and blank lines do not consume a number).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRow {
    pub row_number: usize,
    /// Raw string values keyed by target field, trimmed. A mapped column
    /// with a blank cell contributes an empty string, not an absent key.
    pub values: BTreeMap<FieldKey, String>,
    /// Human-readable problems found during validation. Empty means valid.
    pub errors: Vec<String>,
}

impl ImportRow {
    #[must_use]
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            values: BTreeMap::new(),
            errors: Vec::new(),
        }
    }

    /// A row is valid exactly when it accumulated no errors.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn value(&self, key: FieldKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Builds the typed commit record, stripping validator bookkeeping.
    ///
    /// Returns `None` for invalid rows or rows missing a required field.
    /// Numeric fields are assumed to have passed validation; values that do
    /// not parse are dropped rather than guessed at.
    #[must_use]
    pub fn to_control(&self) -> Option<Control> {
        if !self.is_valid() {
            return None;
        }
        let code = self.value(FieldKey::Code)?.to_string();
        let name = self.value(FieldKey::Name)?.to_string();
        Some(Control {
            code,
            name,
            category: self.owned_value(FieldKey::Category),
            description: self.owned_value(FieldKey::Description),
            weight: self
                .value(FieldKey::Weight)
                .and_then(|raw| raw.parse::<i64>().ok()),
            criticality: self
                .value(FieldKey::Criticality)
                .and_then(|raw| raw.parse::<Criticality>().ok()),
            weight_reason: self.owned_value(FieldKey::WeightReason),
            implementation_example: self.owned_value(FieldKey::ImplementationExample),
            evidence_example: self.owned_value(FieldKey::EvidenceExample),
            order_index: self
                .value(FieldKey::OrderIndex)
                .and_then(|raw| raw.parse::<i64>().ok()),
        })
    }

    fn owned_value(&self, key: FieldKey) -> Option<String> {
        self.value(key)
            .filter(|raw| !raw.is_empty())
            .map(String::from)
    }
}

/// The aggregate of one validation pass.
///
/// Created fresh on every pass; a new mapping or a new file produces a new
/// result rather than mutating this one. The counts are derivable from the
/// row list but kept for O(1) access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub rows: Vec<ImportRow>,
    pub total_count: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
}

impl ImportResult {
    #[must_use]
    pub fn from_rows(rows: Vec<ImportRow>) -> Self {
        let total_count = rows.len();
        let valid_count = rows.iter().filter(|row| row.is_valid()).count();
        Self {
            rows,
            total_count,
            valid_count,
            invalid_count: total_count - valid_count,
        }
    }

    /// The typed records for every valid row, in file order.
    #[must_use]
    pub fn valid_controls(&self) -> Vec<Control> {
        self.rows.iter().filter_map(ImportRow::to_control).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_follow_rows() {
        let mut ok = ImportRow::new(1);
        ok.values.insert(FieldKey::Code, "A1".to_string());
        ok.values.insert(FieldKey::Name, "Control One".to_string());
        let mut bad = ImportRow::new(2);
        bad.errors.push("Código é obrigatório".to_string());

        let result = ImportResult::from_rows(vec![ok, bad]);
        assert_eq!(result.total_count, 2);
        assert_eq!(result.valid_count, 1);
        assert_eq!(result.invalid_count, 1);
        assert_eq!(result.valid_controls().len(), 1);
    }

    #[test]
    fn to_control_parses_typed_fields() {
        let mut row = ImportRow::new(1);
        row.values.insert(FieldKey::Code, "A1".to_string());
        row.values.insert(FieldKey::Name, "Control One".to_string());
        row.values.insert(FieldKey::Weight, "3".to_string());
        row.values.insert(FieldKey::Criticality, "Alta".to_string());

        let control = row.to_control().unwrap();
        assert_eq!(control.code, "A1");
        assert_eq!(control.weight, Some(3));
        assert_eq!(control.criticality, Some(Criticality::Alta));
        assert_eq!(control.category, None);
    }

    #[test]
    fn invalid_row_yields_no_control() {
        let mut row = ImportRow::new(1);
        row.values.insert(FieldKey::Code, "A1".to_string());
        row.errors.push("Nome é obrigatório".to_string());
        assert!(row.to_control().is_none());
    }
}
