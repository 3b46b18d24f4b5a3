//! The canonical field catalog for imported controls.
//!
//! The catalog is immutable build-time configuration: ten fields in a fixed
//! order, two of them required. Everything the validator and the auto-mapper
//! know about target fields comes from here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Canonical target field keys, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    Code,
    Name,
    Category,
    Description,
    Weight,
    Criticality,
    WeightReason,
    ImplementationExample,
    EvidenceExample,
    OrderIndex,
}

impl FieldKey {
    /// Stable snake_case string form, matching the serde representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Name => "name",
            Self::Category => "category",
            Self::Description => "description",
            Self::Weight => "weight",
            Self::Criticality => "criticality",
            Self::WeightReason => "weight_reason",
            Self::ImplementationExample => "implementation_example",
            Self::EvidenceExample => "evidence_example",
            Self::OrderIndex => "order_index",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "code" => Ok(Self::Code),
            "name" => Ok(Self::Name),
            "category" => Ok(Self::Category),
            "description" => Ok(Self::Description),
            "weight" => Ok(Self::Weight),
            "criticality" => Ok(Self::Criticality),
            "weight_reason" => Ok(Self::WeightReason),
            "implementation_example" => Ok(Self::ImplementationExample),
            "evidence_example" => Ok(Self::EvidenceExample),
            "order_index" => Ok(Self::OrderIndex),
            other => Err(ModelError::UnknownFieldKey(other.to_string())),
        }
    }
}

/// Criticality levels accepted for the `criticality` field.
///
/// Parsed case-insensitively from the Portuguese values used in source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Baixa,
    Media,
    Alta,
}

impl Criticality {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Baixa => "baixa",
            Self::Media => "media",
            Self::Alta => "alta",
        }
    }

    /// All accepted values, in ascending severity order.
    #[must_use]
    pub fn allowed_values() -> &'static [&'static str] {
        &["baixa", "media", "alta"]
    }
}

impl FromStr for Criticality {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "baixa" => Ok(Self::Baixa),
            "media" => Ok(Self::Media),
            "alta" => Ok(Self::Alta),
            other => Err(ModelError::InvalidCriticality(other.to_string())),
        }
    }
}

/// Validation rule attached to a target field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Free text, no constraint beyond the required flag.
    Text,
    /// Base-10 integer within an inclusive range.
    IntRange { min: i64, max: i64 },
    /// Base-10 integer, unbounded.
    Integer,
    /// One of the [`Criticality`] values.
    EnumValues,
}

/// One entry of the canonical field catalog.
#[derive(Debug, Clone, Copy)]
pub struct TargetField {
    pub key: FieldKey,
    /// Human label, used in headers and error messages.
    pub label: &'static str,
    pub required: bool,
    pub rule: FieldRule,
}

const TARGET_FIELDS: &[TargetField] = &[
    TargetField {
        key: FieldKey::Code,
        label: "Código",
        required: true,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::Name,
        label: "Nome",
        required: true,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::Category,
        label: "Categoria",
        required: false,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::Description,
        label: "Descrição",
        required: false,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::Weight,
        label: "Peso",
        required: false,
        rule: FieldRule::IntRange { min: 1, max: 5 },
    },
    TargetField {
        key: FieldKey::Criticality,
        label: "Criticidade",
        required: false,
        rule: FieldRule::EnumValues,
    },
    TargetField {
        key: FieldKey::WeightReason,
        label: "Justificativa do Peso",
        required: false,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::ImplementationExample,
        label: "Exemplo de Implementação",
        required: false,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::EvidenceExample,
        label: "Exemplo de Evidência",
        required: false,
        rule: FieldRule::Text,
    },
    TargetField {
        key: FieldKey::OrderIndex,
        label: "Ordem",
        required: false,
        rule: FieldRule::Integer,
    },
];

/// The full catalog, in schema order.
#[must_use]
pub fn target_fields() -> &'static [TargetField] {
    TARGET_FIELDS
}

/// The required subset of the catalog (`code` and `name`).
pub fn required_fields() -> impl Iterator<Item = &'static TargetField> {
    TARGET_FIELDS.iter().filter(|field| field.required)
}

/// Looks up a catalog entry by key.
///
/// The catalog covers every [`FieldKey`] variant, so this always succeeds.
#[must_use]
pub fn field_for(key: FieldKey) -> &'static TargetField {
    TARGET_FIELDS
        .iter()
        .find(|field| field.key == key)
        .expect("catalog covers every field key")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_ten_fields_two_required() {
        assert_eq!(target_fields().len(), 10);
        let required: Vec<FieldKey> = required_fields().map(|f| f.key).collect();
        assert_eq!(required, vec![FieldKey::Code, FieldKey::Name]);
    }

    #[test]
    fn field_key_round_trips_through_str() {
        for field in target_fields() {
            let parsed: FieldKey = field.key.as_str().parse().unwrap();
            assert_eq!(parsed, field.key);
        }
    }

    #[test]
    fn criticality_parses_case_insensitively() {
        assert_eq!("Alta".parse::<Criticality>().unwrap(), Criticality::Alta);
        assert_eq!(" baixa ".parse::<Criticality>().unwrap(), Criticality::Baixa);
        assert!("urgente".parse::<Criticality>().is_err());
    }
}
