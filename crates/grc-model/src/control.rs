//! The compliance control record, as handed to the bulk-insert collaborator.

use serde::{Deserialize, Serialize};

use crate::schema::Criticality;

/// A validated control ready for insertion.
///
/// Carries none of the validator bookkeeping (`row_number`, `errors`); absent
/// optional fields are omitted from the serialized form entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Control {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub criticality: Option<Criticality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_example: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<i64>,
}
