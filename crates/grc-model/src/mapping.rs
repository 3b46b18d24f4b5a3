//! Source-column to target-field mappings.

use serde::{Deserialize, Serialize};

use crate::schema::FieldKey;

/// A mapping from source column names to canonical target fields.
///
/// Column order follows the source file. A `None` target means the column is
/// deliberately unmapped. Source headers are assumed unique; the mapping UI
/// keeps targets unique, but consumers must still tolerate a target being
/// claimed twice and resolve it first-column-wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping {
    entries: Vec<(String, Option<FieldKey>)>,
}

impl FieldMapping {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target for a source column, replacing any earlier assignment
    /// of that column and preserving its original position.
    pub fn set(&mut self, column: impl Into<String>, target: Option<FieldKey>) {
        let column = column.into();
        if let Some(entry) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            entry.1 = target;
        } else {
            self.entries.push((column, target));
        }
    }

    /// The target assigned to a source column, if the column is known and mapped.
    #[must_use]
    pub fn target_for(&self, column: &str) -> Option<FieldKey> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, target)| *target)
    }

    /// Iterates `(source column, target)` pairs in file order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<FieldKey>)> {
        self.entries
            .iter()
            .map(|(name, target)| (name.as_str(), *target))
    }

    /// All targets claimed by some column, in file order, duplicates included.
    #[must_use]
    pub fn mapped_targets(&self) -> Vec<FieldKey> {
        self.entries
            .iter()
            .filter_map(|(_, target)| *target)
            .collect()
    }

    /// A copy where every target is claimed by at most one column; when two
    /// columns claim the same target, the earlier column keeps it.
    #[must_use]
    pub fn deduplicated(&self) -> Self {
        let mut seen = Vec::new();
        let mut out = Self::new();
        for (column, target) in self.iter() {
            let target = match target {
                Some(key) if seen.contains(&key) => None,
                Some(key) => {
                    seen.push(key);
                    Some(key)
                }
                None => None,
            };
            out.set(column, target);
        }
        out
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, Option<FieldKey>)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (String, Option<FieldKey>)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (column, target) in iter {
            mapping.set(column, target);
        }
        mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut mapping = FieldMapping::new();
        mapping.set("codigo", Some(FieldKey::Code));
        mapping.set("nome", Some(FieldKey::Name));
        mapping.set("codigo", None);

        let columns: Vec<&str> = mapping.iter().map(|(name, _)| name).collect();
        assert_eq!(columns, vec!["codigo", "nome"]);
        assert_eq!(mapping.target_for("codigo"), None);
        assert_eq!(mapping.target_for("nome"), Some(FieldKey::Name));
    }

    #[test]
    fn deduplicated_keeps_first_claim() {
        let mut mapping = FieldMapping::new();
        mapping.set("a", Some(FieldKey::Code));
        mapping.set("b", Some(FieldKey::Code));
        mapping.set("c", Some(FieldKey::Name));

        let deduped = mapping.deduplicated();
        assert_eq!(deduped.target_for("a"), Some(FieldKey::Code));
        assert_eq!(deduped.target_for("b"), None);
        assert_eq!(deduped.target_for("c"), Some(FieldKey::Name));
    }

    #[test]
    fn serializes_as_pair_list() {
        let mut mapping = FieldMapping::new();
        mapping.set("codigo", Some(FieldKey::Code));
        mapping.set("extra", None);

        let json = serde_json::to_string(&mapping).unwrap();
        let round: FieldMapping = serde_json::from_str(&json).unwrap();
        assert_eq!(round, mapping);
    }
}
