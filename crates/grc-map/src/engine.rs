//! Auto-mapping engine: guesses a target field for each source column.

use std::collections::BTreeSet;

use grc_model::{FieldKey, FieldMapping, target_fields};
use tracing::debug;

use crate::patterns::synonyms_for;

/// One rung of the matching cascade; takes the normalized header and one
/// normalized synonym.
type MatchStrategy = fn(&str, &str) -> bool;

/// The cascade, in priority order. Each strategy is tried across all still
/// unclaimed fields before the next one runs.
const STRATEGIES: &[MatchStrategy] = &[exact_match, prefix_match, containment_match];

fn exact_match(header: &str, synonym: &str) -> bool {
    header == synonym
}

fn prefix_match(header: &str, synonym: &str) -> bool {
    header.starts_with(synonym) || synonym.starts_with(header)
}

/// Containment either way, but only when the shorter string has at least 3
/// characters; 1-2 character substrings would match almost anything.
fn containment_match(header: &str, synonym: &str) -> bool {
    let shorter = header.chars().count().min(synonym.chars().count());
    shorter >= 3 && (header.contains(synonym) || synonym.contains(header))
}

/// Normalizes a header or synonym for comparison: lowercase, trimmed, with
/// `_`, `-` and whitespace runs removed.
#[must_use]
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|ch| *ch != '_' && *ch != '-' && !ch.is_whitespace())
        .collect()
}

/// Guesses a target field for each header, in file order.
///
/// Pure and deterministic: the first header to match a field claims it, and
/// a claimed field is out of consideration for every later header. Headers
/// matching nothing map to `None`. The claim set is local to this call.
#[must_use]
pub fn auto_map_fields(headers: &[String]) -> FieldMapping {
    let mut claimed: BTreeSet<FieldKey> = BTreeSet::new();
    let mut mapping = FieldMapping::new();

    for header in headers {
        let target = best_match(header, &claimed);
        if let Some(key) = target {
            claimed.insert(key);
            debug!(header = %header, target = %key, "auto-mapped column");
        }
        mapping.set(header.clone(), target);
    }
    mapping
}

fn best_match(header: &str, claimed: &BTreeSet<FieldKey>) -> Option<FieldKey> {
    let normalized = normalize_text(header);
    if normalized.is_empty() {
        return None;
    }

    for strategy in STRATEGIES {
        for field in target_fields() {
            if claimed.contains(&field.key) {
                continue;
            }
            let hit = synonyms_for(field.key)
                .iter()
                .any(|synonym| strategy(&normalized, &normalize_text(synonym)));
            if hit {
                return Some(field.key);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| (*name).to_string()).collect()
    }

    #[test]
    fn maps_portuguese_headers_exactly_once() {
        let mapping = auto_map_fields(&headers(&["codigo", "nome", "peso"]));
        assert_eq!(mapping.target_for("codigo"), Some(FieldKey::Code));
        assert_eq!(mapping.target_for("nome"), Some(FieldKey::Name));
        assert_eq!(mapping.target_for("peso"), Some(FieldKey::Weight));
        assert_eq!(mapping.mapped_targets().len(), 3);
    }

    #[test]
    fn normalization_is_case_and_separator_insensitive() {
        for variant in ["Código", "codigo", "CODIGO_", "  c-o-d-i-g-o  "] {
            let mapping = auto_map_fields(&headers(&[variant]));
            assert_eq!(mapping.target_for(variant), Some(FieldKey::Code), "{variant}");
        }
    }

    #[test]
    fn claimed_field_is_not_reassigned() {
        // Both headers would match `code`; the second must not re-claim it.
        let mapping = auto_map_fields(&headers(&["codigo", "cod"]));
        assert_eq!(mapping.target_for("codigo"), Some(FieldKey::Code));
        assert_ne!(mapping.target_for("cod"), Some(FieldKey::Code));
    }

    #[test]
    fn unknown_header_maps_to_none() {
        let mapping = auto_map_fields(&headers(&["observacoes internas"]));
        assert_eq!(mapping.target_for("observacoes internas"), None);
    }

    #[test]
    fn exact_beats_prefix() {
        // "ordem" is exact for order_index; a prefix hit on another field
        // must not steal it even though catalog order favors earlier fields.
        let mapping = auto_map_fields(&headers(&["ordem"]));
        assert_eq!(mapping.target_for("ordem"), Some(FieldKey::OrderIndex));
    }

    #[test]
    fn short_fragments_do_not_containment_match() {
        // "id" is an exact synonym of code, but a 2-char fragment inside a
        // longer header must not match by containment.
        let mapping = auto_map_fields(&headers(&["validade"]));
        assert_eq!(mapping.target_for("validade"), None);
    }

    #[test]
    fn is_deterministic_across_calls() {
        let input = headers(&["peso", "criticidade", "codigo", "nome"]);
        let first = auto_map_fields(&input);
        let second = auto_map_fields(&input);
        assert_eq!(first, second);
    }
}
