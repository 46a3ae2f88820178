//! Cross-checks parsed suggestions against the real to-map columns.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use colmap_model::{ColumnList, ParsedMapping, RejectedMapping, ValidatedMapping};

/// Result of validating a parsed mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    /// Every parsed key, with unknown targets replaced by null.
    pub accepted: ValidatedMapping,
    /// Suggestions whose target column does not exist.
    pub rejected: RejectedMapping,
}

/// Partitions a parsed mapping into accepted and rejected entries.
///
/// Never fails. The accepted mapping has exactly the parsed keys; a
/// suggestion naming a column outside `to_map_columns` is nulled and
/// recorded as rejected. Matching is exact and case-sensitive.
pub fn validate_mapping(parsed: &ParsedMapping, to_map_columns: &ColumnList) -> ValidationOutcome {
    let valid = to_map_columns.name_set();
    let mut accepted = BTreeMap::new();
    let mut rejected = RejectedMapping::default();

    for (reference, suggestion) in parsed.entries() {
        let target = match suggestion.as_deref() {
            None => None,
            Some(column) if valid.contains(column) => Some(column.to_string()),
            Some(column) => {
                warn!(
                    reference = %reference,
                    suggestion = %column,
                    "oracle suggested a column that does not exist; mapping to null"
                );
                rejected.insert(reference.clone(), column);
                None
            }
        };
        accepted.insert(reference.clone(), target);
    }

    debug!(
        accepted = accepted.values().filter(|v| v.is_some()).count(),
        rejected = rejected.len(),
        "validated mapping"
    );

    ValidationOutcome {
        accepted: ValidatedMapping::from_entries(accepted),
        rejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> ColumnList {
        ColumnList::new(names.iter().map(|s| (*s).to_string()).collect()).unwrap()
    }

    fn parsed(pairs: &[(&str, Option<&str>)]) -> ParsedMapping {
        ParsedMapping::new(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.map(str::to_string)))
                .collect(),
            Vec::new(),
        )
    }

    #[test]
    fn accepts_existing_columns_unchanged() {
        let parsed = parsed(&[
            ("Name", Some("full_name")),
            ("Age", Some("years")),
            ("City", Some("location")),
        ]);
        let outcome = validate_mapping(&parsed, &columns(&["full_name", "years", "location", "notes"]));

        assert_eq!(outcome.accepted.entries(), parsed.entries());
        assert!(outcome.rejected.is_empty());
    }

    #[test]
    fn nulls_and_records_unknown_columns() {
        let parsed = parsed(&[
            ("Name", Some("full_name")),
            ("Age", Some("decade")),
            ("City", None),
        ]);
        let outcome = validate_mapping(&parsed, &columns(&["full_name", "years", "location", "notes"]));

        assert_eq!(outcome.accepted.target("Name"), Some("full_name"));
        assert_eq!(outcome.accepted.target("Age"), None);
        assert_eq!(outcome.accepted.target("City"), None);
        assert_eq!(outcome.accepted.len(), 3);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected.get("Age"), Some("decade"));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let parsed = parsed(&[("Name", Some("FULL_NAME"))]);
        let outcome = validate_mapping(&parsed, &columns(&["full_name"]));
        assert_eq!(outcome.accepted.target("Name"), None);
        assert_eq!(outcome.rejected.get("Name"), Some("FULL_NAME"));
    }

    #[test]
    fn validating_twice_is_stable() {
        let parsed = parsed(&[("Name", Some("full_name")), ("Age", Some("decade"))]);
        let to_map = columns(&["full_name"]);
        let first = validate_mapping(&parsed, &to_map);
        let second = validate_mapping(&ParsedMapping::from(first.accepted.clone()), &to_map);

        assert_eq!(second.accepted, first.accepted);
        assert!(second.rejected.is_empty());
    }
}
