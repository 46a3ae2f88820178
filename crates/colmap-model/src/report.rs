//! Operator-facing summary of one mapping request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::columns::ColumnList;
use crate::mapping::{NeutralizedToken, RejectedMapping, ValidatedMapping};

/// Everything the operator is shown about one mapping request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingReport {
    pub generated_at: DateTime<Utc>,
    pub reference_columns: ColumnList,
    pub to_map_columns: ColumnList,
    /// Accepted mapping after validation.
    pub accepted: ValidatedMapping,
    /// Suggestions dropped because the named column does not exist.
    pub rejected: RejectedMapping,
    /// Expressions replaced with placeholders before parsing.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub neutralized: Vec<NeutralizedToken>,
    /// Reference columns the oracle did not mention; mapped to null.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub omitted: Vec<String>,
    /// Keys the oracle produced that are not reference columns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_keys: Vec<String>,
}

/// One row of the accepted mapping as shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRow<'a> {
    pub reference: &'a str,
    pub target: Option<&'a str>,
    pub rejected: Option<&'a str>,
}

impl MappingReport {
    /// Accepted mapping rows in reference column order.
    pub fn rows(&self) -> Vec<MappingRow<'_>> {
        self.reference_columns
            .iter()
            .map(|reference| MappingRow {
                reference,
                target: self.accepted.target(reference),
                rejected: self.rejected.get(reference),
            })
            .collect()
    }

    pub fn mapped_count(&self) -> usize {
        self.reference_columns
            .iter()
            .filter(|name| self.accepted.target(name).is_some())
            .count()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn columns(names: &[&str]) -> ColumnList {
        ColumnList::new(names.iter().map(|s| (*s).to_string()).collect()).unwrap()
    }

    #[test]
    fn rows_follow_reference_order() {
        let mut accepted = BTreeMap::new();
        accepted.insert("Name".to_string(), Some("full_name".to_string()));
        accepted.insert("Age".to_string(), None);
        accepted.insert("City".to_string(), None);
        let mut rejected = RejectedMapping::default();
        rejected.insert("Age", "decade");

        let report = MappingReport {
            generated_at: Utc::now(),
            reference_columns: columns(&["Name", "Age", "City"]),
            to_map_columns: columns(&["full_name", "years"]),
            accepted: ValidatedMapping::from_entries(accepted),
            rejected,
            neutralized: Vec::new(),
            omitted: Vec::new(),
            unknown_keys: Vec::new(),
        };

        let rows = report.rows();
        let names: Vec<&str> = rows.iter().map(|r| r.reference).collect();
        assert_eq!(names, vec!["Name", "Age", "City"]);
        assert_eq!(rows[0].target, Some("full_name"));
        assert_eq!(rows[1].rejected, Some("decade"));
        assert_eq!(report.mapped_count(), 1);
        assert!(report.has_rejections());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rejected"]["Age"], "decade");
        assert!(json.get("omitted").is_none());
    }
}
