//! Mapping types produced by parsing and validating an oracle response.
//!
//! All mappings are keyed by reference column name. A `None` value is the
//! explicit "no match" marker.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::columns::ColumnList;

/// A non-literal expression replaced by a placeholder before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeutralizedToken {
    /// Expression text exactly as the oracle emitted it.
    pub expression: String,
    /// Byte offset of the expression in the de-fenced response text.
    pub offset: usize,
}

/// Reference column to suggested to-map column, as parsed from the oracle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMapping {
    entries: BTreeMap<String, Option<String>>,
    #[serde(default)]
    neutralized: Vec<NeutralizedToken>,
}

impl ParsedMapping {
    pub fn new(
        entries: BTreeMap<String, Option<String>>,
        neutralized: Vec<NeutralizedToken>,
    ) -> Self {
        Self {
            entries,
            neutralized,
        }
    }

    pub fn entries(&self) -> &BTreeMap<String, Option<String>> {
        &self.entries
    }

    pub fn neutralized(&self) -> &[NeutralizedToken] {
        &self.neutralized
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the suggestion for a reference column.
    ///
    /// The outer `Option` is key presence, the inner one the "no match" marker.
    pub fn get(&self, reference: &str) -> Option<Option<&str>> {
        self.entries.get(reference).map(Option::as_deref)
    }

    /// Adds a null entry for every reference column the oracle left out.
    ///
    /// Returns the omitted names in reference order.
    pub fn fill_missing(&mut self, reference: &ColumnList) -> Vec<String> {
        let mut omitted = Vec::new();
        for name in reference.iter() {
            if !self.entries.contains_key(name) {
                self.entries.insert(name.to_string(), None);
                omitted.push(name.to_string());
            }
        }
        omitted
    }

    /// Keys the oracle produced that are not reference columns.
    pub fn unknown_keys(&self, reference: &ColumnList) -> Vec<String> {
        let known = reference.name_set();
        self.entries
            .keys()
            .filter(|key| !known.contains(key.as_str()))
            .cloned()
            .collect()
    }
}

impl From<ValidatedMapping> for ParsedMapping {
    fn from(validated: ValidatedMapping) -> Self {
        Self::new(validated.entries, Vec::new())
    }
}

/// Parsed mapping whose non-null values all exist in the to-map table.
///
/// Built by the mapping validator; the membership guarantee is established
/// there.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatedMapping {
    entries: BTreeMap<String, Option<String>>,
}

impl ValidatedMapping {
    pub fn from_entries(entries: BTreeMap<String, Option<String>>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &BTreeMap<String, Option<String>> {
        &self.entries
    }

    /// Mapped to-map column for a reference column, if any.
    pub fn target(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference).and_then(Option::as_deref)
    }

    pub fn contains_key(&self, reference: &str) -> bool {
        self.entries.contains_key(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with a non-null target.
    pub fn mapped_count(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }
}

/// Suggestions that named a column missing from the to-map table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RejectedMapping {
    entries: BTreeMap<String, String>,
}

impl RejectedMapping {
    pub fn insert(&mut self, reference: impl Into<String>, suggestion: impl Into<String>) {
        self.entries.insert(reference.into(), suggestion.into());
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    pub fn get(&self, reference: &str) -> Option<&str> {
        self.entries.get(reference).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
