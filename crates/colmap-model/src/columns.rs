//! Ordered column lists taken from a table header.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Ordered sequence of distinct column names from one table header.
///
/// For the reference table the order defines the output layout. For the
/// to-map table only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct ColumnList {
    names: Vec<String>,
}

impl ColumnList {
    /// Builds a column list, rejecting repeated names.
    pub fn new(names: Vec<String>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { names })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Returns the names as a set for membership checks.
    pub fn name_set(&self) -> BTreeSet<&str> {
        self.iter().collect()
    }

    /// Renders the list as a single-quoted literal sequence, e.g. `['a', 'b']`.
    ///
    /// This is the form embedded in oracle prompts, and the form the oracle
    /// is asked to echo back as dictionary keys and values.
    pub fn to_literal(&self) -> String {
        let items: Vec<String> = self.names.iter().map(|n| quote_literal(n)).collect();
        format!("[{}]", items.join(", "))
    }
}

impl TryFrom<Vec<String>> for ColumnList {
    type Error = ModelError;

    fn try_from(names: Vec<String>) -> Result<Self> {
        Self::new(names)
    }
}

impl From<ColumnList> for Vec<String> {
    fn from(list: ColumnList) -> Self {
        list.names
    }
}

impl fmt::Display for ColumnList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Quotes a string as a single-quoted literal, escaping backslashes,
/// quotes, and control characters.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    out
}
