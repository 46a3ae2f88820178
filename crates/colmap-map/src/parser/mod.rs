//! Oracle response parsing.
//!
//! Three stages run in order:
//!
//! 1. [`strip_formatting`] removes code fences and a language tag.
//! 2. [`neutralize_expressions`] swaps date-constructor calls for a
//!    placeholder literal and records each swap.
//! 3. [`parse_literal_mapping`] reads the remaining text as a strict literal
//!    mapping. Nothing in the response is ever executed.

mod fence;
mod literal;
mod normalize;

use std::collections::BTreeMap;

use tracing::{debug, warn};

use colmap_model::ParsedMapping;

use crate::error::{ParseError, Result};

pub use fence::strip_formatting;
pub use literal::{Literal, parse_literal_mapping};
pub use normalize::{NEUTRALIZED_PLACEHOLDER, Normalized, neutralize_expressions};

/// Parses raw oracle text into a mapping.
///
/// Numeric keys and values are kept as their literal text. When a key is
/// repeated the last value wins.
pub fn parse_mapping_response(raw: &str) -> Result<ParsedMapping> {
    let stripped = strip_formatting(raw);
    if stripped.is_empty() {
        return Err(ParseError::Empty);
    }

    let Normalized { text, neutralized } = neutralize_expressions(stripped);
    if !neutralized.is_empty() {
        warn!(
            count = neutralized.len(),
            "oracle response contained date expressions; replaced with placeholders"
        );
    }

    let mut entries = BTreeMap::new();
    for (key, value) in parse_literal_mapping(&text)? {
        if entries.insert(key.clone(), value.into_text()).is_some() {
            debug!(key = %key, "duplicate key in oracle response; keeping last value");
        }
    }
    debug!(entries = entries.len(), "parsed oracle mapping");

    Ok(ParsedMapping::new(entries, neutralized))
}
