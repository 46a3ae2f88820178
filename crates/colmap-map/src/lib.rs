//! Mapping stage of the colmap pipeline.
//!
//! - [`build_mapping_prompt`] turns two column lists into an oracle request.
//! - [`parse_mapping_response`] turns the oracle's reply into a
//!   [`ParsedMapping`](colmap_model::ParsedMapping) without evaluating it.
//! - [`validate_mapping`] checks every suggestion against the real columns.

pub mod error;
pub mod parser;
pub mod prompt;
pub mod validator;

pub use error::{ParseError, Result};
pub use parser::{NEUTRALIZED_PLACEHOLDER, parse_mapping_response, strip_formatting};
pub use prompt::build_mapping_prompt;
pub use validator::{ValidationOutcome, validate_mapping};
