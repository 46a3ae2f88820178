//! The oracle seam.

use crate::error::Result;

/// Something that answers a mapping prompt with free text.
///
/// One call per request; implementations do not retry.
pub trait MappingOracle {
    /// Short label for logs and summaries.
    fn name(&self) -> &str;

    /// Sends `prompt` and returns the raw response text.
    fn complete(&self, prompt: &str) -> Result<String>;
}
