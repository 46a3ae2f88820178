//! Removal of markdown formatting around an oracle response.

/// Strips surrounding whitespace, code-fence backticks, and a language tag
/// such as `python` or `json` placed before the mapping.
///
/// Only the ends of the text are touched.
pub fn strip_formatting(raw: &str) -> &str {
    let trimmed = raw.trim();
    let unfenced = trimmed.trim_start_matches('`');
    let fenced = unfenced.len() != trimmed.len();
    let text = unfenced.trim_end_matches('`').trim();
    strip_language_tag(text, fenced)
}

/// Drops a leading bare word when the mapping itself follows it, with or
/// without whitespace in between.
///
/// A word standing alone is only treated as a tag inside a fence.
fn strip_language_tag(text: &str, fenced: bool) -> &str {
    if !text.chars().next().is_some_and(|ch| ch.is_ascii_alphabetic()) {
        return text;
    }
    let tag_len = text
        .char_indices()
        .find(|(_, ch)| !(ch.is_ascii_alphanumeric() || *ch == '_' || *ch == '-'))
        .map_or(text.len(), |(idx, _)| idx);
    let (tag, rest) = text.split_at(tag_len);
    if rest.is_empty() {
        return if fenced { rest } else { text };
    }
    let body = rest.trim_start();
    if body.starts_with('{') {
        tracing::trace!(tag, "dropping language tag before mapping");
        return body;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_mapping_is_untouched() {
        assert_eq!(strip_formatting("{'a': 'b'}"), "{'a': 'b'}");
    }

    #[test]
    fn strips_fence_and_language_tag() {
        let raw = "```python\n{'Name': 'full_name'}\n```\n";
        assert_eq!(strip_formatting(raw), "{'Name': 'full_name'}");

        let raw = "```json {\"Name\": null}```";
        assert_eq!(strip_formatting(raw), "{\"Name\": null}");

        let raw = "python\n{'a': None}";
        assert_eq!(strip_formatting(raw), "{'a': None}");
    }

    #[test]
    fn strips_tag_glued_to_mapping() {
        assert_eq!(strip_formatting("```python{'A': None}```"), "{'A': None}");
        assert_eq!(strip_formatting("json{\"A\": \"b\"}"), "{\"A\": \"b\"}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(strip_formatting("```\n{}\n```"), "{}");
    }

    #[test]
    fn keeps_leading_words_that_are_not_tags() {
        let raw = "Here is the mapping: {}";
        assert_eq!(strip_formatting(raw), raw);
        assert_eq!(strip_formatting("None"), "None");
    }

    #[test]
    fn fence_only_response_is_empty() {
        assert_eq!(strip_formatting("```python\n```"), "");
        assert_eq!(strip_formatting("   "), "");
    }
}
