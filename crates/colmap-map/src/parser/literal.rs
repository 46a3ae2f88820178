//! Strict literal parser for the mapping structure.
//!
//! Accepts exactly one `{key: value, ...}` mapping. Keys are string or
//! number literals; values are string, number, or null literals. Strings may
//! use single or double quotes with the usual backslash escapes. Nothing is
//! evaluated: identifiers, calls, booleans, and nested containers are
//! rejected.

use nom::{
    IResult,
    branch::alt,
    bytes::complete::{tag, take_while, take_while_m_n},
    character::complete::{anychar, char, digit0, digit1, multispace0, one_of, satisfy},
    combinator::{all_consuming, cut, map, map_opt, not, opt, recognize, value, verify},
    error::{ErrorKind, VerboseError, VerboseErrorKind, context},
    multi::{fold_many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
};

use crate::error::{ParseError, Result};

pub(crate) type Res<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;

/// Longest token or context snippet quoted back in an error.
const SNIPPET_LEN: usize = 40;

/// A literal value from the mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Str(String),
    /// Number kept as written.
    Number(String),
    Null,
}

impl Literal {
    /// Textual form of the literal; `None` for null.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Str(text) | Self::Number(text) => Some(text),
            Self::Null => None,
        }
    }
}

/// Parses the whole input as one literal mapping, in source order.
///
/// Duplicate keys are returned as they appear; callers decide which wins.
pub fn parse_literal_mapping(input: &str) -> Result<Vec<(String, Literal)>> {
    match all_consuming(delimited(multispace0, mapping, multispace0))(input) {
        Ok((_, entries)) => Ok(entries),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(to_parse_error(input, &e)),
        Err(nom::Err::Incomplete(_)) => Err(ParseError::Syntax {
            message: "incomplete input".to_string(),
            offset: input.len(),
            near: String::new(),
        }),
    }
}

pub(crate) fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub(crate) fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub(crate) fn identifier(input: &str) -> Res<'_, &str> {
    recognize(pair(satisfy(is_ident_start), take_while(is_ident_char)))(input)
}

/// A single- or double-quoted string literal, unescaped.
pub(crate) fn string_literal(input: &str) -> Res<'_, String> {
    alt((quoted('\''), quoted('"')))(input)
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> Res<'a, String> {
    move |input: &'a str| {
        delimited(
            char(quote),
            fold_many0(
                move |i| string_piece(i, quote),
                String::new,
                |mut acc, (first, second)| {
                    acc.push(first);
                    if let Some(ch) = second {
                        acc.push(ch);
                    }
                    acc
                },
            ),
            cut(context("closing quote", char(quote))),
        )(input)
    }
}

/// One logical character of a string body. Unknown escapes keep their
/// backslash, so the piece may be two characters.
fn string_piece(input: &str, quote: char) -> Res<'_, (char, Option<char>)> {
    alt((
        map(preceded(char('\\'), escape_sequence), |ch| (ch, None)),
        map(
            preceded(char('\\'), verify(anychar, |ch: &char| *ch != '\n')),
            |ch| ('\\', Some(ch)),
        ),
        map(
            verify(anychar, move |ch: &char| {
                *ch != quote && *ch != '\\' && *ch != '\n'
            }),
            |ch| (ch, None),
        ),
    ))(input)
}

fn escape_sequence(input: &str) -> Res<'_, char> {
    alt((
        value('\\', char('\\')),
        value('\'', char('\'')),
        value('"', char('"')),
        value('\n', char('n')),
        value('\t', char('t')),
        value('\r', char('r')),
        value('\0', char('0')),
        value('/', char('/')),
        map_opt(
            preceded(char('u'), take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit())),
            hex_char,
        ),
        map_opt(
            preceded(char('x'), take_while_m_n(2, 2, |c: char| c.is_ascii_hexdigit())),
            hex_char,
        ),
    ))(input)
}

fn hex_char(digits: &str) -> Option<char> {
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

fn number_text(input: &str) -> Res<'_, &str> {
    terminated(
        recognize(tuple((
            opt(one_of("+-")),
            digit1,
            opt(pair(char('.'), digit0)),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        not(satisfy(is_ident_char)),
    )(input)
}

fn null_literal(input: &str) -> Res<'_, Literal> {
    value(
        Literal::Null,
        terminated(alt((tag("None"), tag("null"))), not(satisfy(is_ident_char))),
    )(input)
}

fn literal_value(input: &str) -> Res<'_, Literal> {
    context(
        "string, number, or null literal",
        alt((
            map(string_literal, Literal::Str),
            null_literal,
            map(number_text, |text| Literal::Number(text.to_string())),
        )),
    )(input)
}

fn mapping_key(input: &str) -> Res<'_, String> {
    alt((string_literal, map(number_text, str::to_string)))(input)
}

fn entry(input: &str) -> Res<'_, (String, Literal)> {
    pair(
        mapping_key,
        cut(preceded(
            tuple((multispace0, context("':' after key", char(':')), multispace0)),
            literal_value,
        )),
    )(input)
}

fn mapping(input: &str) -> Res<'_, Vec<(String, Literal)>> {
    delimited(
        pair(context("'{' opening the mapping", char('{')), multispace0),
        separated_list0(tuple((multispace0, char(','), multispace0)), entry),
        cut(context(
            "'}' closing the mapping",
            preceded(
                tuple((multispace0, opt(pair(char(','), multispace0)))),
                char('}'),
            ),
        )),
    )(input)
}

fn to_parse_error(input: &str, error: &VerboseError<&str>) -> ParseError {
    let remaining = error.errors.first().map_or("", |(rest, _)| *rest);
    let offset = input.len() - remaining.len();

    if remaining
        .chars()
        .next()
        .is_some_and(|ch| is_ident_start(ch) || ch == '[' || ch == '(')
    {
        return ParseError::UnsupportedToken {
            token: token_at(remaining),
            offset,
        };
    }

    ParseError::Syntax {
        message: describe(error),
        offset,
        near: remaining.chars().take(SNIPPET_LEN).collect(),
    }
}

/// The offending token: everything up to the next separator or whitespace.
fn token_at(text: &str) -> String {
    text.chars()
        .take_while(|ch| !ch.is_whitespace() && !matches!(ch, ',' | ':' | '}'))
        .take(SNIPPET_LEN)
        .collect()
}

fn describe(error: &VerboseError<&str>) -> String {
    let context = error.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(ctx) => Some(*ctx),
        _ => None,
    });
    if let Some(ctx) = context {
        return format!("expected {ctx}");
    }
    match error.errors.first() {
        Some((_, VerboseErrorKind::Char(ch))) => format!("expected '{ch}'"),
        Some((_, VerboseErrorKind::Nom(ErrorKind::Eof))) => {
            "unexpected text after the mapping".to_string()
        }
        Some((_, VerboseErrorKind::Nom(kind))) => format!("unexpected input ({kind:?})"),
        _ => "malformed mapping".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_pairs(input: &str) -> Vec<(String, Option<String>)> {
        parse_literal_mapping(input)
            .unwrap()
            .into_iter()
            .map(|(k, v)| (k, v.into_text()))
            .collect()
    }

    #[test]
    fn parses_single_quoted_mapping() {
        let pairs = text_pairs("{'Name': 'full_name', 'Age': None}");
        assert_eq!(
            pairs,
            vec![
                ("Name".to_string(), Some("full_name".to_string())),
                ("Age".to_string(), None),
            ]
        );
    }

    #[test]
    fn parses_json_style_mapping_with_trailing_comma() {
        let pairs = text_pairs("{\n  \"Name\": \"full_name\",\n  \"Age\": null,\n}");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1], ("Age".to_string(), None));
    }

    #[test]
    fn parses_empty_mapping() {
        assert!(parse_literal_mapping("{}").unwrap().is_empty());
        assert!(parse_literal_mapping("  { }  ").unwrap().is_empty());
    }

    #[test]
    fn keeps_numbers_as_written() {
        let pairs = text_pairs("{1: 2.50, 'x': -3e2}");
        assert_eq!(pairs[0], ("1".to_string(), Some("2.50".to_string())));
        assert_eq!(pairs[1], ("x".to_string(), Some("-3e2".to_string())));
    }

    #[test]
    fn unescapes_strings() {
        let pairs = text_pairs(r#"{'Owner\'s Name': "say \"hi\"", 'Path': 'C:\data', 'U': '\u00e9'}"#);
        assert_eq!(pairs[0], ("Owner's Name".to_string(), Some("say \"hi\"".to_string())));
        assert_eq!(pairs[1], ("Path".to_string(), Some("C:\\data".to_string())));
        assert_eq!(pairs[2], ("U".to_string(), Some("é".to_string())));
    }

    #[test]
    fn empty_string_values_are_strings() {
        let pairs = text_pairs("{'A': ''}");
        assert_eq!(pairs[0], ("A".to_string(), Some(String::new())));
    }

    #[test]
    fn rejects_identifiers_as_values() {
        let err = parse_literal_mapping("{'A': True}").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedToken {
                token: "True".to_string(),
                offset: 6,
            }
        );
    }

    #[test]
    fn rejects_code_outright() {
        let err = parse_literal_mapping("__import__('os').system('x')").unwrap_err();
        match err {
            ParseError::UnsupportedToken { token, offset } => {
                assert_eq!(offset, 0);
                assert!(token.starts_with("__import__"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejects_nested_containers() {
        let err = parse_literal_mapping("{'A': ['x', 'y']}").unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedToken { offset: 6, .. }));
    }

    #[test]
    fn reports_unbalanced_braces() {
        let input = "{'Name': 'full_name', 'Age': 'years'";
        let err = parse_literal_mapping(input).unwrap_err();
        match err {
            ParseError::Syntax { offset, message, .. } => {
                assert_eq!(offset, input.len());
                assert!(message.contains("closing the mapping"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_missing_colon() {
        let err = parse_literal_mapping("{'Name' 'full_name'}").unwrap_err();
        match err {
            ParseError::Syntax { offset, message, .. } => {
                assert_eq!(offset, 8);
                assert!(message.contains("':'"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reports_trailing_text() {
        let err = parse_literal_mapping("{'a': 'b'} }").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { offset: 11, .. }));
    }

    #[test]
    fn reports_unterminated_string() {
        let err = parse_literal_mapping("{'a': 'b}").unwrap_err();
        match err {
            ParseError::Syntax { message, .. } => assert!(message.contains("closing quote")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
