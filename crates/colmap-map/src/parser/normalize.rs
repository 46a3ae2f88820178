//! Neutralization of date-constructor expressions.
//!
//! Oracles sometimes answer with values such as
//! `datetime.datetime(2020, 1, 1)` or `pd.Timestamp('2020-01-01')` when they
//! believe a column holds dates. Those calls are replaced by an inert string
//! literal so the strict literal parser can read the rest of the mapping.
//! Any other call is left in place and rejected by the parser.

use nom::{
    branch::alt,
    bytes::complete::is_not,
    character::complete::{char, multispace0},
    combinator::{recognize, verify},
    multi::{many0, separated_list1},
    sequence::{delimited, pair, preceded},
};

use colmap_model::{NeutralizedToken, quote_literal};

use super::literal::{Res, identifier, string_literal};

/// Placeholder literal substituted for a neutralized expression.
pub const NEUTRALIZED_PLACEHOLDER: &str = "datetime_value";

/// First path segment of a recognized date expression.
const DATE_NAMESPACES: &[&str] = &[
    "datetime",
    "date",
    "time",
    "dt",
    "pd",
    "pandas",
    "np",
    "numpy",
    "Timestamp",
];

/// Last path segment of a recognized date expression.
const DATE_CONSTRUCTORS: &[&str] = &[
    "datetime",
    "date",
    "time",
    "timedelta",
    "Timestamp",
    "to_datetime",
    "datetime64",
    "now",
    "today",
    "utcnow",
    "fromisoformat",
    "fromtimestamp",
    "strptime",
    "combine",
];

/// Text after neutralization, plus what was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub text: String,
    pub neutralized: Vec<NeutralizedToken>,
}

/// Replaces every date-constructor call outside string literals with
/// `'datetime_value'`.
pub fn neutralize_expressions(text: &str) -> Normalized {
    let mut out = String::with_capacity(text.len());
    let mut neutralized = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let offset = text.len() - rest.len();

        if let Ok((remaining, literal)) = recognize(string_literal)(rest) {
            out.push_str(literal);
            rest = remaining;
            continue;
        }
        if let Ok((remaining, expression)) = date_constructor_call(rest) {
            tracing::debug!(expression, offset, "neutralized date expression");
            out.push_str(&quote_literal(NEUTRALIZED_PLACEHOLDER));
            neutralized.push(NeutralizedToken {
                expression: expression.to_string(),
                offset,
            });
            rest = remaining;
            continue;
        }
        if let Ok((remaining, word)) = identifier(rest) {
            out.push_str(word);
            rest = remaining;
            continue;
        }

        let mut chars = rest.chars();
        if let Some(ch) = chars.next() {
            out.push(ch);
        }
        rest = chars.as_str();
    }

    Normalized {
        text: out,
        neutralized,
    }
}

fn date_constructor_call(input: &str) -> Res<'_, &str> {
    recognize(pair(
        verify(dotted_path, is_date_constructor),
        preceded(multispace0, argument_list),
    ))(input)
}

fn dotted_path(input: &str) -> Res<'_, &str> {
    recognize(separated_list1(char('.'), identifier))(input)
}

/// A balanced parenthesized argument list; quoted text may contain parens.
fn argument_list(input: &str) -> Res<'_, &str> {
    recognize(delimited(
        char('('),
        many0(alt((
            recognize(string_literal),
            argument_list,
            is_not("()'\""),
        ))),
        char(')'),
    ))(input)
}

fn is_date_constructor(path: &str) -> bool {
    let first = path.split('.').next().unwrap_or_default();
    let last = path.rsplit('.').next().unwrap_or_default();
    DATE_NAMESPACES.contains(&first) && DATE_CONSTRUCTORS.contains(&last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_datetime_constructor() {
        let input = "{'Joined': datetime.datetime(2020, 1, 1), 'Name': 'full_name'}";
        let normalized = neutralize_expressions(input);

        assert_eq!(
            normalized.text,
            "{'Joined': 'datetime_value', 'Name': 'full_name'}"
        );
        assert_eq!(
            normalized.neutralized,
            vec![NeutralizedToken {
                expression: "datetime.datetime(2020, 1, 1)".to_string(),
                offset: 11,
            }]
        );
    }

    #[test]
    fn replaces_nested_and_library_calls() {
        let input = "{'a': pd.Timestamp(datetime.date(2021, 5, 3)), 'b': np.datetime64('2020-01-01 (UTC)')}";
        let normalized = neutralize_expressions(input);

        assert_eq!(
            normalized.text,
            "{'a': 'datetime_value', 'b': 'datetime_value'}"
        );
        assert_eq!(normalized.neutralized.len(), 2);
        assert_eq!(
            normalized.neutralized[1].expression,
            "np.datetime64('2020-01-01 (UTC)')"
        );
    }

    #[test]
    fn leaves_string_contents_alone() {
        let input = "{'Start date(UTC)': 'datetime.now()'}";
        let normalized = neutralize_expressions(input);
        assert_eq!(normalized.text, input);
        assert!(normalized.neutralized.is_empty());
    }

    #[test]
    fn leaves_other_calls_for_the_parser_to_reject() {
        let input = "{'a': __import__('os').system('x'), 'b': time.sleep(10)}";
        let normalized = neutralize_expressions(input);
        assert_eq!(normalized.text, input);
        assert!(normalized.neutralized.is_empty());
    }

    #[test]
    fn ignores_identifiers_that_only_contain_a_date_name() {
        let input = "{'a': mydatetime.now()}";
        assert_eq!(neutralize_expressions(input).text, input);
    }

    #[test]
    fn handles_unterminated_quotes_without_panicking() {
        let input = "{'a': datetime.now(), 'b': 'oops}";
        let normalized = neutralize_expressions(input);
        assert_eq!(normalized.text, "{'a': 'datetime_value', 'b': 'oops}");
    }
}
