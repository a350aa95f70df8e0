use super::parser::ParseError;
use super::tokens::*;

use serde::{Deserialize, Serialize};

use std::fmt;

const QUOTE: char = '\'';

/// Why a clause could not be split into `path operator literal`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum ClauseDefect {
    TokenCount { expected: usize, found: usize },
    UnclosedQuote,
    EmptyPathSegment,
}

impl fmt::Display for ClauseDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseDefect::TokenCount { expected, found } => {
                write!(f, "expected {} tokens but found {}", expected, found)
            },
            ClauseDefect::UnclosedQuote => f.write_str("quoted value is not closed"),
            ClauseDefect::EmptyPathSegment => f.write_str("property path has an empty segment"),
        }
    }
}

/// Splits one atomic clause into its three parts.
///
/// `offset` is the byte position of `src` inside the whole filter string;
/// it only feeds the returned spans.
///
/// Tokens are separated by any run of whitespace, tabs included, so
/// `Age  gt 5` is accepted. With a quoted literal, whatever follows the
/// last quote is ignored.
pub fn extract_clause(src: &str, offset: usize) -> Result<Clause, ParseError> {
    let leading = src.len() - src.trim_start().len();
    let text = src.trim();
    let span = Span::new(offset + leading, text.len());

    let malformed = |reason| ParseError::MalformedClause {
        clause: text.to_string(),
        span,
        reason,
    };

    let (property, operator, literal) = match (text.find(QUOTE), text.rfind(QUOTE)) {
        (Some(first), Some(last)) => {
            if first == last {
                return Err(malformed(ClauseDefect::UnclosedQuote));
            }

            let head: Vec<&str> = text[..first].split_whitespace().collect();
            if head.len() != 2 {
                return Err(malformed(ClauseDefect::TokenCount {
                    expected: 2,
                    found: head.len(),
                }));
            }

            (head[0], head[1], &text[first + 1..last])
        },
        _ => {
            let parts: Vec<&str> = text.split_whitespace().collect();
            if parts.len() != 3 {
                return Err(malformed(ClauseDefect::TokenCount {
                    expected: 3,
                    found: parts.len(),
                }));
            }

            (parts[0], parts[1], parts[2])
        },
    };

    let path = match PropertyPath::parse(property) {
        Some(path) => path,
        None => return Err(malformed(ClauseDefect::EmptyPathSegment)),
    };

    Ok(Clause {
        path,
        operator: operator.to_string(),
        literal: literal.to_string(),
        span,
    })
}

#[cfg(test)]
mod tests;
