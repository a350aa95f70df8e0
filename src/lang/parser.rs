use super::lexer::{extract_clause, ClauseDefect};
use super::tokens::*;
use crate::config::ParseOptions;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const AND: &str = "_And";
pub const OR: &str = "_Or";

#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum ParseError {
    #[error("malformed clause `{clause}`: {reason}")]
    MalformedClause { clause: String, span: Span, reason: ClauseDefect },
    #[error("filter does not contain any clause")]
    EmptyExpression,
    #[error("filter contains {count} clauses but at most {max} are allowed")]
    TooManyClauses { count: usize, max: usize },
}

/// Parses with default options.
pub fn parse(src: &str) -> Result<Grouping, ParseError> {
    parse_with(src, &ParseOptions::default())
}

/// Splits `src` into AND-groups, then every group into OR-alternatives.
///
/// `_And` always binds looser than `_Or`: `a _Or b _And c` is `(a | b) & c`.
pub fn parse_with(src: &str, options: &ParseOptions) -> Result<Grouping, ParseError> {
    if src.is_empty() {
        debug!("empty filter, matching every row");
        return Ok(Grouping::match_all());
    }

    if src.trim().is_empty() {
        return Err(ParseError::EmptyExpression);
    }

    let mut groups = vec![];
    let mut count = 0;

    for (and_offset, and_part) in split_with_offsets(src, AND, 0) {
        let mut alternatives = vec![];

        for (or_offset, or_part) in split_with_offsets(and_part, OR, and_offset) {
            let clause = extract_clause(or_part, or_offset)?;
            trace!("clause {:?}", clause);

            alternatives.push(clause);
            count += 1;

            if let Some(max) = options.max_clauses {
                if count > max {
                    return Err(ParseError::TooManyClauses { count, max });
                }
            }
        }

        groups.push(OrGroup { alternatives });
    }

    if count == 0 {
        return Err(ParseError::EmptyExpression);
    }

    debug!("parsed {} clauses in {} groups", count, groups.len());

    Ok(Grouping { groups })
}

/// Like `str::split` but every piece carries its absolute byte offset.
fn split_with_offsets<'a>(src: &'a str, separator: &str, base: usize) -> Vec<(usize, &'a str)> {
    let mut pieces = vec![];
    let mut start = 0;

    for (index, _) in src.match_indices(separator) {
        pieces.push((base + start, &src[start..index]));
        start = index + separator.len();
    }

    pieces.push((base + start, &src[start..]));
    pieces
}
