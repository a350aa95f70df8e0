use super::lexer::ClauseDefect;

use serde::{Deserialize, Serialize};

use std::{convert::TryFrom, fmt};

pub use Operator as Op;

/// Byte range of a piece of the source filter string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Span {
        Span { offset, len }
    }

    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Dotted member path, e.g. `Address.Number`.
///
/// Serialized as the list of its segments.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// Returns `None` for an empty path or a path with an empty segment.
    pub fn parse(src: &str) -> Option<PropertyPath> {
        PropertyPath::try_from(src.split('.').map(|s| s.to_string()).collect::<Vec<_>>()).ok()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn last(&self) -> &str {
        self.segments.last().map_or("", |s| s.as_str())
    }
}

impl TryFrom<Vec<String>> for PropertyPath {
    type Error = ClauseDefect;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        if segments.is_empty() || segments.iter().any(|s| s.trim().is_empty()) {
            return Err(ClauseDefect::EmptyPathSegment);
        }

        Ok(PropertyPath { segments })
    }
}

impl From<PropertyPath> for Vec<String> {
    fn from(path: PropertyPath) -> Vec<String> {
        path.segments
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Operator {
    Equal,
    LessThan,
    GreaterThan,
    LessOrEqual,
    GreaterOrEqual,
    Contains,
}

impl Operator {
    /// Case-insensitive lookup of the textual alias.
    pub fn from_alias(token: &str) -> Option<Operator> {
        match token.to_lowercase().as_str() {
            "eq" => Some(Op::Equal),
            "lt" => Some(Op::LessThan),
            "gt" => Some(Op::GreaterThan),
            "le" => Some(Op::LessOrEqual),
            "ge" => Some(Op::GreaterOrEqual),
            "cn" => Some(Op::Contains),
            _ => None,
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            Op::Equal => "eq",
            Op::LessThan => "lt",
            Op::GreaterThan => "gt",
            Op::LessOrEqual => "le",
            Op::GreaterOrEqual => "ge",
            Op::Contains => "cn",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.alias())
    }
}

/// One atomic `path operator literal` unit as written in the source.
///
/// `operator` is the raw alias text, see [`Clause::operator`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Clause {
    pub path: PropertyPath,
    pub operator: String,
    pub literal: String,
    pub span: Span,
}

impl Clause {
    pub fn operator(&self) -> Option<Operator> {
        Operator::from_alias(&self.operator)
    }
}

/// Parsed AND-of-ORs structure.
///
/// An empty grouping matches every row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Grouping {
    pub groups: Vec<OrGroup>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct OrGroup {
    pub alternatives: Vec<Clause>,
}

impl Grouping {
    pub fn match_all() -> Grouping {
        Grouping { groups: vec![] }
    }

    pub fn is_match_all(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.groups.iter().flat_map(|g| g.alternatives.iter())
    }
}
