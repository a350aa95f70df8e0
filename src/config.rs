use serde::{Deserialize, Serialize};

/// Knobs for the clause parser.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Reject filters with more clauses than this. `None` means unlimited.
    pub max_clauses: Option<usize>,
}

impl ParseOptions {
    pub fn with_max_clauses(max: usize) -> ParseOptions {
        ParseOptions { max_clauses: Some(max) }
    }
}
