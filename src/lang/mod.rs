pub mod filter;
pub mod lexer;
pub mod parser;
pub mod tokens;

pub use filter::Expression;
pub use lexer::{extract_clause, ClauseDefect};
pub use parser::{parse, parse_with, ParseError};
pub use tokens::{Clause, Grouping, Operator, OrGroup, PropertyPath, Span};
