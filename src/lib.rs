//! Compiles textual row filters such as
//! `Fullname cn 'John D' _And Age gt 20 _Or Address.City eq Paoli`
//! into predicates over Rust structs.
//!
//! Row types describe themselves through [`schema::Record`]; a filter is
//! parsed by [`lang`] and bound to that schema by [`compiler`].

pub mod compiler;
pub mod config;
pub mod lang;
pub mod schema;

pub use compiler::{CompileError, CompiledPredicate};
pub use config::ParseOptions;
pub use lang::{Grouping, ParseError};
pub use schema::{FieldDescriptor, Record, Schema, SchemaCell};

use thiserror::Error;

/// Failure of [`compile_filter`].
///
/// The message stays generic on purpose; the underlying cause is kept as
/// the error source.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("cannot compile your request")]
    Parse(#[from] ParseError),
    #[error("cannot compile your request")]
    Compile(#[from] CompileError),
}

impl FilterError {
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            FilterError::Parse(error) => Some(error),
            FilterError::Compile(_) => None,
        }
    }

    pub fn compile_error(&self) -> Option<&CompileError> {
        match self {
            FilterError::Compile(error) => Some(error),
            FilterError::Parse(_) => None,
        }
    }
}

pub fn compile_filter<T: Record>(filter: &str) -> Result<CompiledPredicate<T>, FilterError> {
    compile_filter_with(filter, &ParseOptions::default())
}

pub fn compile_filter_with<T: Record>(
    filter: &str,
    options: &ParseOptions,
) -> Result<CompiledPredicate<T>, FilterError> {
    let grouping = lang::parse_with(filter, options)?;
    let predicate = compiler::compile(&grouping)?;
    Ok(predicate)
}

/// A missing filter matches every row.
pub fn compile_filter_opt<T: Record>(filter: Option<&str>) -> Result<CompiledPredicate<T>, FilterError> {
    compile_filter(filter.unwrap_or(""))
}

/// Resolves a dotted path such as `Address.Number` against `schema`.
pub fn resolve_field<'s>(schema: &'s Schema, path: &str) -> Result<FieldDescriptor<'s>, CompileError> {
    let parsed = match lang::PropertyPath::parse(path) {
        Some(parsed) => parsed,
        None => return Err(CompileError::UnknownField {
            path: path.to_string(),
            segment: String::new(),
        }),
    };

    schema.resolve(&parsed)
}
