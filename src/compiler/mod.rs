use crate::lang::{Clause, Expression, Grouping, Operator};
use crate::schema::{coerce, FieldDescriptor, FieldKind, Record, Schema, Value};

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::{any::Any, fmt, marker::PhantomData};

#[derive(Clone, Debug, PartialEq, Eq, Error, Deserialize, Serialize)]
pub enum CompileError {
    #[error("unknown field `{segment}` in `{path}`")]
    UnknownField { path: String, segment: String },
    #[error("value `{literal}` can not be converted to {kind} for `{path}`")]
    ValueCoercionFailed { path: String, literal: String, kind: FieldKind },
    #[error("only string fields support `cn` but `{path}` is {kind}")]
    ContainsRequiresString { path: String, kind: FieldKind },
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),
}

/// A filter bound to the accessors of row type `T`.
///
/// Holds no mutable state, so one instance can be shared between threads
/// and evaluated any number of times.
pub struct CompiledPredicate<T> {
    expression: Expression,
    root: Node,
    row: PhantomData<fn(&T) -> bool>,
}

impl<T: Record> CompiledPredicate<T> {
    pub fn matches(&self, row: &T) -> bool {
        self.root.eval(row)
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }

    pub fn into_fn(self) -> impl Fn(&T) -> bool + Send + Sync {
        move |row: &T| self.matches(row)
    }
}

impl<T> fmt::Debug for CompiledPredicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPredicate")
            .field("expression", &self.expression)
            .finish()
    }
}

enum Node {
    True,
    Test(Test),
    And(Box<Node>, Box<Node>),
    Or(Box<Node>, Box<Node>),
}

impl Node {
    fn and(left: Node, right: Node) -> Node {
        Node::And(Box::new(left), Box::new(right))
    }

    fn or(left: Node, right: Node) -> Node {
        Node::Or(Box::new(left), Box::new(right))
    }

    fn eval(&self, row: &dyn Any) -> bool {
        match self {
            Node::True => true,
            Node::Test(test) => test.eval(row),
            Node::And(left, right) => left.eval(row) && right.eval(row),
            Node::Or(left, right) => left.eval(row) || right.eval(row),
        }
    }
}

struct Test {
    field: FieldDescriptor<'static>,
    operator: Operator,
    literal: Value<'static>,
}

impl Test {
    fn eval(&self, row: &dyn Any) -> bool {
        let value = match self.field.read(row) {
            Some(value) => value,
            None => return false,
        };

        match self.operator {
            Operator::Equal => value == self.literal,
            Operator::LessThan => value < self.literal,
            Operator::GreaterThan => value > self.literal,
            Operator::LessOrEqual => value <= self.literal,
            Operator::GreaterOrEqual => value >= self.literal,
            Operator::Contains => match (value.as_str(), self.literal.as_str()) {
                (Some(haystack), Some(needle)) => haystack.contains(needle),
                _ => false,
            },
        }
    }
}

/// Binds every clause of `grouping` to the schema of `T`.
///
/// Alternatives of a group are joined with OR, groups with AND, both
/// folded left to right. The first failing clause aborts the whole build.
pub fn compile<T: Record>(grouping: &Grouping) -> Result<CompiledPredicate<T>, CompileError> {
    let schema = T::schema();

    let mut expressions = vec![];
    let mut nodes = vec![];

    for group in grouping.groups.iter() {
        let mut or_expressions = vec![];
        let mut or_nodes = vec![];

        for clause in group.alternatives.iter() {
            let (expression, test) = compile_clause(schema, clause)?;
            or_expressions.push(expression);
            or_nodes.push(Node::Test(test));
        }

        if let Some(expression) = or_expressions.into_iter().reduce(Expression::or) {
            expressions.push(expression);
        }

        if let Some(node) = or_nodes.into_iter().reduce(Node::or) {
            nodes.push(node);
        }
    }

    let expression = expressions.into_iter().reduce(Expression::and).unwrap_or(Expression::True);
    let root = nodes.into_iter().reduce(Node::and).unwrap_or(Node::True);

    debug!("compiled filter for `{}`: {}", schema.name(), expression);

    Ok(CompiledPredicate {
        expression,
        root,
        row: PhantomData,
    })
}

fn compile_clause(schema: &'static Schema, clause: &Clause) -> Result<(Expression, Test), CompileError> {
    let field = schema.resolve(&clause.path)?;
    let kind = field.kind();
    let path = clause.path.to_string();

    let literal = match coerce(kind, &clause.literal) {
        Some(literal) => literal,
        None => return Err(CompileError::ValueCoercionFailed {
            path,
            literal: clause.literal.clone(),
            kind,
        }),
    };

    let operator = match clause.operator() {
        Some(operator) => operator,
        None => return Err(CompileError::UnknownOperator(clause.operator.clone())),
    };

    // lt, gt, le and ge stay valid for every scalar kind, bool and uuid included
    if operator == Operator::Contains && kind != FieldKind::Str {
        return Err(CompileError::ContainsRequiresString { path, kind });
    }

    let expression = Expression::Comparison {
        path: clause.path.clone(),
        operator,
        literal: clause.literal.clone(),
    };

    Ok((expression, Test { field, operator, literal }))
}
