use super::tokens::*;

use serde::{Deserialize, Serialize};

use std::fmt;

/// Boolean expression tree built from a [`Grouping`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Expression {
    True,
    Comparison { path: PropertyPath, operator: Operator, literal: String },
    And { left: Box<Expression>, right: Box<Expression> },
    Or { left: Box<Expression>, right: Box<Expression> },
}

impl Expression {
    pub fn and(left: Expression, right: Expression) -> Expression {
        Expression::And {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn or(left: Expression, right: Expression) -> Expression {
        Expression::Or {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn comparisons(&self) -> usize {
        match self {
            Expression::True => 0,
            Expression::Comparison { .. } => 1,
            Expression::And { left, right } | Expression::Or { left, right } => {
                left.comparisons() + right.comparisons()
            },
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::True => f.write_str("true"),
            Expression::Comparison { path, operator, literal } => {
                write!(f, "{} {} '{}'", path, operator, literal)
            },
            Expression::And { left, right } => write!(f, "({} && {})", left, right),
            Expression::Or { left, right } => write!(f, "({} || {})", left, right),
        }
    }
}
