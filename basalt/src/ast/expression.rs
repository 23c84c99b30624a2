// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Write};

use crate::ArithmeticOperator;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Integer(i64),
    FloatingPoint(f64),
    String(String),
}

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(i) => i.fmt(f),
            Self::FloatingPoint(float) => float.fmt(f),
            Self::String(string) => {
                f.write_char('"')?;
                f.write_str(string)?;
                f.write_char('"')
            }
        }
    }
}

/// One node of an expression list. Operands and operators are kept in source
/// order; precedence is applied by whoever evaluates the list.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal),

    /// Normalized name of a declared variable.
    VariableReference(String),
    ArithmeticOperator(ArithmeticOperator),

    /// A parenthesized sub-expression.
    Complex(Vec<Expression>),

    FunctionCall {
        name: String,
        arguments: Vec<Vec<Expression>>,
    },
}

impl Expression {
    /// The parenthesis depth of this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Complex(children) => 1 + depth_of(children),
            Self::FunctionCall { arguments, .. } => {
                1 + arguments.iter().map(|argument| depth_of(argument)).max().unwrap_or(0)
            }
            _ => 0,
        }
    }

    #[must_use]
    pub const fn is_operator(&self) -> bool {
        matches!(self, Self::ArithmeticOperator(..))
    }
}

/// The deepest nesting inside an expression list.
#[must_use]
pub fn depth_of(expressions: &[Expression]) -> usize {
    expressions.iter()
        .map(Expression::depth)
        .max()
        .unwrap_or(0)
}

fn write_list(f: &mut std::fmt::Formatter<'_>, expressions: &[Expression]) -> std::fmt::Result {
    for (index, expression) in expressions.iter().enumerate() {
        if index != 0 {
            f.write_char(' ')?;
        }
        expression.fmt(f)?;
    }

    Ok(())
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(literal) => literal.fmt(f),
            Self::VariableReference(name) => f.write_str(name),
            Self::ArithmeticOperator(operator) => f.write_str(operator.as_str()),
            Self::Complex(children) => {
                f.write_char('(')?;
                write_list(f, children)?;
                f.write_char(')')
            }

            Self::FunctionCall { name, arguments } => {
                f.write_str(name)?;
                f.write_char('(')?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index != 0 {
                        f.write_str(", ")?;
                    }
                    write_list(f, argument)?;
                }
                f.write_char(')')
            }
        }
    }
}
