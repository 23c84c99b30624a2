// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use basalt::{ArithmeticOperator, ExecutionEnvironment, Expression};

use crate::{Interpreter, RuntimeErrorKind, RuntimeResult, Value};

const ADDITIVE: u8 = 1;
const MULTIPLICATIVE: u8 = 2;
const POWER: u8 = 3;

const fn precedence(operator: ArithmeticOperator) -> u8 {
    match operator {
        ArithmeticOperator::Add | ArithmeticOperator::Subtract => ADDITIVE,
        ArithmeticOperator::Multiply
            | ArithmeticOperator::Divide
            | ArithmeticOperator::IntegerDivide
            | ArithmeticOperator::Modulo => MULTIPLICATIVE,
        ArithmeticOperator::Power => POWER,
    }
}

/// Cursor over the flat expression list the parser produced.
struct Items<'a> {
    items: &'a [Expression],
    cursor: usize,
}

impl<'a> Items<'a> {
    fn peek(&self) -> Option<&'a Expression> {
        self.items.get(self.cursor)
    }

    fn next(&mut self) -> Option<&'a Expression> {
        let item = self.peek()?;
        self.cursor += 1;
        Some(item)
    }
}

impl Interpreter {
    /// Evaluates an expression list with the usual precedence: `^` binds
    /// tightest, then `* / \ MOD`, then `+ -`. `^` is right-associative.
    pub(crate) fn evaluate(&mut self, expression: &[Expression], environment: &mut ExecutionEnvironment) -> RuntimeResult<Value> {
        if expression.is_empty() {
            return Err(RuntimeErrorKind::EmptyExpression.into());
        }

        let mut items = Items {
            items: expression,
            cursor: 0,
        };

        let value = self.binary(&mut items, ADDITIVE, environment)?;

        if let Some(extra) = items.peek() {
            return Err(RuntimeErrorKind::MissingOperator { found: extra.to_string() }.into());
        }

        Ok(value)
    }

    fn binary(&mut self, items: &mut Items<'_>, min_precedence: u8, environment: &mut ExecutionEnvironment) -> RuntimeResult<Value> {
        let mut lhs = self.unary(items, environment)?;

        while let Some(Expression::ArithmeticOperator(operator)) = items.peek() {
            let operator = *operator;
            let precedence = precedence(operator);
            if precedence < min_precedence {
                break;
            }

            items.next();
            if items.peek().is_none() {
                return Err(RuntimeErrorKind::MissingOperand { operator }.into());
            }

            let next_precedence = if operator == ArithmeticOperator::Power {
                precedence
            } else {
                precedence + 1
            };

            let rhs = self.binary(items, next_precedence, environment)?;
            lhs = Value::arithmetic(operator, lhs, rhs)?;
        }

        Ok(lhs)
    }

    fn unary(&mut self, items: &mut Items<'_>, environment: &mut ExecutionEnvironment) -> RuntimeResult<Value> {
        let Some(item) = items.next() else {
            return Err(RuntimeErrorKind::EmptyExpression.into());
        };

        match item {
            Expression::ArithmeticOperator(operator @ (ArithmeticOperator::Subtract | ArithmeticOperator::Add)) => {
                if items.peek().is_none() {
                    return Err(RuntimeErrorKind::MissingOperand { operator: *operator }.into());
                }

                // Negation binds looser than `^`, so `-2 ^ 2` is -4.
                let operand = self.binary(items, POWER, environment)?;
                if *operator == ArithmeticOperator::Subtract {
                    Ok(operand.negate()?)
                } else {
                    Ok(Value::arithmetic(ArithmeticOperator::Add, Value::Integer(0), operand)?)
                }
            }

            Expression::ArithmeticOperator(operator) => {
                Err(RuntimeErrorKind::MissingOperand { operator: *operator }.into())
            }

            Expression::Literal(literal) => Ok(Value::from(literal)),

            Expression::Complex(inner) => self.evaluate(inner, environment),

            Expression::VariableReference(name) => {
                if let Some(Expression::Complex(index)) = items.peek() {
                    items.next();
                    return self.read_element(name, index, environment);
                }

                self.read_variable(name, environment)
            }

            Expression::FunctionCall { name, arguments } => self.call_function(name, arguments, environment),
        }
    }
}
