// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use serde::Deserialize;

use crate::{BasaltError, BasaltResult, LineNumber, SourcePosition, Token, TokenKind};

use super::{Expression, Literal};

/// What the expression parser does with a token that cannot be part of an
/// expression.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownTokenPolicy {
    /// Advance past the token. Unbalanced parentheses are tolerated as well.
    #[default]
    Skip,

    /// Raise a syntax error for the token or the unbalanced parenthesis.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LevelEnd {
    /// The closing parenthesis of the level was consumed.
    Closed,

    /// A comma between function arguments was consumed.
    ArgumentSeparator,

    /// The tokens ran out.
    Exhausted,
}

/// Turns a token range into a flat list of [`Expression`]s, recursing on
/// parentheses.
#[derive(Debug)]
pub struct ExpressionParser<'tokens> {
    tokens: &'tokens [Token],
    line: LineNumber,
    policy: UnknownTokenPolicy,
    cursor: usize,
}

impl<'tokens> ExpressionParser<'tokens> {
    #[must_use]
    pub fn new(tokens: &'tokens [Token], line: LineNumber, policy: UnknownTokenPolicy) -> Self {
        Self {
            tokens,
            line,
            policy,
            cursor: 0,
        }
    }

    /// Parses until the tokens run out or a closing parenthesis ends the
    /// outermost level.
    pub fn parse(&mut self) -> BasaltResult<Vec<Expression>> {
        let (expressions, _) = self.parse_level(0, false)?;
        Ok(expressions)
    }

    /// The number of tokens consumed so far.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn parse_level(&mut self, depth: usize, in_arguments: bool) -> BasaltResult<(Vec<Expression>, LevelEnd)> {
        let tokens = self.tokens;
        let mut expressions = Vec::new();

        while let Some(token) = tokens.get(self.cursor) {
            self.cursor += 1;

            match &token.kind {
                TokenKind::Separator => (),

                TokenKind::ExpressionStart => {
                    let (children, end) = self.parse_level(depth + 1, false)?;
                    self.ensure_closed(token, end)?;
                    expressions.push(Expression::Complex(children));
                }

                TokenKind::ExpressionEnd => {
                    if depth == 0 && self.policy == UnknownTokenPolicy::Reject {
                        return Err(self.error(token, "found a `)` without a matching `(`"));
                    }

                    return Ok((expressions, LevelEnd::Closed));
                }

                TokenKind::ArgumentSeparator if in_arguments => {
                    return Ok((expressions, LevelEnd::ArgumentSeparator));
                }

                TokenKind::ArithmeticOperator(operator) => {
                    expressions.push(Expression::ArithmeticOperator(*operator));
                }

                TokenKind::Integer(integer) => {
                    expressions.push(Expression::Literal(Literal::Integer(*integer)));
                }

                TokenKind::FloatingPoint(float) => {
                    expressions.push(Expression::Literal(Literal::FloatingPoint(*float)));
                }

                TokenKind::StringLiteral(string) => {
                    expressions.push(Expression::Literal(Literal::String(string.clone())));
                }

                TokenKind::VariableName => {
                    expressions.push(Expression::VariableReference(token.normalized_name()));
                }

                TokenKind::FunctionName => {
                    let arguments = self.parse_call_arguments(depth)?;
                    expressions.push(Expression::FunctionCall {
                        name: token.normalized_name(),
                        arguments,
                    });
                }

                _ => self.unknown_token(token)?,
            }
        }

        Ok((expressions, LevelEnd::Exhausted))
    }

    /// A function name without parentheses is a call without arguments.
    fn parse_call_arguments(&mut self, depth: usize) -> BasaltResult<Vec<Vec<Expression>>> {
        let tokens = self.tokens;
        let mut lookahead = self.cursor;
        while tokens.get(lookahead).is_some_and(|token| token.kind.is_separator()) {
            lookahead += 1;
        }

        let Some(opening) = tokens.get(lookahead) else {
            return Ok(Vec::new());
        };

        if opening.kind != TokenKind::ExpressionStart {
            return Ok(Vec::new());
        }

        self.cursor = lookahead + 1;

        let mut arguments = Vec::new();
        loop {
            let (argument, end) = self.parse_level(depth + 1, true)?;
            arguments.push(argument);

            match end {
                LevelEnd::ArgumentSeparator => continue,
                LevelEnd::Closed => break,
                LevelEnd::Exhausted => {
                    self.ensure_closed(opening, end)?;
                    break;
                }
            }
        }

        if arguments.len() == 1 && arguments[0].is_empty() {
            arguments.clear();
        }

        Ok(arguments)
    }

    fn ensure_closed(&self, opening: &Token, end: LevelEnd) -> BasaltResult<()> {
        if end == LevelEnd::Exhausted && self.policy == UnknownTokenPolicy::Reject {
            return Err(self.error(opening, "this `(` is never closed"));
        }

        Ok(())
    }

    fn unknown_token(&self, token: &Token) -> BasaltResult<()> {
        match self.policy {
            UnknownTokenPolicy::Skip => {
                log::trace!("Skipping {} `{token}` on line {} in expression", token.kind.name(), self.line);
                Ok(())
            }

            UnknownTokenPolicy::Reject if token.kind == TokenKind::Identifier => {
                Err(self.error(token, format!("`{token}` is not declared")))
            }

            UnknownTokenPolicy::Reject => {
                Err(self.error(token, format!("unexpected {} `{token}` in expression", token.kind.name())))
            }
        }
    }

    fn error(&self, token: &Token, message: impl Into<String>) -> BasaltError {
        BasaltError::syntax(SourcePosition::new(self.line, token.column), message)
    }
}
