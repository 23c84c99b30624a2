// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{LineNumber, SourcePosition};

use super::{Token, TokenKind};

#[derive(Clone, Debug, PartialEq)]
pub struct TokenizedLine {
    number: LineNumber,
    tokens: Vec<Token>,
}

impl TokenizedLine {
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            number: LineNumber::UNASSIGNED,
            tokens,
        }
    }

    #[must_use]
    pub fn with_number(number: LineNumber, tokens: Vec<Token>) -> Self {
        Self {
            number,
            tokens,
        }
    }

    #[must_use]
    pub const fn number(&self) -> LineNumber {
        self.number
    }

    pub(crate) fn assign_number(&mut self, number: LineNumber) {
        debug_assert!(!self.number.is_assigned(), "line numbers are assigned once");
        self.number = number;
    }

    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    pub fn token(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[must_use]
    pub fn first_kind(&self) -> Option<&TokenKind> {
        self.tokens.first().map(|token| &token.kind)
    }

    /// Replaces the token at `index`, returning the one that was there.
    pub fn substitute(&mut self, index: usize, token: Token) -> Token {
        std::mem::replace(&mut self.tokens[index], token)
    }

    #[must_use]
    pub fn position(&self, index: usize) -> SourcePosition {
        let column = match self.tokens.get(index) {
            Some(token) => token.column,
            None => self.text().chars().count(),
        };

        SourcePosition::new(self.number, column)
    }

    /// Reconstructs the source line from the token texts.
    #[must_use]
    pub fn text(&self) -> String {
        self.tokens.iter()
            .map(|token| token.text.as_str())
            .collect()
    }
}
