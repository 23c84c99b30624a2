// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use crate::StrExt;

use super::TokenKind;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,

    /// Zero-based character column inside the owning line.
    pub column: usize,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            column,
        }
    }

    /// The same token with another kind, used when promoting identifiers.
    #[must_use]
    pub fn with_kind(&self, kind: TokenKind) -> Self {
        Self {
            kind,
            text: self.text.clone(),
            column: self.column,
        }
    }

    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.text.normalized_name()
    }

    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
