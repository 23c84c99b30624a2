// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use super::Statement;

/// The flat statement list of one source unit, one statement per source line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeDom {
    statements: Vec<Statement>,
}

impl CodeDom {
    #[must_use]
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[must_use]
    pub fn into_statements(self) -> Vec<Statement> {
        self.statements
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
