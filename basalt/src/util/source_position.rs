// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use super::LineNumber;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    line: LineNumber,

    /// Zero-based character index into the pre-processed line.
    column: usize,
}

impl SourcePosition {
    #[must_use]
    pub const fn new(line: LineNumber, column: usize) -> Self {
        Self {
            line,
            column,
        }
    }

    #[must_use]
    pub const fn line(&self) -> LineNumber {
        self.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.column
    }
}

impl From<LineNumber> for SourcePosition {
    fn from(line: LineNumber) -> Self {
        Self::new(line, 0)
    }
}

impl Display for SourcePosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}:{}", self.line, self.column + 1))
    }
}
