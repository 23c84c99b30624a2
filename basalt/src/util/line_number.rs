// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

/// One-based number of a tokenized line. Blank lines don't receive a number,
/// so this counts statements rather than physical lines.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineNumber(usize);

impl LineNumber {
    pub const UNASSIGNED: Self = Self(0);

    #[must_use]
    pub const fn new(number: usize) -> Self {
        Self(number)
    }

    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }

    #[must_use]
    pub const fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl From<usize> for LineNumber {
    fn from(value: usize) -> Self {
        Self(value)
    }
}

impl Display for LineNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
