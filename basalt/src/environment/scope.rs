// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

/// Names a scope container without holding on to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeId {
    Global,

    /// Index into the procedure arena of the environment.
    Procedure(usize),
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Global => f.write_str("global scope"),
            Self::Procedure(index) => write!(f, "procedure scope #{index}"),
        }
    }
}
