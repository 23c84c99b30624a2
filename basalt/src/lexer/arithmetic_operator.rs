// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::{Display, Formatter};

use strum::IntoStaticStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
pub enum ArithmeticOperator {
    #[strum(serialize = "plus")]
    Add,
    #[strum(serialize = "minus")]
    Subtract,
    #[strum(serialize = "times")]
    Multiply,
    #[strum(serialize = "divided by")]
    Divide,
    #[strum(serialize = "integer division")]
    IntegerDivide,
    #[strum(serialize = "modulo")]
    Modulo,
    #[strum(serialize = "power")]
    Power,
}

impl ArithmeticOperator {
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '\\' => Some(Self::IntegerDivide),
            '^' => Some(Self::Power),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::IntegerDivide => "\\",
            Self::Modulo => "MOD",
            Self::Power => "^",
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl Display for ArithmeticOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
