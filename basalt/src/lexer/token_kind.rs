// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use super::{ArithmeticOperator, Keyword};

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Separator,

    ExpressionStart,
    ExpressionEnd,
    ArgumentSeparator,
    StatementSeparator,
    FileNumber,
    Assignment,
    ArithmeticOperator(ArithmeticOperator),

    Keyword(Keyword),
    Integer(i64),
    FloatingPoint(f64),
    StringLiteral(String),
    Comment,

    Identifier,
    ProcedureName,
    FunctionName,
    VariableName,

    Illegal(char),
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Separator => "separator",

            Self::ExpressionStart => "opening parenthesis",
            Self::ExpressionEnd => "closing parenthesis",
            Self::ArgumentSeparator => "comma",
            Self::StatementSeparator => "semicolon",
            Self::FileNumber => "file number sign",
            Self::Assignment => "equals sign",
            Self::ArithmeticOperator(operator) => operator.name(),

            Self::Keyword(..) => "keyword",
            Self::Integer(..) => "integer",
            Self::FloatingPoint(..) => "floating point number",
            Self::StringLiteral(..) => "string",
            Self::Comment => "comment",

            Self::Identifier => "identifier",
            Self::ProcedureName => "procedure name",
            Self::FunctionName => "function name",
            Self::VariableName => "variable name",

            Self::Illegal(..) => "illegal character",
        }
    }

    #[must_use]
    pub const fn is_separator(&self) -> bool {
        matches!(self, Self::Separator)
    }

    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(kw) if *kw == keyword)
    }

    /// Whether this token names something the user declared.
    #[must_use]
    pub const fn is_user_name(&self) -> bool {
        matches!(self, Self::ProcedureName | Self::FunctionName | Self::VariableName)
    }
}
