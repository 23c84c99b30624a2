// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::AsRefStr;

use crate::{DataType, LineNumber, OpenMode};

use super::Expression;

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub line: LineNumber,
    pub kind: StatementKind,
}

impl Statement {
    #[must_use]
    pub fn new(line: LineNumber, kind: StatementKind) -> Self {
        Self { line, kind }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, AsRefStr)]
pub enum StatementKind {
    ProcedureStart {
        name: String,
        parameters: Vec<ParameterDefinition>,
    },
    ProcedureEnd,

    FunctionStart {
        name: String,
        parameters: Vec<ParameterDefinition>,
        return_type: TypeExpression,
    },
    FunctionEnd,

    VariableDeclaration {
        name: String,
        data_type: DataTypeDescriptor,
    },

    Assignment {
        variable: String,
        index: Option<Vec<Expression>>,
        expression: Vec<Expression>,
    },

    Print {
        items: Vec<PrintItem>,
    },

    PrintFile {
        handle: Vec<Expression>,
        items: Vec<PrintItem>,
    },

    InputFile {
        handle: Vec<Expression>,
        variable: String,
    },

    Call {
        procedure: String,
        arguments: Vec<Vec<Expression>>,
    },

    Return {
        expression: Option<Vec<Expression>>,
    },

    Open {
        path: Vec<Expression>,
        mode: OpenMode,
        target: OpenTarget,
    },

    Close {
        handle: Option<Vec<Expression>>,
    },

    /// Stops the whole program.
    End,

    Comment,

    /// A command this dialect does not know, kept so execution can step over it.
    Pass {
        text: String,
    },
}

impl StatementKind {
    /// Whether the statement opens or closes a procedure/function span.
    #[must_use]
    pub const fn is_span_marker(&self) -> bool {
        matches!(
            self,
            Self::ProcedureStart { .. } | Self::ProcedureEnd | Self::FunctionStart { .. } | Self::FunctionEnd
        )
    }

    /// Statements that do nothing when executed.
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        matches!(self, Self::Comment | Self::Pass { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintSeparator {
    /// `;` glues the next item directly to this one.
    Semicolon,

    /// `,` moves to the next print zone.
    Comma,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintItem {
    pub expression: Vec<Expression>,
    pub separator: Option<PrintSeparator>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenTarget {
    /// `AS #n`
    Handle(Vec<Expression>),

    /// `AS variable`, the variable receives a freshly allocated handle.
    Variable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDefinition {
    /// Normalized parameter name.
    pub name: String,
    pub type_name: TypeExpression,
}

/// The type as written after `AS`, resolved later by a `DataTypeProvider`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeExpression {
    pub text: String,
}

impl TypeExpression {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for TypeExpression {
    fn default() -> Self {
        Self::new(DataType::DEFAULT_NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTypeDescriptor {
    pub type_name: TypeExpression,
    pub is_array: bool,
    pub array_size: Option<Vec<Expression>>,
}
