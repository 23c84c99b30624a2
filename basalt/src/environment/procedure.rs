// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{DataType, LineNumber, Statement};

use super::{ScopeId, Variable, VariableTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcedureKind {
    Procedure,
    Function {
        return_type: DataType,
    },
}

/// A procedure or function body, sliced out of the statement list at load
/// time. Owns its statements and its local variables.
#[derive(Debug)]
pub struct Procedure {
    name: String,
    kind: ProcedureKind,
    line: LineNumber,
    body: Vec<Statement>,
    parameters: Vec<String>,
    locals: VariableTable,
    scope: ScopeId,
    parent: ScopeId,
}

impl Procedure {
    #[must_use]
    pub(crate) fn new(
        name: String,
        kind: ProcedureKind,
        line: LineNumber,
        body: Vec<Statement>,
        parameters: Vec<String>,
        locals: VariableTable,
        scope: ScopeId,
    ) -> Self {
        Self {
            name,
            kind,
            line,
            body,
            parameters,
            locals,
            scope,
            parent: ScopeId::Global,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn kind(&self) -> ProcedureKind {
        self.kind
    }

    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self.kind, ProcedureKind::Function { .. })
    }

    #[must_use]
    pub const fn return_type(&self) -> Option<DataType> {
        match self.kind {
            ProcedureKind::Procedure => None,
            ProcedureKind::Function { return_type } => Some(return_type),
        }
    }

    /// The line of the `PROCEDURE`/`FUNCTION` header.
    #[must_use]
    pub const fn line(&self) -> LineNumber {
        self.line
    }

    #[must_use]
    pub fn body(&self) -> &[Statement] {
        &self.body
    }

    /// Parameter names in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    #[must_use]
    pub const fn locals(&self) -> &VariableTable {
        &self.locals
    }

    /// Looks in this procedure's own table only, never in the globals.
    #[must_use]
    pub fn find_local(&self, name: &str) -> Option<&Variable> {
        self.locals.get(name)
    }

    #[must_use]
    pub const fn scope(&self) -> ScopeId {
        self.scope
    }

    #[must_use]
    pub const fn parent(&self) -> ScopeId {
        self.parent
    }
}
