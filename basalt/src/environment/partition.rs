// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, sync::Arc};

use crate::{
    BasaltError,
    BasaltResult,
    DataType,
    DataTypeDescriptor,
    DataTypeProvider,
    LineNumber,
    ParameterDefinition,
    Statement,
    StatementKind,
    TypeExpression,
};

use super::{Procedure, ProcedureKind, ScopeId, Variable, VariableTable};

/// Everything a source unit declares, built before the environment commits
/// any of it.
#[derive(Debug, Default)]
pub(crate) struct Partition {
    pub globals: VariableTable,
    pub procedures: HashMap<String, Arc<Procedure>>,
    pub functions: HashMap<String, Arc<Procedure>>,
    pub scopes: Vec<Arc<Procedure>>,
}

struct ProcedureBuilder {
    name: String,
    kind: ProcedureKind,
    line: LineNumber,
    parameters: Vec<String>,
    locals: VariableTable,
    body: Vec<Statement>,
}

enum SpanState {
    TopLevel,
    InProcedure(ProcedureBuilder),
}

pub(crate) struct Partitioner<'types> {
    types: &'types dyn DataTypeProvider,
    partition: Partition,
    state: SpanState,
}

impl<'types> Partitioner<'types> {
    pub fn new(types: &'types dyn DataTypeProvider) -> Self {
        Self {
            types,
            partition: Partition::default(),
            state: SpanState::TopLevel,
        }
    }

    pub fn partition(mut self, statements: impl IntoIterator<Item = Statement>) -> BasaltResult<Partition> {
        for statement in statements {
            self.state = match std::mem::replace(&mut self.state, SpanState::TopLevel) {
                SpanState::TopLevel => self.top_level(statement)?,
                SpanState::InProcedure(builder) => self.in_procedure(builder, statement)?,
            };
        }

        if let SpanState::InProcedure(builder) = self.state {
            let keyword = span_keyword(builder.kind);
            return Err(BasaltError::syntax(
                builder.line,
                format!("`{keyword} {}` is never closed with `END {keyword}`", builder.name),
            ));
        }

        Ok(self.partition)
    }

    fn top_level(&mut self, statement: Statement) -> BasaltResult<SpanState> {
        let line = statement.line;

        match statement.kind {
            StatementKind::ProcedureStart { name, parameters } => {
                self.start(name, ProcedureKind::Procedure, line, &parameters)
            }

            StatementKind::FunctionStart { name, parameters, return_type } => {
                let return_type = self.map_type(line, &return_type)?;
                self.start(name, ProcedureKind::Function { return_type }, line, &parameters)
            }

            StatementKind::ProcedureEnd | StatementKind::FunctionEnd => {
                Err(BasaltError::syntax(line, "found an `END` without a matching `PROCEDURE` or `FUNCTION`"))
            }

            StatementKind::VariableDeclaration { name, data_type } => {
                let variable = self.variable(line, &name, &data_type)?;
                self.partition.globals.declare(variable)?;
                Ok(SpanState::TopLevel)
            }

            kind if kind.is_inert() => Ok(SpanState::TopLevel),

            kind => Err(BasaltError::syntax(
                line,
                format!("`{}` statements must be inside a procedure or function", kind.as_ref()),
            )),
        }
    }

    fn in_procedure(&mut self, mut builder: ProcedureBuilder, statement: Statement) -> BasaltResult<SpanState> {
        let line = statement.line;

        match &statement.kind {
            StatementKind::ProcedureStart { .. } | StatementKind::FunctionStart { .. } => {
                let keyword = span_keyword(builder.kind);
                Err(BasaltError::syntax(
                    line,
                    format!("`{keyword} {}` must be closed before another one starts", builder.name),
                ))
            }

            StatementKind::ProcedureEnd | StatementKind::FunctionEnd => {
                let closes_function = matches!(statement.kind, StatementKind::FunctionEnd);
                if closes_function != matches!(builder.kind, ProcedureKind::Function { .. }) {
                    let keyword = span_keyword(builder.kind);
                    return Err(BasaltError::syntax(line, format!("expected `END {keyword}` to close `{}`", builder.name)));
                }

                self.finish(builder)?;
                Ok(SpanState::TopLevel)
            }

            StatementKind::VariableDeclaration { name, data_type } => {
                let variable = self.variable(line, name, data_type)?;
                builder.locals.declare(variable)?;
                builder.body.push(statement);
                Ok(SpanState::InProcedure(builder))
            }

            _ => {
                builder.body.push(statement);
                Ok(SpanState::InProcedure(builder))
            }
        }
    }

    fn start(&self, name: String, kind: ProcedureKind, line: LineNumber, parameters: &[ParameterDefinition]) -> BasaltResult<SpanState> {
        let mut builder = ProcedureBuilder {
            name,
            kind,
            line,
            parameters: Vec::with_capacity(parameters.len()),
            locals: VariableTable::new(),
            body: Vec::new(),
        };

        for parameter in parameters {
            let data_type = self.map_type(line, &parameter.type_name)?;
            builder.locals.declare(Variable::parameter(&parameter.name, data_type, line))?;
            builder.parameters.push(parameter.name.clone());
        }

        Ok(SpanState::InProcedure(builder))
    }

    fn finish(&mut self, builder: ProcedureBuilder) -> BasaltResult<()> {
        if self.partition.procedures.contains_key(&builder.name) || self.partition.functions.contains_key(&builder.name) {
            return Err(BasaltError::DuplicateDefinition {
                line: builder.line,
                name: builder.name,
            });
        }

        let scope = ScopeId::Procedure(self.partition.scopes.len());
        let is_function = matches!(builder.kind, ProcedureKind::Function { .. });

        let procedure = Arc::new(Procedure::new(
            builder.name.clone(),
            builder.kind,
            builder.line,
            builder.body,
            builder.parameters,
            builder.locals,
            scope,
        ));

        self.partition.scopes.push(Arc::clone(&procedure));

        let table = if is_function {
            &mut self.partition.functions
        } else {
            &mut self.partition.procedures
        };
        table.insert(builder.name, procedure);

        Ok(())
    }

    fn variable(&self, line: LineNumber, name: &str, data_type: &DataTypeDescriptor) -> BasaltResult<Variable> {
        Ok(Variable {
            is_array: data_type.is_array,
            array_size: data_type.array_size.clone(),
            ..Variable::new(name, self.map_type(line, &data_type.type_name)?, line)
        })
    }

    fn map_type(&self, line: LineNumber, type_name: &TypeExpression) -> BasaltResult<DataType> {
        match self.types.map_type(type_name.text()) {
            Some(data_type) if data_type.is_known() => Ok(data_type),
            _ => Err(BasaltError::BadDataType {
                line,
                type_name: type_name.text().to_string(),
            }),
        }
    }
}

const fn span_keyword(kind: ProcedureKind) -> &'static str {
    match kind {
        ProcedureKind::Procedure => "PROCEDURE",
        ProcedureKind::Function { .. } => "FUNCTION",
    }
}
