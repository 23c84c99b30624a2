// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, sync::Arc};

use basalt::{
    DataType,
    ExecutionEnvironment,
    Expression,
    FileHandle,
    OpenTarget,
    PrintItem,
    PrintSeparator,
    Procedure,
    Statement,
    StatementExecutor,
    StatementFlow,
    StatementKind,
    StrExt,
    Variable,
};

use crate::{RuntimeError, RuntimeErrorKind, RuntimeResult, Scope, Value};

/// Executes statements by walking their expressions directly.
#[derive(Debug, Default)]
pub struct Interpreter {
    scopes: Vec<Scope>,
    globals: HashMap<String, Value>,

    /// Set once `END` ran, possibly deep inside a function call.
    ended: bool,
}

impl Interpreter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initializes the globals and runs the loaded unit from `MAIN`.
    pub fn run(&mut self, environment: &mut ExecutionEnvironment) -> RuntimeResult<()> {
        let Some(main) = environment.main_procedure().cloned() else {
            return environment.execute(self);
        };

        self.scopes.clear();
        self.globals.clear();
        self.ended = false;

        self.initialize_globals(environment)?;

        let scope = self.create_scope(&main, Vec::new())?;
        self.scopes.push(scope);

        let result = environment.execute(self);

        self.scopes.clear();
        environment.output().flush();
        result
    }

    /// The value of a global after a run, for inspection.
    #[must_use]
    pub fn global(&self, name: &str) -> Option<&Value> {
        self.globals.get(&name.normalized_name())
    }

    fn initialize_globals(&mut self, environment: &mut ExecutionEnvironment) -> RuntimeResult<()> {
        let globals: Vec<Variable> = environment.globals().iter().cloned().collect();

        for variable in &globals {
            self.globals.insert(variable.name.normalized_name(), Value::default_for(variable.data_type));
        }

        for variable in &globals {
            if variable.is_array {
                let value = self.initial_value(variable, environment).map_err(|e| e.at_line(variable.line))?;
                self.globals.insert(variable.name.normalized_name(), value);
            }
        }

        log::debug!("Initialized {} global(s)", globals.len());
        Ok(())
    }

    /// `DIM x(10)` holds elements `0` up to and including `10`.
    fn initial_value(&mut self, variable: &Variable, environment: &mut ExecutionEnvironment) -> RuntimeResult<Value> {
        if !variable.is_array {
            return Ok(Value::default_for(variable.data_type));
        }

        let upper_bound = match &variable.array_size {
            Some(size) => self.evaluate(size, environment)?.to_integer()?,
            None => -1,
        };

        let len = usize::try_from(upper_bound.saturating_add(1)).unwrap_or(0);
        Ok(Value::array(variable.data_type, len))
    }

    fn create_scope(&self, procedure: &Arc<Procedure>, arguments: Vec<Value>) -> RuntimeResult<Scope> {
        if arguments.len() != procedure.parameters().len() {
            return Err(RuntimeErrorKind::ArgumentCount {
                name: procedure.name().to_string(),
                expected: procedure.parameters().len(),
                found: arguments.len(),
            }.into());
        }

        let mut scope = Scope::new(Arc::clone(procedure));

        for variable in procedure.locals().iter().filter(|variable| !variable.is_parameter) {
            let value = if variable.is_array {
                Value::Array(Vec::new())
            } else {
                Value::default_for(variable.data_type)
            };
            scope.insert(&variable.name, value);
        }

        for (name, argument) in procedure.parameters().iter().zip(arguments) {
            let data_type = procedure.find_local(name).map_or(DataType::Unknown, |variable| variable.data_type);
            scope.insert(name, argument.coerce(data_type)?);
        }

        Ok(scope)
    }

    /// Runs a procedure or function body in a fresh scope. Functions always
    /// give back a value, the default of their type when nothing was
    /// returned.
    pub(crate) fn call(&mut self, procedure: &Arc<Procedure>, arguments: Vec<Value>, environment: &mut ExecutionEnvironment) -> RuntimeResult<Option<Value>> {
        let scope = self.create_scope(procedure, arguments)?;
        self.scopes.push(scope);

        let flow = environment.run_procedure(procedure, self);
        let scope = self.scopes.pop();

        if flow? == StatementFlow::End {
            self.ended = true;
        }

        let Some(return_type) = procedure.return_type() else {
            return Ok(None);
        };

        let value = scope
            .and_then(|mut scope| scope.take_return_value())
            .unwrap_or_else(|| Value::default_for(return_type));

        Ok(Some(value))
    }

    fn evaluate_arguments(&mut self, arguments: &[Vec<Expression>], environment: &mut ExecutionEnvironment) -> RuntimeResult<Vec<Value>> {
        let mut values = Vec::with_capacity(arguments.len());
        for argument in arguments {
            values.push(self.evaluate(argument, environment)?);
        }
        Ok(values)
    }

    pub(crate) fn call_function(&mut self, name: &str, arguments: &[Vec<Expression>], environment: &mut ExecutionEnvironment) -> RuntimeResult<Value> {
        let Some(function) = environment.function(name) else {
            return Err(RuntimeErrorKind::UndefinedFunction { name: name.to_string() }.into());
        };

        let arguments = self.evaluate_arguments(arguments, environment)?;
        let value = self.call(&function, arguments, environment)?;

        Ok(value.unwrap_or_else(|| Value::default_for(DataType::default())))
    }

    /// Locals of the running body first, then the globals the environment
    /// declares. Nothing else is visible.
    pub(crate) fn variable(&self, name: &str, environment: &ExecutionEnvironment) -> RuntimeResult<&Value> {
        if let Some(scope) = self.scopes.last() {
            if scope.procedure().find_local(name).is_some() {
                return scope.find(name).ok_or_else(|| undefined(name));
            }
        }

        if environment.find_global(name).is_some() {
            return self.globals.get(&name.normalized_name()).ok_or_else(|| undefined(name));
        }

        Err(undefined(name))
    }

    fn variable_mut(&mut self, name: &str, environment: &ExecutionEnvironment) -> RuntimeResult<(&mut Value, DataType)> {
        if let Some(scope) = self.scopes.last_mut() {
            let local_type = scope.procedure().find_local(name).map(|variable| variable.data_type);
            if let Some(data_type) = local_type {
                let value = scope.find_mut(name).ok_or_else(|| undefined(name))?;
                return Ok((value, data_type));
            }
        }

        if let Some(global) = environment.find_global(name) {
            let data_type = global.data_type;
            let value = self.globals.get_mut(&name.normalized_name()).ok_or_else(|| undefined(name))?;
            return Ok((value, data_type));
        }

        Err(undefined(name))
    }

    pub(crate) fn read_variable(&self, name: &str, environment: &ExecutionEnvironment) -> RuntimeResult<Value> {
        match self.variable(name, environment)? {
            Value::Array(..) => Err(RuntimeErrorKind::MissingIndex { name: name.to_string() }.into()),
            value => Ok(value.clone()),
        }
    }

    pub(crate) fn read_element(&mut self, name: &str, index: &[Expression], environment: &mut ExecutionEnvironment) -> RuntimeResult<Value> {
        let index = self.evaluate(index, environment)?.to_integer()?;

        let Value::Array(elements) = self.variable(name, environment)? else {
            return Err(RuntimeErrorKind::NotAnArray { name: name.to_string() }.into());
        };

        usize::try_from(index).ok()
            .and_then(|position| elements.get(position))
            .cloned()
            .ok_or_else(|| RuntimeErrorKind::IndexOutOfRange {
                name: name.to_string(),
                index,
                size: elements.len(),
            }.into())
    }

    /// Stores `value`, converted to the declared type of the variable.
    fn store(&mut self, name: &str, index: Option<i64>, value: Value, environment: &ExecutionEnvironment) -> RuntimeResult<()> {
        let (slot, data_type) = self.variable_mut(name, environment)?;

        match (slot, index) {
            (Value::Array(elements), Some(index)) => {
                let size = elements.len();
                let element = usize::try_from(index).ok()
                    .and_then(|position| elements.get_mut(position))
                    .ok_or_else(|| RuntimeErrorKind::IndexOutOfRange {
                        name: name.to_string(),
                        index,
                        size,
                    })?;

                *element = value.coerce(data_type)?;
            }

            (Value::Array(..), None) => {
                return Err(RuntimeErrorKind::MissingIndex { name: name.to_string() }.into());
            }

            (_, Some(..)) => {
                return Err(RuntimeErrorKind::NotAnArray { name: name.to_string() }.into());
            }

            (slot, None) => *slot = value.coerce(data_type)?,
        }

        Ok(())
    }

    fn data_type_of(&self, name: &str, environment: &ExecutionEnvironment) -> RuntimeResult<DataType> {
        let local = self.scopes.last()
            .and_then(|scope| scope.procedure().find_local(name))
            .map(|variable| variable.data_type);

        local
            .or_else(|| environment.find_global(name).map(|variable| variable.data_type))
            .ok_or_else(|| undefined(name))
    }

    fn execute_kind(&mut self, statement: &Statement, procedure: &Arc<Procedure>, environment: &mut ExecutionEnvironment) -> RuntimeResult<StatementFlow> {
        match &statement.kind {
            StatementKind::ProcedureStart { .. }
                | StatementKind::ProcedureEnd
                | StatementKind::FunctionStart { .. }
                | StatementKind::FunctionEnd
                | StatementKind::Comment => (),

            StatementKind::Pass { text } => {
                log::trace!("Skipping `{text}` on line {}", statement.line);
            }

            StatementKind::VariableDeclaration { name, .. } => {
                let Some(variable) = procedure.find_local(name).cloned() else {
                    return Err(undefined(name));
                };

                let value = self.initial_value(&variable, environment)?;
                if let Some(scope) = self.scopes.last_mut() {
                    scope.insert(&variable.name, value);
                }
            }

            StatementKind::Assignment { variable, index, expression } => {
                let value = self.evaluate(expression, environment)?;
                let index = match index {
                    Some(index) => Some(self.evaluate(index, environment)?.to_integer()?),
                    None => None,
                };

                self.store(variable, index, value, environment)?;
            }

            StatementKind::Print { items } => {
                let text = self.print_text(items, environment)?;
                let output = environment.output();
                output.write(&text);

                if items.last().map_or(true, |item| item.separator.is_none()) {
                    output.write("\n");
                }
            }

            StatementKind::PrintFile { handle, items } => {
                let handle = self.handle(handle, environment)?;
                let text = self.print_text(items, environment)?;

                environment.file_mut(statement.line, handle)?
                    .stream()
                    .write_line(&text)
                    .map_err(|source| RuntimeErrorKind::Io { handle, source })?;
            }

            StatementKind::InputFile { handle, variable } => {
                let handle = self.handle(handle, environment)?;
                let line = environment.file_mut(statement.line, handle)?
                    .stream()
                    .read_line()
                    .map_err(|source| RuntimeErrorKind::Io { handle, source })?;

                let Some(line) = line else {
                    return Err(RuntimeErrorKind::EndOfFile { handle }.into());
                };

                let data_type = self.data_type_of(variable, environment)?;
                self.store(variable, None, Value::parse_as(&line, data_type)?, environment)?;
            }

            StatementKind::Call { procedure: name, arguments } => {
                let Some(callee) = environment.procedure(name) else {
                    return Err(RuntimeErrorKind::UndefinedProcedure { name: name.clone() }.into());
                };

                let arguments = self.evaluate_arguments(arguments, environment)?;
                self.call(&callee, arguments, environment)?;
            }

            StatementKind::Return { expression } => {
                match (expression, procedure.return_type()) {
                    (Some(expression), Some(return_type)) => {
                        let value = self.evaluate(expression, environment)?.coerce(return_type)?;
                        if let Some(scope) = self.scopes.last_mut() {
                            scope.set_return_value(value);
                        }
                    }

                    (Some(..), None) => {
                        return Err(RuntimeErrorKind::UnexpectedReturnValue {
                            procedure: procedure.name().to_string(),
                        }.into());
                    }

                    (None, _) => (),
                }

                return Ok(StatementFlow::Return);
            }

            StatementKind::Open { path, mode, target } => {
                let path = match self.evaluate(path, environment)? {
                    Value::String(path) => path,
                    other => {
                        return Err(RuntimeErrorKind::TypeMismatch {
                            expected: "string",
                            found: other.type_name().to_string(),
                        }.into());
                    }
                };

                match target {
                    OpenTarget::Handle(handle) => {
                        let handle = self.handle(handle, environment)?;
                        environment.open_file(statement.line, &path, *mode, Some(handle))?;
                    }

                    OpenTarget::Variable(variable) => {
                        let handle = environment.open_file(statement.line, &path, *mode, None)?;
                        self.store(variable, None, Value::Integer(handle.into()), environment)?;
                    }
                }
            }

            StatementKind::Close { handle } => match handle {
                Some(handle) => {
                    let handle = self.handle(handle, environment)?;
                    environment.close_file(statement.line, handle)?;
                }
                None => environment.close_all_files(statement.line)?,
            },

            StatementKind::End => return Ok(StatementFlow::End),
        }

        Ok(StatementFlow::Continue)
    }

    fn handle(&mut self, expression: &[Expression], environment: &mut ExecutionEnvironment) -> RuntimeResult<FileHandle> {
        let value = self.evaluate(expression, environment)?.to_integer()?;
        FileHandle::try_from(value)
            .map_err(|_| RuntimeErrorKind::InvalidHandle { value }.into())
    }

    /// `;` glues items together, `,` puts a tab between them.
    fn print_text(&mut self, items: &[PrintItem], environment: &mut ExecutionEnvironment) -> RuntimeResult<String> {
        let mut text = String::new();

        for item in items {
            if !item.expression.is_empty() {
                text += &self.evaluate(&item.expression, environment)?.format_for_print();
            }

            if item.separator == Some(PrintSeparator::Comma) {
                text.push('\t');
            }
        }

        Ok(text)
    }
}

impl StatementExecutor for Interpreter {
    type Error = RuntimeError;

    fn execute_statement(
        &mut self,
        statement: &Statement,
        procedure: &Arc<Procedure>,
        environment: &mut ExecutionEnvironment,
    ) -> Result<StatementFlow, Self::Error> {
        let flow = self.execute_kind(statement, procedure, environment)
            .map_err(|e| e.at_line(statement.line))?;

        if self.ended {
            return Ok(StatementFlow::End);
        }

        Ok(flow)
    }
}

fn undefined(name: &str) -> RuntimeError {
    RuntimeErrorKind::UndefinedVariable { name: name.to_string() }.into()
}
