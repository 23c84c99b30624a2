// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, sync::Arc};

use strum::AsRefStr;

use crate::{
    BasaltError,
    BasaltResult,
    CodeDom,
    DataTypeProvider,
    LineNumber,
    OpenMode,
    StandardOutput,
    StrExt,
    SystemRuntime,
};

use super::{
    partition::Partitioner,
    FileHandle,
    IdGenerator,
    OpenFile,
    OpenFileTable,
    Procedure,
    ReleasePolicy,
    ScopeId,
    StatementExecutor,
    StatementFlow,
    Variable,
    VariableTable,
};

/// The name of the procedure execution starts at.
pub const MAIN_PROCEDURE_NAME: &str = "MAIN";

/// Default limit on nested calls. Bodies calling each other deeper than this
/// are assumed to recurse forever. Every level costs several interpreter stack
/// frames, so the limit has to stay well within an ordinary thread stack.
pub const MAX_CALL_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum EnvironmentState {
    Unloaded,
    Loaded,
    Executing,
}

/// Holds a loaded source unit: its procedures, functions and globals, the
/// open files and the handle generator.
pub struct ExecutionEnvironment {
    state: EnvironmentState,

    types: Box<dyn DataTypeProvider>,
    system: Box<dyn SystemRuntime>,
    output: Box<dyn StandardOutput>,

    globals: VariableTable,
    procedures: HashMap<String, Arc<Procedure>>,
    functions: HashMap<String, Arc<Procedure>>,

    /// Every procedure and function, indexed by [`ScopeId::Procedure`].
    scopes: Vec<Arc<Procedure>>,
    main: Option<Arc<Procedure>>,

    open_files: Option<OpenFileTable>,
    ids: IdGenerator,
    call_depth: usize,
    max_call_depth: usize,
}

impl ExecutionEnvironment {
    #[must_use]
    pub fn new(
        types: Box<dyn DataTypeProvider>,
        system: Box<dyn SystemRuntime>,
        output: Box<dyn StandardOutput>,
    ) -> Self {
        Self {
            state: EnvironmentState::Unloaded,
            types,
            system,
            output,
            globals: VariableTable::new(),
            procedures: HashMap::new(),
            functions: HashMap::new(),
            scopes: Vec::new(),
            main: None,
            open_files: None,
            ids: IdGenerator::new(),
            call_depth: 0,
            max_call_depth: MAX_CALL_DEPTH,
        }
    }

    #[must_use]
    pub fn with_release_policy(mut self, policy: ReleasePolicy) -> Self {
        self.ids = IdGenerator::with_policy(policy);
        self
    }

    #[must_use]
    pub fn with_max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = depth;
        self
    }

    #[must_use]
    pub const fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    #[must_use]
    pub const fn state(&self) -> EnvironmentState {
        self.state
    }

    /// Splits the statement list into procedures, functions and globals.
    /// Nothing is committed unless the whole unit is valid.
    pub fn load_unit(&mut self, code_dom: CodeDom) -> BasaltResult<()> {
        if self.state != EnvironmentState::Unloaded {
            return Err(BasaltError::engine("a unit is already loaded, unload it first"));
        }

        let partition = Partitioner::new(self.types.as_ref()).partition(code_dom.into_statements())?;

        self.globals = partition.globals;
        self.procedures = partition.procedures;
        self.functions = partition.functions;
        self.scopes = partition.scopes;
        self.main = self.procedures.get(MAIN_PROCEDURE_NAME).cloned();
        self.open_files = Some(OpenFileTable::new());
        self.state = EnvironmentState::Loaded;

        log::debug!(
            "Loaded {} procedure(s), {} function(s) and {} global(s), entry point {}",
            self.procedures.len(),
            self.functions.len(),
            self.globals.len(),
            if self.main.is_some() { "found" } else { "missing" },
        );

        Ok(())
    }

    /// Runs the `MAIN` procedure from top to bottom.
    pub fn execute<E: StatementExecutor>(&mut self, executor: &mut E) -> Result<(), E::Error> {
        match self.state {
            EnvironmentState::Unloaded => return Err(BasaltError::engine("no code is loaded").into()),
            EnvironmentState::Executing => return Err(BasaltError::engine("the unit is already executing").into()),
            EnvironmentState::Loaded => (),
        }

        let Some(main) = self.main.clone() else {
            return Err(BasaltError::MissingEntryPoint.into());
        };

        self.state = EnvironmentState::Executing;
        self.call_depth = 0;

        let result = self.run_procedure(&main, executor);

        if self.state == EnvironmentState::Executing {
            self.state = EnvironmentState::Loaded;
        }

        result.map(|_| ())
    }

    /// Walks the body of `procedure`, used by executors for calls. Returns
    /// [`StatementFlow::End`] when the program should stop.
    pub fn run_procedure<E: StatementExecutor>(&mut self, procedure: &Arc<Procedure>, executor: &mut E) -> Result<StatementFlow, E::Error> {
        if self.state != EnvironmentState::Executing {
            return Err(BasaltError::engine(format!("cannot run `{}` while the environment is {}", procedure.name(), self.state.as_ref())).into());
        }

        if self.call_depth >= self.max_call_depth {
            return Err(BasaltError::engine(format!(
                "calls nested deeper than {} levels while calling `{}`",
                self.max_call_depth,
                procedure.name(),
            )).into());
        }

        self.call_depth += 1;
        let result = self.run_body(procedure, executor);
        self.call_depth -= 1;

        result
    }

    fn run_body<E: StatementExecutor>(&mut self, procedure: &Arc<Procedure>, executor: &mut E) -> Result<StatementFlow, E::Error> {
        for statement in procedure.body() {
            log::trace!("{}:{} {}", procedure.name(), statement.line, statement.name());

            match executor.execute_statement(statement, procedure, self)? {
                StatementFlow::Continue => continue,
                StatementFlow::Return => return Ok(StatementFlow::Return),
                StatementFlow::End => return Ok(StatementFlow::End),
            }
        }

        Ok(StatementFlow::Continue)
    }

    /// Tears the unit down: entry point, tables, statements, open files,
    /// handles and finally the runtime. Unloading twice is harmless.
    pub fn unload_unit(&mut self) {
        self.main = None;

        self.globals.clear();
        self.functions.clear();
        self.procedures.clear();
        self.scopes.clear();

        if let Some(mut open_files) = self.open_files.take() {
            let count = open_files.len();
            let closed = open_files.safe_shutdown(self.system.as_mut());
            log::debug!("Closed {closed} of {count} open file(s) while unloading");
        }

        self.ids.reset();
        self.system.reset();
        self.state = EnvironmentState::Unloaded;
    }

    #[must_use]
    pub fn main_procedure(&self) -> Option<&Arc<Procedure>> {
        self.main.as_ref()
    }

    #[must_use]
    pub fn procedure(&self, name: &str) -> Option<Arc<Procedure>> {
        self.procedures.get(&name.normalized_name()).cloned()
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<Arc<Procedure>> {
        self.functions.get(&name.normalized_name()).cloned()
    }

    pub fn procedures(&self) -> impl Iterator<Item = &Arc<Procedure>> {
        self.procedures.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Arc<Procedure>> {
        self.functions.values()
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> Option<&Arc<Procedure>> {
        match id {
            ScopeId::Global => None,
            ScopeId::Procedure(index) => self.scopes.get(index),
        }
    }

    #[must_use]
    pub const fn globals(&self) -> &VariableTable {
        &self.globals
    }

    /// The explicit route to a global; procedures never fall back to it on
    /// their own.
    #[must_use]
    pub fn find_global(&self, name: &str) -> Option<&Variable> {
        self.globals.get(name)
    }

    #[must_use]
    pub fn types(&self) -> &dyn DataTypeProvider {
        self.types.as_ref()
    }

    pub fn output(&mut self) -> &mut dyn StandardOutput {
        self.output.as_mut()
    }

    #[must_use]
    pub const fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    /// Opens `path` under `handle`, or under a fresh handle when none is
    /// given.
    pub fn open_file(&mut self, line: LineNumber, path: &str, mode: OpenMode, handle: Option<FileHandle>) -> BasaltResult<FileHandle> {
        if self.open_files.is_none() {
            return Err(BasaltError::engine("files can only be opened while a unit is loaded"));
        }

        let handle = match handle {
            Some(0) => return Err(BasaltError::handle(line, 0, "is not a valid file number")),
            Some(handle) => {
                if !self.ids.claim(handle) {
                    return Err(BasaltError::handle(line, handle, "is already in use"));
                }
                handle
            }
            None => self.ids.next(),
        };

        let stream = match self.system.open_file(path, mode) {
            Ok(stream) => stream,
            Err(e) => {
                _ = self.ids.release(handle);
                return Err(BasaltError::handle(line, handle, format!("cannot open `{path}` for {}: {e}", mode.as_ref())));
            }
        };

        let file = OpenFile::new(line, path, mode, stream);
        let registered = match self.open_files.as_mut() {
            Some(open_files) => open_files.register(line, handle, file),
            None => Err(BasaltError::engine("the open-file table disappeared")),
        };

        if let Err(e) = registered {
            _ = self.ids.release(handle);
            return Err(e);
        }

        log::debug!("Opened `{path}` for {} as #{handle}", mode.as_ref());
        Ok(handle)
    }

    pub fn file_mut(&mut self, line: LineNumber, handle: FileHandle) -> BasaltResult<&mut OpenFile> {
        let Some(open_files) = self.open_files.as_mut() else {
            return Err(BasaltError::engine("no unit is loaded"));
        };

        open_files.lookup_mut(handle)
            .ok_or_else(|| BasaltError::handle(line, handle, "is not open"))
    }

    pub fn close_file(&mut self, line: LineNumber, handle: FileHandle) -> BasaltResult<()> {
        let Some(open_files) = self.open_files.as_mut() else {
            return Err(BasaltError::engine("no unit is loaded"));
        };

        open_files.close_file(line, handle, self.system.as_mut())?;
        self.ids.release(handle).map_err(|e| e.at_line(line))
    }

    /// Closes every open file, stopping at the first failure.
    pub fn close_all_files(&mut self, line: LineNumber) -> BasaltResult<()> {
        let handles: Vec<FileHandle> = match &self.open_files {
            Some(open_files) => open_files.handles().collect(),
            None => return Err(BasaltError::engine("no unit is loaded")),
        };

        for handle in handles {
            self.close_file(line, handle)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn open_file_count(&self) -> usize {
        self.open_files.as_ref().map_or(0, OpenFileTable::len)
    }
}

impl Drop for ExecutionEnvironment {
    fn drop(&mut self) {
        if self.state != EnvironmentState::Unloaded {
            self.unload_unit();
        }
    }
}
