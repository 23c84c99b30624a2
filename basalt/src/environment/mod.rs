// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod environment;
mod executor;
mod id_generator;
mod open_file_table;
mod partition;
mod procedure;
mod scope;
mod variable;

pub use self::{
    environment::{EnvironmentState, ExecutionEnvironment, MAIN_PROCEDURE_NAME, MAX_CALL_DEPTH},
    executor::{StatementExecutor, StatementFlow},
    id_generator::{IdGenerator, ReleasePolicy},
    open_file_table::{FileHandle, OpenFile, OpenFileTable},
    procedure::{Procedure, ProcedureKind},
    scope::ScopeId,
    variable::{Variable, VariableTable},
};
