// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod config;
mod error;
mod evaluator;
mod interpreter;
mod runner;
mod scope;
mod system;
mod value;

pub use self::{
    config::{load_config, parse_config, CONFIG_FILE_NAME},
    error::{ErrorPrinter, RuntimeError, RuntimeErrorKind, RuntimeResult},
    interpreter::Interpreter,
    runner::{load_source, run_source},
    scope::Scope,
    system::{ConsoleOutput, StdFileStream, StdSystem},
    value::Value,
};
