// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

//! The collaborators the core talks to without implementing them: type
//! mapping, console output, the file system and the parser's status log.

use std::{fmt::Debug, io};

use serde::Deserialize;
use strum::AsRefStr;

use crate::DataType;

pub trait DataTypeProvider {
    /// Resolves a declared type name, `None` when the name is not a type.
    fn map_type(&self, type_name: &str) -> Option<DataType>;
}

/// Sink for `PRINT` output. The core never writes to a console itself.
pub trait StandardOutput {
    fn write(&mut self, text: &str);

    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    fn flush(&mut self) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, AsRefStr)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "UPPERCASE")]
pub enum OpenMode {
    Input,
    Output,
    Append,
}

/// An open file as seen by the core: an opaque stream the runtime created.
pub trait FileStream: Debug {
    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Reads the next line without its terminator, `None` at end of file.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    fn flush(&mut self) -> io::Result<()>;
}

pub trait SystemRuntime {
    fn open_file(&mut self, path: &str, mode: OpenMode) -> io::Result<Box<dyn FileStream>>;

    fn close_file(&mut self, stream: Box<dyn FileStream>) -> io::Result<()>;

    /// Called when the environment unloads its code.
    fn reset(&mut self);
}

/// Write-only, line oriented status output of the parsing stages.
pub trait ParserOutputLogger {
    fn log_line(&mut self, line: &str);
}

/// Forwards parser status lines to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOutputLogger;

impl ParserOutputLogger for LogOutputLogger {
    fn log_line(&mut self, line: &str) {
        log::info!("{line}");
    }
}

impl ParserOutputLogger for Vec<String> {
    fn log_line(&mut self, line: &str) {
        self.push(line.to_string());
    }
}
