// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use strum::AsRefStr;
use thiserror::Error;

use crate::{FileHandle, LineNumber, SourcePosition};

pub type BasaltResult<T> = Result<T, BasaltError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, AsRefStr)]
pub enum BasaltError {
    #[error("Syntax error on line {}: {message}", position.line())]
    SyntaxError {
        position: SourcePosition,
        message: String,
    },

    #[error("`{name}` on line {line} is already defined in this scope")]
    DuplicateDefinition {
        line: LineNumber,
        name: String,
    },

    #[error("Unknown data type `{type_name}` on line {line}")]
    BadDataType {
        line: LineNumber,
        type_name: String,
    },

    #[error("Engine execution error: {message}")]
    EngineExecution {
        message: String,
    },

    #[error("There is no `MAIN` procedure to start execution from")]
    MissingEntryPoint,

    #[error("File handle #{handle}: {message}")]
    Handle {
        line: LineNumber,
        handle: FileHandle,
        message: String,
    },
}

impl BasaltError {
    #[must_use]
    pub fn syntax(position: impl Into<SourcePosition>, message: impl Into<String>) -> Self {
        Self::SyntaxError {
            position: position.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn engine(message: impl Into<String>) -> Self {
        Self::EngineExecution {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn handle(line: LineNumber, handle: FileHandle, message: impl Into<String>) -> Self {
        Self::Handle {
            line,
            handle,
            message: message.into(),
        }
    }

    /// The line the error originated from, if it is tied to one.
    #[must_use]
    pub fn line(&self) -> Option<LineNumber> {
        let line = match self {
            Self::SyntaxError { position, .. } => position.line(),
            Self::DuplicateDefinition { line, .. } => *line,
            Self::BadDataType { line, .. } => *line,
            Self::Handle { line, .. } => *line,
            Self::EngineExecution { .. } | Self::MissingEntryPoint => return None,
        };

        line.is_assigned().then_some(line)
    }

    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::SyntaxError { position, .. } => Some(position.column()),
            _ => None,
        }
    }

    /// Attaches `line` to errors that were raised without knowing it.
    #[must_use]
    pub fn at_line(mut self, new_line: LineNumber) -> Self {
        match &mut self {
            Self::DuplicateDefinition { line, .. }
                | Self::BadDataType { line, .. }
                | Self::Handle { line, .. } if !line.is_assigned() => *line = new_line,

            Self::SyntaxError { position, .. } if !position.line().is_assigned() => {
                *position = SourcePosition::new(new_line, position.column());
            }

            _ => (),
        }

        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}
