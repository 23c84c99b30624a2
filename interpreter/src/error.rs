// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fmt::Display, io, path::Path};

use basalt::{ArithmeticOperator, BasaltError, DataType, FileHandle, LineNumber};
use colored::{Color, ColoredString, Colorize};
use strum::AsRefStr;
use thiserror::Error;

pub type RuntimeResult<T> = Result<T, RuntimeError>;

#[derive(Debug, Error)]
#[error("{kind}")]
pub struct RuntimeError {
    line: Option<LineNumber>,
    kind: RuntimeErrorKind,
}

impl RuntimeError {
    #[must_use]
    pub fn new(line: Option<LineNumber>, kind: RuntimeErrorKind) -> Self {
        Self { line, kind }
    }

    #[must_use]
    pub fn kind(&self) -> &RuntimeErrorKind {
        &self.kind
    }

    #[must_use]
    pub fn line(&self) -> Option<LineNumber> {
        self.line.or_else(|| match &self.kind {
            RuntimeErrorKind::Engine(error) => error.line(),
            _ => None,
        })
    }

    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match &self.kind {
            RuntimeErrorKind::Engine(error) => error.column(),
            _ => None,
        }
    }

    /// Attaches `line` unless a more precise line is already known.
    #[must_use]
    pub fn at_line(self, line: LineNumber) -> Self {
        Self {
            line: self.line().or(Some(line)),
            kind: self.kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            RuntimeErrorKind::Engine(error) => error.name(),
            kind => kind.as_ref(),
        }
    }
}

impl From<BasaltError> for RuntimeError {
    fn from(value: BasaltError) -> Self {
        Self {
            line: value.line(),
            kind: RuntimeErrorKind::Engine(value),
        }
    }
}

impl From<RuntimeErrorKind> for RuntimeError {
    fn from(kind: RuntimeErrorKind) -> Self {
        Self {
            line: None,
            kind,
        }
    }
}

#[derive(Debug, Error, AsRefStr)]
pub enum RuntimeErrorKind {
    #[error(transparent)]
    Engine(BasaltError),

    #[error("`{name}` is neither a variable of this procedure nor a global")]
    UndefinedVariable { name: String },

    #[error("`{name}` is not a declared function")]
    UndefinedFunction { name: String },

    #[error("`{name}` is not a declared procedure")]
    UndefinedProcedure { name: String },

    #[error("`{name}` takes {expected} argument(s), but {found} were given")]
    ArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Type mismatch: expected a {expected}, but found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("Division by zero")]
    DivisionByZero,

    #[error("The value does not fit in a {data_type}")]
    Overflow { data_type: DataType },

    #[error("Expected a value, but the expression is empty")]
    EmptyExpression,

    #[error("Expected a value after `{operator}`")]
    MissingOperand { operator: ArithmeticOperator },

    #[error("Expected an operator before `{found}`")]
    MissingOperator { found: String },

    #[error("Index {index} is out of range for `{name}`, which has {size} element(s)")]
    IndexOutOfRange {
        name: String,
        index: i64,
        size: usize,
    },

    #[error("`{name}` is not an array")]
    NotAnArray { name: String },

    #[error("`{name}` is an array, use `{name}(index)` to get one of its elements")]
    MissingIndex { name: String },

    #[error("{value} is not a valid file number")]
    InvalidHandle { value: i64 },

    #[error("Input past the end of file #{handle}")]
    EndOfFile { handle: FileHandle },

    #[error("`RETURN` cannot give back a value from procedure `{procedure}`")]
    UnexpectedReturnValue { procedure: String },

    #[error("I/O error on file #{handle}: {source}")]
    Io {
        handle: FileHandle,
        source: io::Error,
    },
}

impl From<BasaltError> for RuntimeErrorKind {
    fn from(value: BasaltError) -> Self {
        Self::Engine(value)
    }
}

/// Prints an error with the offending line and its neighbours, as they were
/// written in the source file.
pub struct ErrorPrinter {
    path: String,
    lines: Vec<String>,

    /// One-based line in the source file.
    line: Option<usize>,
    /// Zero-based column in that line.
    column: Option<usize>,
    message: String,
    hint: Option<String>,

    color: Color,
    line_number: ColoredString,
}

impl ErrorPrinter {
    /// `line` counts the lines that hold code, as the engine numbers them.
    #[must_use = "Use the `print` method to actually print"]
    pub fn new(source: &str, path: &Path, line: Option<LineNumber>, message: impl Display) -> Self {
        let line = line.map(|line| physical_line(source, line).unwrap_or(line.get()));

        Self {
            path: path.display().to_string(),
            lines: source.lines().map(str::to_string).collect(),
            line,
            column: None,
            message: message.to_string(),
            hint: None,

            color: Color::Red,
            line_number: line.map(|line| line.to_string()).unwrap_or_default().blue().bold(),
        }
    }

    #[must_use = "Use the `print` method to actually print"]
    pub fn for_error(source: &str, path: &Path, error: &RuntimeError) -> Self {
        Self::new(source, path, error.line(), error)
            .column(error.column())
    }

    /// Takes a column of the whitespace-normalized line and points it at the
    /// same character of the line as written.
    #[must_use]
    pub fn column(self, column: Option<usize>) -> Self {
        let written = self.line
            .and_then(|line| line.checked_sub(1))
            .and_then(|index| self.lines.get(index));

        let column = match (column, written) {
            (Some(column), Some(written)) => Some(physical_column(written, column)),
            (column, _) => column,
        };

        Self {
            column,
            ..self
        }
    }

    #[must_use]
    pub fn hint(self, hint: impl Into<Option<String>>) -> Self {
        Self {
            hint: hint.into(),
            ..self
        }
    }

    pub fn print(self) {
        self.print_prelude();

        if let Some(line) = self.line {
            self.print_lines(line);
        }

        self.print_postlude();
    }

    fn print_prelude(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.message.bold());
        eprintln!();
    }

    fn print_lines(&self, line: usize) {
        let Some(index) = line.checked_sub(1) else {
            return;
        };

        if let Some(previous) = index.checked_sub(1).and_then(|previous| self.lines.get(previous)) {
            self.print_line(false, previous);
        }

        if let Some(current) = self.lines.get(index) {
            self.print_line(true, current);
            self.print_error_indicator();
        }

        if let Some(next) = self.lines.get(index + 1) {
            self.print_line(false, next);
        }
    }

    fn print_line(&self, is_primary: bool, line: &str) {
        self.print_line_prefix(is_primary);
        eprintln!("{line}");
    }

    fn print_error_indicator(&self) {
        let Some(column) = self.column else {
            if let Some(hint) = &self.hint {
                self.print_line_prefix(false);
                eprintln!("{}", format!("hint: {hint}").color(self.color).bold());
            }
            return;
        };

        let spaces = " ".repeat(column);
        let caret = "^".color(self.color).bold();

        let hint = match &self.hint {
            Some(hint) => format!("hint: {hint}").color(self.color).bold(),
            None => "".bold(),
        };

        self.print_line_prefix(false);
        eprintln!("{spaces}{caret} {hint}");
    }

    fn print_line_prefix(&self, is_primary: bool) {
        let separator = " | ".blue().bold();

        if is_primary {
            eprint!("{} {separator}", self.line_number);
        } else {
            eprint!("{} {separator}", " ".repeat(self.line_number.len()));
        }
    }

    fn print_postlude(&self) {
        eprintln!();

        match (self.line, self.column) {
            (Some(line), Some(column)) => eprintln!("In {}:{line}:{}\n", self.path, column + 1),
            (Some(line), None) => eprintln!("In {}:{line}\n", self.path),
            (None, _) => eprintln!("In {}\n", self.path),
        }
    }
}

/// The one-based line of `source` that the engine numbers `line`. Blank lines
/// are not numbered by the engine.
fn physical_line(source: &str, line: LineNumber) -> Option<usize> {
    let index = line.get().checked_sub(1)?;

    source.lines()
        .enumerate()
        .filter(|(_, text)| !text.trim().is_empty())
        .nth(index)
        .map(|(position, _)| position + 1)
}

/// Walks `written` the way whitespace normalization does, until the
/// normalized line reaches `column`.
fn physical_column(written: &str, column: usize) -> usize {
    let trimmed = written.trim();
    let leading = written.chars().take_while(|c| c.is_whitespace()).count();

    let mut normalized = 0;
    let mut in_string = false;
    let mut pending_space = false;

    for (index, c) in trimmed.chars().enumerate() {
        let position = leading + index;

        if in_string {
            in_string = c != '"';
        } else if c.is_whitespace() {
            pending_space = true;
            continue;
        } else {
            if pending_space {
                if normalized == column {
                    return position - 1;
                }

                normalized += 1;
                pending_space = false;
            }

            in_string = c == '"';
        }

        if normalized == column {
            return position;
        }

        normalized += 1;
    }

    leading + trimmed.chars().count() + column.saturating_sub(normalized)
}
