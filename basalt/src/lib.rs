// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod ast;
mod builtin;
mod config;
mod context;
mod declarations;
mod environment;
mod error;
mod lexer;
mod system;
mod util;

pub use self::{
    ast::*,
    builtin::{BuiltinDataTypes, DataType},
    config::{ConfigRoot, ConfigSectionHandles, ConfigSectionLog, ConfigSectionParser, ConfigSectionRuntime},
    context::ParsedSource,
    declarations::{resolve_references, DeclarationScanner, ReferenceRecord, ReferenceTable},
    environment::*,
    error::{BasaltError, BasaltResult},
    lexer::{ArithmeticOperator, Keyword, Lexer, Token, TokenKind, TokenizedLine},
    system::{DataTypeProvider, FileStream, LogOutputLogger, OpenMode, ParserOutputLogger, StandardOutput, SystemRuntime},
    util::{LineNumber, SourcePosition, StrExt},
};
