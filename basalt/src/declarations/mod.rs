// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod reference;
mod resolve;
mod scanner;

pub use self::{
    reference::{ReferenceRecord, ReferenceTable},
    resolve::resolve_references,
    scanner::DeclarationScanner,
};
