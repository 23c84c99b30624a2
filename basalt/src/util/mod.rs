// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod line_number;
mod source_position;
mod str_ext;

pub use self::{
    line_number::LineNumber,
    source_position::SourcePosition,
    str_ext::StrExt,
};
