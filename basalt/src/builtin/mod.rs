// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod types;

pub use self::types::{BuiltinDataTypes, DataType};
