// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use strum::IntoEnumIterator;

use crate::DataTypeProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(strum::AsRefStr, strum::EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum DataType {
    Integer,
    Long,
    #[default]
    Single,
    Double,
    String,
    Boolean,
    Unknown,
}

impl DataType {
    /// The name a declaration without an `AS` clause gets.
    pub const DEFAULT_NAME: &'static str = "SINGLE";

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Long | Self::Single | Self::Double | Self::Boolean)
    }

    #[must_use]
    pub const fn is_integral(&self) -> bool {
        matches!(self, Self::Integer | Self::Long | Self::Boolean)
    }

    #[must_use]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Maps the type names of the dialect, case-insensitively.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinDataTypes;

impl DataTypeProvider for BuiltinDataTypes {
    fn map_type(&self, type_name: &str) -> Option<DataType> {
        let type_name = type_name.trim();

        DataType::iter()
            .filter(DataType::is_known)
            .find(|typ| typ.as_ref().eq_ignore_ascii_case(type_name))
    }
}
