// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use serde::Deserialize;

use crate::{ReleasePolicy, UnknownTokenPolicy, MAX_CALL_DEPTH};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigRoot {
    pub log: ConfigSectionLog,
    pub parser: ConfigSectionParser,
    pub handles: ConfigSectionHandles,
    pub runtime: ConfigSectionRuntime,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionLog {
    pub debug: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionParser {
    /// What the expression parser does with tokens it cannot place.
    pub unknown_expression_tokens: UnknownTokenPolicy,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionHandles {
    pub release_unknown: ReleasePolicy,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigSectionRuntime {
    /// Nested calls beyond this fail instead of exhausting the stack.
    pub max_call_depth: usize,
}

impl Default for ConfigSectionRuntime {
    fn default() -> Self {
        Self {
            max_call_depth: MAX_CALL_DEPTH,
        }
    }
}
