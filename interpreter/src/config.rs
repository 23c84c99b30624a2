// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::path::Path;

use anyhow::Context;
use basalt::ConfigRoot;

/// Looked up next to the program when no configuration is given explicitly.
pub const CONFIG_FILE_NAME: &str = "basalt.toml";

pub fn parse_config(text: &str) -> anyhow::Result<ConfigRoot> {
    Ok(toml::from_str(text)?)
}

pub fn load_config(program: &Path, explicit: Option<&Path>) -> anyhow::Result<ConfigRoot> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = program.with_file_name(CONFIG_FILE_NAME);
            if !path.is_file() {
                return Ok(ConfigRoot::default());
            }
            path
        }
    };

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("could not read {}", path.display()))?;

    parse_config(&text)
        .with_context(|| format!("invalid configuration in {}", path.display()))
}
