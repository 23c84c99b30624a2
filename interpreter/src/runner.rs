// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use basalt::{
    BuiltinDataTypes,
    ConfigRoot,
    ExecutionEnvironment,
    LogOutputLogger,
    ParsedSource,
    StandardOutput,
    SystemRuntime,
};

use crate::{Interpreter, RuntimeResult};

/// Parses `source` and loads it into a fresh environment.
pub fn load_source(
    source: &str,
    config: &ConfigRoot,
    system: Box<dyn SystemRuntime>,
    output: Box<dyn StandardOutput>,
) -> RuntimeResult<ExecutionEnvironment> {
    let parsed = ParsedSource::parse(source, config, &mut LogOutputLogger)?;

    let mut environment = ExecutionEnvironment::new(Box::new(BuiltinDataTypes), system, output)
        .with_release_policy(config.handles.release_unknown)
        .with_max_call_depth(config.runtime.max_call_depth);

    environment.load_unit(parsed.into_code_dom())?;
    Ok(environment)
}

/// Parses, loads and runs `source`, unloading afterwards even when the run
/// failed.
pub fn run_source(
    source: &str,
    config: &ConfigRoot,
    system: Box<dyn SystemRuntime>,
    output: Box<dyn StandardOutput>,
) -> RuntimeResult<()> {
    let mut environment = load_source(source, config, system, output)?;

    let result = Interpreter::new().run(&mut environment);
    environment.unload_unit();

    result
}
