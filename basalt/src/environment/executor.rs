// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::sync::Arc;

use crate::{BasaltError, Statement};

use super::{ExecutionEnvironment, Procedure};

/// What the environment does after a statement ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementFlow {
    Continue,

    /// Leave the current procedure or function.
    Return,

    /// Stop the program.
    End,
}

/// Gives statements their meaning. The environment walks procedure bodies and
/// hands every statement to the executor together with the procedure it
/// belongs to.
pub trait StatementExecutor {
    type Error: From<BasaltError>;

    fn execute_statement(
        &mut self,
        statement: &Statement,
        procedure: &Arc<Procedure>,
        environment: &mut ExecutionEnvironment,
    ) -> Result<StatementFlow, Self::Error>;
}
