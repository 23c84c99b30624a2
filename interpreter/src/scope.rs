// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::HashMap, sync::Arc};

use basalt::{Procedure, StrExt};

use crate::Value;

/// The values of one running procedure or function. Scopes are flat: a body
/// sees its own locals and, through the environment, the globals.
#[derive(Debug)]
pub struct Scope {
    procedure: Arc<Procedure>,
    variables: HashMap<String, Value>,
    return_value: Option<Value>,
}

impl Scope {
    pub fn new(procedure: Arc<Procedure>) -> Self {
        Self {
            procedure,
            variables: HashMap::new(),
            return_value: None,
        }
    }

    pub fn procedure(&self) -> &Arc<Procedure> {
        &self.procedure
    }

    pub fn find(&self, name: &str) -> Option<&Value> {
        self.variables.get(&name.normalized_name())
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.variables.get_mut(&name.normalized_name())
    }

    pub fn insert(&mut self, name: &str, value: Value) {
        self.variables.insert(name.normalized_name(), value);
    }

    pub fn set_return_value(&mut self, value: Value) {
        self.return_value = Some(value);
    }

    pub fn take_return_value(&mut self) -> Option<Value> {
        self.return_value.take()
    }
}
