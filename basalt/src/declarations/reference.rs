// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::HashMap;

use crate::{BasaltError, BasaltResult, LineNumber, StrExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceRecord {
    /// The name as written at the declaration.
    pub name: String,

    /// Key inside the owning map of the [`ReferenceTable`].
    pub key: String,
    pub line: LineNumber,

    /// Index of the declaring line in the tokenized source.
    pub line_index: usize,

    /// Normalized name of the enclosing procedure or function, `None` for
    /// global declarations.
    pub scope: Option<String>,
}

impl ReferenceRecord {
    #[must_use]
    pub fn new(name: &str, line: LineNumber, line_index: usize, scope: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            key: name.normalized_name(),
            line,
            line_index,
            scope,
        }
    }

    #[must_use]
    pub fn normalized_name(&self) -> String {
        self.name.normalized_name()
    }
}

/// Every user-declared name of a source unit, filled by the declaration pass.
#[derive(Debug, Default, Clone)]
pub struct ReferenceTable {
    procedures: HashMap<String, ReferenceRecord>,
    functions: HashMap<String, ReferenceRecord>,

    /// Keyed by `<line>:<NAME>`, the same name can live in several scopes.
    variables: HashMap<String, ReferenceRecord>,
    variables_by_scope: HashMap<(Option<String>, String), String>,
}

impl ReferenceTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn procedure(&self, name: &str) -> Option<&ReferenceRecord> {
        self.procedures.get(&name.normalized_name())
    }

    #[must_use]
    pub fn function(&self, name: &str) -> Option<&ReferenceRecord> {
        self.functions.get(&name.normalized_name())
    }

    #[must_use]
    pub fn variable(&self, key: &str) -> Option<&ReferenceRecord> {
        self.variables.get(key)
    }

    /// Looks a variable up in exactly one scope, without falling back.
    #[must_use]
    pub fn find_variable(&self, scope: Option<&str>, name: &str) -> Option<&ReferenceRecord> {
        let index_key = (scope.map(str::to_string), name.normalized_name());
        let key = self.variables_by_scope.get(&index_key)?;
        self.variables.get(key)
    }

    pub fn procedures(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.procedures.values()
    }

    pub fn functions(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.functions.values()
    }

    pub fn variables(&self) -> impl Iterator<Item = &ReferenceRecord> {
        self.variables.values()
    }

    pub(crate) fn insert_procedure(&mut self, record: ReferenceRecord) -> BasaltResult<()> {
        self.ensure_unique_routine(&record)?;
        self.procedures.insert(record.key.clone(), record);
        Ok(())
    }

    pub(crate) fn insert_function(&mut self, record: ReferenceRecord) -> BasaltResult<()> {
        self.ensure_unique_routine(&record)?;
        self.functions.insert(record.key.clone(), record);
        Ok(())
    }

    pub(crate) fn insert_variable(&mut self, mut record: ReferenceRecord) -> BasaltResult<()> {
        let name = record.normalized_name();
        let index_key = (record.scope.clone(), name.clone());

        if self.variables_by_scope.contains_key(&index_key) {
            return Err(BasaltError::DuplicateDefinition {
                line: record.line,
                name: record.name,
            });
        }

        record.key = format!("{}:{name}", record.line);
        self.variables_by_scope.insert(index_key, record.key.clone());
        self.variables.insert(record.key.clone(), record);
        Ok(())
    }

    fn ensure_unique_routine(&self, record: &ReferenceRecord) -> BasaltResult<()> {
        if self.procedures.contains_key(&record.key) || self.functions.contains_key(&record.key) {
            return Err(BasaltError::DuplicateDefinition {
                line: record.line,
                name: record.name.clone(),
            });
        }

        Ok(())
    }
}
