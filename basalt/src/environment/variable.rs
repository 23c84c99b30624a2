// Copyright (C) 2024 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::collections::HashMap;

use crate::{BasaltError, BasaltResult, DataType, Expression, LineNumber, StrExt};

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Normalized name.
    pub name: String,
    pub data_type: DataType,
    pub is_array: bool,
    pub array_size: Option<Vec<Expression>>,
    pub is_parameter: bool,
    pub line: LineNumber,
}

impl Variable {
    #[must_use]
    pub fn new(name: &str, data_type: DataType, line: LineNumber) -> Self {
        Self {
            name: name.normalized_name(),
            data_type,
            is_array: false,
            array_size: None,
            is_parameter: false,
            line,
        }
    }

    #[must_use]
    pub fn parameter(name: &str, data_type: DataType, line: LineNumber) -> Self {
        Self {
            is_parameter: true,
            ..Self::new(name, data_type, line)
        }
    }
}

/// The variables of one scope, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct VariableTable {
    variables: Vec<Variable>,
    by_name: HashMap<String, usize>,
}

impl VariableTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, variable: Variable) -> BasaltResult<()> {
        if !variable.data_type.is_known() {
            return Err(BasaltError::BadDataType {
                line: variable.line,
                type_name: variable.data_type.to_string(),
            });
        }

        let key = variable.name.normalized_name();
        if self.by_name.contains_key(&key) {
            return Err(BasaltError::DuplicateDefinition {
                line: variable.line,
                name: variable.name,
            });
        }

        self.by_name.insert(key, self.variables.len());
        self.variables.push(variable);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        let index = *self.by_name.get(&name.normalized_name())?;
        self.variables.get(index)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.normalized_name())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn clear(&mut self) {
        self.variables.clear();
        self.by_name.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_case_insensitive() {
        let mut table = VariableTable::new();
        table.declare(Variable::new("count", DataType::Integer, LineNumber::new(1))).unwrap();

        let error = table.declare(Variable::new("COUNT", DataType::String, LineNumber::new(2))).unwrap_err();
        assert_eq!(error, BasaltError::DuplicateDefinition {
            line: LineNumber::new(2),
            name: "COUNT".to_string(),
        });

        assert_eq!(table.get("Count").map(|x| x.data_type), Some(DataType::Integer));
    }

    #[test]
    fn unknown_type_is_a_bad_data_type() {
        let mut table = VariableTable::new();
        let error = table.declare(Variable::new("x", DataType::Unknown, LineNumber::new(4))).unwrap_err();

        assert!(matches!(error, BasaltError::BadDataType { .. }));
        assert!(table.is_empty());
    }

    #[test]
    fn iteration_keeps_declaration_order() {
        let mut table = VariableTable::new();
        for name in ["c", "a", "b"] {
            table.declare(Variable::new(name, DataType::Single, LineNumber::new(1))).unwrap();
        }

        let names: Vec<&str> = table.iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }
}
