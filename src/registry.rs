//! In-memory parameter registry built from the service schema document.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{QueryError, Result};

/// Type tag used when the schema omits `type` (enumerated parameters)
pub const DEFAULT_DATA_TYPE: &str = "xs:string";

/// A single query parameter as declared by the schema document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub data_type: String,
    pub default: Option<String>,
    pub allowed_values: Option<Vec<String>>,
}

impl ParameterDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: DEFAULT_DATA_TYPE.to_string(),
            default: None,
            allowed_values: None,
        }
    }

    pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
        self.data_type = data_type.into();
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub(crate) fn push_allowed_value(&mut self, value: String) {
        self.allowed_values.get_or_insert_with(Vec::new).push(value);
    }

    pub fn is_enumerated(&self) -> bool {
        self.allowed_values.is_some()
    }
}

/// Parameter definitions keyed by name, with the names kept in parse order
#[derive(Debug, Clone, Default)]
pub struct ParameterRegistry {
    definitions: HashMap<String, ParameterDefinition>,
    names: Vec<String>,
}

impl ParameterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition. A repeated name replaces the earlier definition
    /// but keeps its original position.
    pub(crate) fn insert(&mut self, definition: ParameterDefinition) {
        if !self.definitions.contains_key(&definition.name) {
            self.names.push(definition.name.clone());
        }
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut ParameterDefinition> {
        self.definitions.get_mut(name)
    }

    /// All known parameter names, in parse order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up a parameter definition by name
    pub fn describe(&self, name: &str) -> Result<&ParameterDefinition> {
        self.definitions
            .get(name)
            .ok_or_else(|| QueryError::UnknownParameter {
                name: name.to_string(),
                valid: self.names.clone(),
            })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate definitions in parse order
    pub fn iter(&self) -> impl Iterator<Item = &ParameterDefinition> {
        self.names.iter().filter_map(|name| self.definitions.get(name))
    }
}
