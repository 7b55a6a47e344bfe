//! The environment-variable record and its ingestion checks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One shell variable definition.
///
/// Fields other than `name`, `value` and `sort_group` found in JSON input are
/// kept in `extra` and written back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_group: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("variable name is empty")]
    EmptyName,
    #[error("invalid variable name: {0:?}")]
    InvalidName(String),
    #[error("sort_group must be at least 1 for {0}")]
    ZeroSortGroup(String),
    #[error("duplicate variable: {0}")]
    Duplicate(String),
}

impl EnvironmentVariable {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            sort_group: None,
            extra: Map::new(),
        }
    }

    pub fn with_sort_group(mut self, sort_group: u32) -> Self {
        self.sort_group = Some(sort_group);
        self
    }

    /// Check a single record: name must be `[_a-zA-Z0-9]+`, group at least 1.
    pub fn validate(&self) -> Result<(), RecordError> {
        if self.name.is_empty() {
            return Err(RecordError::EmptyName);
        }
        if !self
            .name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(RecordError::InvalidName(self.name.clone()));
        }
        if self.sort_group == Some(0) {
            return Err(RecordError::ZeroSortGroup(self.name.clone()));
        }
        Ok(())
    }
}

/// Validate every record and reject repeated names.
pub fn validate_batch(vars: &[EnvironmentVariable]) -> Result<(), RecordError> {
    let mut seen = HashSet::new();
    for ev in vars {
        ev.validate()?;
        if !seen.insert(ev.name.as_str()) {
            return Err(RecordError::Duplicate(ev.name.clone()));
        }
    }
    Ok(())
}
