//! Placeholder values for a render

use serde::Serialize;
use std::collections::BTreeMap;

/// Placeholder key for the project name
pub const NAME_KEY: &str = "name";

/// Mapping from placeholder name to value, fixed for the whole render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context holding the project name exactly as the user typed it
    pub fn for_project(name: &str) -> Self {
        Self::new().with(NAME_KEY, name)
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}
