//! Documents under validation

use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{Result, SpecError};

const CONSTANTS_KEY: &str = "constants";

/// A document plus its legacy constants table
#[derive(Debug, Clone)]
pub struct Document {
    root: Value,
    constants: Map<String, Value>,
}

impl Document {
    /// Wrap a parsed document. The constants table is read from the root's
    /// `constants` member when that member is an object.
    pub fn new(root: Value) -> Self {
        let constants = root
            .get(CONSTANTS_KEY)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self { root, constants }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SpecError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn constants(&self) -> &Map<String, Value> {
        &self.constants
    }

    /// A top-level member of the document
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }
}
