//! Merged values handed to the template engine

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Result;

/// Values container. Merging user overrides into chart defaults happens
/// before values reach this crate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values(pub JsonValue);

impl Values {
    /// Create empty values
    pub fn new() -> Self {
        Self(JsonValue::Object(serde_json::Map::new()))
    }

    /// Parse values from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let value: JsonValue = serde_yaml::from_str(yaml)?;
        Ok(Self(value))
    }

    /// Get the inner JSON value
    pub fn inner(&self) -> &JsonValue {
        &self.0
    }

    /// Check if values are empty
    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Object(map) => map.is_empty(),
            JsonValue::Null => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_from_yaml() {
        let values = Values::from_yaml("image:\n  tag: latest\n").unwrap();
        assert_eq!(values.inner()["image"]["tag"], "latest");
        assert!(!values.is_empty());
    }

    #[test]
    fn test_values_empty() {
        assert!(Values::new().is_empty());
        assert!(Values::from_yaml("{}").unwrap().is_empty());
    }
}
