//! Converted unit records.

use std::collections::BTreeMap;

use serde::Serialize;

/// One converted unit: a type name in the target vocabulary plus a named
/// parameter mapping.
///
/// Parameters are kept in a `BTreeMap` so serialization order is
/// deterministic regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedUnit {
    /// Unit type name in the target vocabulary.
    #[serde(rename = "type")]
    pub kind: String,
    /// Named numeric parameters.
    pub parameters: BTreeMap<String, u32>,
}

impl ConvertedUnit {
    /// Create a unit with no parameters.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_parameter(mut self, name: &str, value: impl Into<u32>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }
}
