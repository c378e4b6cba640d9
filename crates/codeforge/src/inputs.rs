// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Structured inputs passed to modules

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;

/// Input/output field map
pub type FieldMap<'a> = HashMap<Cow<'a, str>, Cow<'a, str>>;

/// Represents structured input data for a module call
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inputs<'a> {
    #[serde(borrow)]
    fields: FieldMap<'a>,
}

impl<'a> Inputs<'a> {
    /// Create new inputs
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Insert a field
    pub fn insert(&mut self, key: impl Into<Cow<'a, str>>, value: impl Into<Cow<'a, str>>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Get a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|v| v.as_ref())
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether any fields are present
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Convert to owned version
    pub fn into_owned(self) -> Inputs<'static> {
        Inputs {
            fields: self
                .fields
                .into_iter()
                .map(|(k, v)| (Cow::Owned(k.into_owned()), Cow::Owned(v.into_owned())))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputs_insert_and_get() {
        let mut inputs = Inputs::new();
        inputs.insert("code", "def add(a, b): return a+b");
        inputs.insert("suggestions", "use type hints");

        assert_eq!(inputs.get("code"), Some("def add(a, b): return a+b"));
        assert_eq!(inputs.get("suggestions"), Some("use type hints"));
        assert_eq!(inputs.get("missing"), None);
        assert_eq!(inputs.len(), 2);
    }

    #[test]
    fn test_inputs_empty() {
        let inputs = Inputs::new();
        assert!(inputs.is_empty());
    }

    #[test]
    fn test_inputs_into_owned() {
        let code = String::from("print('hi')");
        let mut inputs = Inputs::new();
        inputs.insert("code", code.as_str());

        let owned = inputs.into_owned();
        assert_eq!(owned.get("code"), Some("print('hi')"));
    }
}
