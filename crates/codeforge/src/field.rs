// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Field definitions for signatures

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Type of field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Input field
    Input,
    /// Output field
    Output,
}

/// A field in a signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field<'a> {
    /// Field name (snake_case, as it appears in the signature string)
    #[serde(borrow)]
    pub name: Cow<'a, str>,

    /// Field description
    #[serde(borrow)]
    pub desc: Cow<'a, str>,

    /// Display label used when rendering prompts and parsing completions
    #[serde(borrow)]
    pub prefix: Cow<'a, str>,

    /// Field type (input or output)
    pub field_type: FieldType,
}

impl<'a> Field<'a> {
    /// Create a new field
    pub fn new(
        name: impl Into<Cow<'a, str>>,
        desc: impl Into<Cow<'a, str>>,
        field_type: FieldType,
    ) -> Self {
        let name = name.into();
        let prefix = Self::infer_prefix(&name);

        Self {
            name,
            desc: desc.into(),
            prefix: Cow::Owned(prefix),
            field_type,
        }
    }

    /// Set the prefix
    pub fn with_prefix(mut self, prefix: impl Into<Cow<'a, str>>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Convert to owned version
    pub fn into_owned(self) -> Field<'static> {
        Field {
            name: Cow::Owned(self.name.into_owned()),
            desc: Cow::Owned(self.desc.into_owned()),
            prefix: Cow::Owned(self.prefix.into_owned()),
            field_type: self.field_type,
        }
    }

    /// Infer display label from field name (test_cases -> Test Cases,
    /// optimizedCode -> Optimized Code)
    fn infer_prefix(name: &str) -> String {
        let mut result = String::with_capacity(name.len() + 5);
        let mut at_word_start = true;
        let mut prev_lower = false;

        for ch in name.chars() {
            if ch == '_' {
                result.push(' ');
                at_word_start = true;
                prev_lower = false;
                continue;
            }

            if ch.is_uppercase() && prev_lower {
                result.push(' ');
                at_word_start = true;
            }

            if at_word_start {
                result.push(ch.to_ascii_uppercase());
                at_word_start = false;
            } else {
                result.push(ch);
            }

            prev_lower = ch.is_lowercase();
        }

        result
    }
}

/// Helper to create an input field
pub struct InputField;

impl InputField {
    /// Create an input field.
    pub fn create<'a>(name: impl Into<Cow<'a, str>>, desc: impl Into<Cow<'a, str>>) -> Field<'a> {
        Field::new(name, desc, FieldType::Input)
    }
}

/// Helper to create an output field
pub struct OutputField;

impl OutputField {
    /// Create an output field.
    pub fn create<'a>(name: impl Into<Cow<'a, str>>, desc: impl Into<Cow<'a, str>>) -> Field<'a> {
        Field::new(name, desc, FieldType::Output)
    }
}
