// Copyright © 2025 lituus-io <spicyzhug@gmail.com>
// All Rights Reserved.
// Licensed under PolyForm Noncommercial 1.0.0

//! Signature system for defining input/output contracts

use crate::error::{Error, Result};
use crate::field::{Field, FieldType};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A signature defining the input/output contract of a module
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signature<'a> {
    /// Instruction/prompt for the task
    #[serde(borrow)]
    pub instructions: Cow<'a, str>,

    /// Input fields
    #[serde(borrow)]
    pub input_fields: Vec<Field<'a>>,

    /// Output fields
    #[serde(borrow)]
    pub output_fields: Vec<Field<'a>>,
}

impl<'a> Signature<'a> {
    /// Create a new signature
    pub fn new(instructions: impl Into<Cow<'a, str>>) -> Self {
        Self {
            instructions: instructions.into(),
            input_fields: Vec::new(),
            output_fields: Vec::new(),
        }
    }

    /// Add an input field
    pub fn add_input(mut self, field: Field<'a>) -> Result<Self> {
        if field.field_type != FieldType::Input {
            return Err(Error::signature("Field must be an input field"));
        }
        self.input_fields.push(field);
        Ok(self)
    }

    /// Add an output field
    pub fn add_output(mut self, field: Field<'a>) -> Result<Self> {
        if field.field_type != FieldType::Output {
            return Err(Error::signature("Field must be an output field"));
        }
        self.output_fields.push(field);
        Ok(self)
    }

    /// Get all fields (inputs then outputs)
    pub fn all_fields(&self) -> impl Iterator<Item = &Field<'a>> {
        self.input_fields.iter().chain(self.output_fields.iter())
    }

    /// Convert to owned version
    pub fn into_owned(self) -> Signature<'static> {
        Signature {
            instructions: Cow::Owned(self.instructions.into_owned()),
            input_fields: self
                .input_fields
                .into_iter()
                .map(|f| f.into_owned())
                .collect(),
            output_fields: self
                .output_fields
                .into_iter()
                .map(|f| f.into_owned())
                .collect(),
        }
    }

    /// Parse a signature from string format: "input1, input2 -> output1, output2".
    ///
    /// Instructions are synthesized from the field names; use
    /// [`SignatureBuilder`] when custom instructions are needed.
    pub fn parse(s: &'a str) -> Result<Self> {
        let parts: Vec<&str> = s.split("->").map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err(Error::signature(
                "Signature must be in format 'inputs -> outputs'",
            ));
        }

        let mut sig = Self::new("");

        for input in parts[0]
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            let field = Field::new(input, format!("Input: {}", input), FieldType::Input);
            sig.input_fields.push(field);
        }

        for output in parts[1]
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            let field = Field::new(output, format!("Output: {}", output), FieldType::Output);
            sig.output_fields.push(field);
        }

        if sig.input_fields.is_empty() || sig.output_fields.is_empty() {
            return Err(Error::signature(
                "Signature needs at least one input and one output field",
            ));
        }

        sig.instructions = Cow::Owned(Self::default_instructions(
            &sig.input_fields,
            &sig.output_fields,
        ));
        Ok(sig)
    }

    /// Convert signature to string format
    pub fn to_string_format(&self) -> String {
        let inputs: Vec<&str> = self.input_fields.iter().map(|f| f.name.as_ref()).collect();
        let outputs: Vec<&str> = self.output_fields.iter().map(|f| f.name.as_ref()).collect();
        format!("{} -> {}", inputs.join(", "), outputs.join(", "))
    }

    /// Synthesize task instructions from the field names.
    fn default_instructions(inputs: &[Field<'_>], outputs: &[Field<'_>]) -> String {
        let ins: Vec<String> = inputs.iter().map(|f| format!("`{}`", f.name)).collect();
        let outs: Vec<String> = outputs.iter().map(|f| format!("`{}`", f.name)).collect();
        format!(
            "Given the fields {}, produce the fields {}.",
            ins.join(", "),
            outs.join(", ")
        )
    }
}

/// Builder for creating signatures
pub struct SignatureBuilder<'a> {
    signature: Signature<'a>,
}

impl<'a> SignatureBuilder<'a> {
    /// Create a new builder
    pub fn new(instructions: impl Into<Cow<'a, str>>) -> Self {
        Self {
            signature: Signature::new(instructions),
        }
    }

    /// Add an input field by name and description.
    pub fn input(mut self, name: impl Into<Cow<'a, str>>, desc: impl Into<Cow<'a, str>>) -> Self {
        self.signature
            .input_fields
            .push(Field::new(name, desc, FieldType::Input));
        self
    }

    /// Add an output field by name and description.
    pub fn output(mut self, name: impl Into<Cow<'a, str>>, desc: impl Into<Cow<'a, str>>) -> Self {
        self.signature
            .output_fields
            .push(Field::new(name, desc, FieldType::Output));
        self
    }

    /// Build the signature
    pub fn build(self) -> Signature<'a> {
        self.signature
    }
}
