// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Field tree describing the `spec` of a kind and client-side validation against it.

use crate::error::{AdapterError, Result};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Object(Vec<Field>),
    Array(Box<FieldType>),
    Map(Box<FieldType>),
    /// Arbitrary value, preserved as-is
    Any,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub ty: FieldType,
    pub required: bool,
    pub description: &'static str,
}

impl Field {
    pub fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            description: "",
        }
    }

    pub fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            description: "",
        }
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

impl FieldType {
    pub fn array_of(item: FieldType) -> Self {
        FieldType::Array(Box::new(item))
    }

    pub fn map_of(value: FieldType) -> Self {
        FieldType::Map(Box::new(value))
    }

    fn name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Object(_) | FieldType::Map(_) => "object",
            FieldType::Array(_) => "array",
            FieldType::Any => "any",
        }
    }
}

/// Schema of the `spec` block of one kind
#[derive(Debug, Clone, PartialEq)]
pub struct SpecSchema {
    pub root: FieldType,
    pub required: bool,
}

impl SpecSchema {
    /// A spec with no declared structure
    pub fn any() -> Self {
        Self {
            root: FieldType::Any,
            required: false,
        }
    }

    /// A spec with declared fields; it is required as soon as one field is
    pub fn object(fields: Vec<Field>) -> Self {
        let required = fields.iter().any(|f| f.required);
        Self {
            root: FieldType::Object(fields),
            required,
        }
    }

    pub fn validate(&self, spec: Option<&Value>) -> Result<()> {
        match spec {
            None | Some(Value::Null) if self.required => {
                Err(AdapterError::Validation("spec: required block missing".to_string()))
            }
            None | Some(Value::Null) => Ok(()),
            Some(value) => check(&self.root, value, "spec").map_err(AdapterError::Validation),
        }
    }
}

fn check(ty: &FieldType, value: &Value, path: &str) -> std::result::Result<(), String> {
    let mismatch = || format!("{}: expected {}", path, ty.name());

    match ty {
        FieldType::Any => Ok(()),
        FieldType::String if value.is_string() => Ok(()),
        FieldType::Integer if value.is_i64() || value.is_u64() => Ok(()),
        FieldType::Number if value.is_number() => Ok(()),
        FieldType::Boolean if value.is_boolean() => Ok(()),
        FieldType::Array(item) => {
            let items = value.as_array().ok_or_else(mismatch)?;
            for (i, v) in items.iter().enumerate() {
                check(item, v, &format!("{}[{}]", path, i))?;
            }
            Ok(())
        }
        FieldType::Map(item) => {
            let entries = value.as_object().ok_or_else(mismatch)?;
            for (k, v) in entries {
                check(item, v, &format!("{}.{}", path, k))?;
            }
            Ok(())
        }
        FieldType::Object(fields) => {
            let entries = value.as_object().ok_or_else(mismatch)?;
            if let Some(unknown) = entries
                .keys()
                .find(|k| !fields.iter().any(|f| f.name == k.as_str()))
            {
                return Err(format!("{}.{}: unknown field", path, unknown));
            }
            for field in fields {
                let child = format!("{}.{}", path, field.name);
                match entries.get(field.name) {
                    None | Some(Value::Null) if field.required => {
                        return Err(format!("{}: required field missing", child));
                    }
                    None | Some(Value::Null) => {}
                    Some(v) => check(&field.ty, v, &child)?,
                }
            }
            Ok(())
        }
        _ => Err(mismatch()),
    }
}
