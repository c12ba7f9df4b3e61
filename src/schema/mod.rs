// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Schema descriptions: state-plane attributes and spec validation.

pub mod attributes;
pub mod spec;

pub use attributes::{Attribute, AttributeMode, AttributeType, ResourceSchema, SchemaVariant};
pub use spec::{Field, FieldType, SpecSchema};
