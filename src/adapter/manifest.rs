// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::Result;
use crate::types::{ResourceDescriptor, ResourceDocument};

/// Render a document as YAML with `apiVersion` and `kind` stamped from the
/// descriptor. No cluster access; the same document always yields the same bytes.
pub fn render_manifest(descriptor: &ResourceDescriptor, desired: &ResourceDocument) -> Result<String> {
    let mut document = desired.clone();
    descriptor.stamp(&mut document);
    Ok(serde_yaml::to_string(&document)?)
}
