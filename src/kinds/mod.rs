// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Table-driven registration of supported kinds.

pub mod calico;

use crate::error::{AdapterError, Result};
use crate::schema::{ResourceSchema, SpecSchema};
use crate::types::ResourceDescriptor;
use std::collections::BTreeMap;
use std::sync::Arc;

/// One registered kind: its endpoint and the shape of its spec
#[derive(Debug, Clone)]
pub struct KindEntry {
    pub descriptor: ResourceDescriptor,
    pub spec: SpecSchema,
}

impl KindEntry {
    pub fn new(descriptor: ResourceDescriptor, spec: SpecSchema) -> Self {
        Self { descriptor, spec }
    }

    pub fn resource_schema(&self) -> ResourceSchema {
        ResourceSchema::resource(&self.descriptor, &self.spec)
    }

    pub fn data_source_schema(&self) -> ResourceSchema {
        ResourceSchema::data_source(&self.descriptor, &self.spec)
    }

    pub fn manifest_schema(&self) -> ResourceSchema {
        ResourceSchema::manifest(&self.descriptor, &self.spec)
    }
}

/// Which provider surface a type name resolved to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeVariant {
    /// Managed resource or data source, they share the type name
    Resource,
    Manifest,
}

/// Registered kinds, keyed by provider type name
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: BTreeMap<String, Arc<KindEntry>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every Calico kind known to this crate
    pub fn calico() -> Result<Self> {
        Self::from_entries(calico::kinds())
    }

    /// Register every entry, failing on the first duplicate type name
    pub fn from_entries(entries: impl IntoIterator<Item = KindEntry>) -> Result<Self> {
        let mut registry = Self::new();
        for entry in entries {
            registry.register(entry)?;
        }
        Ok(registry)
    }

    pub fn register(&mut self, entry: KindEntry) -> Result<()> {
        let type_name = entry.descriptor.type_name();
        if self.entries.contains_key(&type_name) {
            return Err(AdapterError::Config(format!(
                "kind {} registered twice as {}",
                entry.descriptor.kind, type_name
            )));
        }
        self.entries.insert(type_name, Arc::new(entry));
        Ok(())
    }

    /// Resolve a resource, data source or manifest type name
    pub fn resolve(&self, type_name: &str) -> Result<(Arc<KindEntry>, TypeVariant)> {
        if let Some(entry) = self.entries.get(type_name) {
            return Ok((entry.clone(), TypeVariant::Resource));
        }
        type_name
            .strip_suffix("_manifest")
            .and_then(|base| self.entries.get(base))
            .map(|entry| (entry.clone(), TypeVariant::Manifest))
            .ok_or_else(|| AdapterError::UnknownType(type_name.to_string()))
    }

    /// Find a kind by its `kind` and optional `apiVersion`
    pub fn by_kind(&self, kind: &str, api_version: Option<&str>) -> Option<Arc<KindEntry>> {
        self.entries
            .values()
            .find(|e| {
                e.descriptor.kind == kind
                    && api_version.map_or(true, |v| e.descriptor.api_version() == v)
            })
            .cloned()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<KindEntry>> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
