// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! State models exchanged with the provider plane.
//!
//! Attribute names follow the attribute schemas in `schema::attributes`.

use crate::adapter::WaitCondition;
use crate::types::{DocumentMetadata, ResourceDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Config and state of a managed resource
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ResourceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub wait_for: Vec<WaitCondition>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
}

impl ResourceState {
    pub fn to_document(&self) -> ResourceDocument {
        ResourceDocument {
            metadata: self.metadata.clone(),
            spec: self.spec.clone(),
            ..Default::default()
        }
    }

    /// Replace the document part with what the server stored, keeping the settings
    pub fn with_stored(mut self, stored: ResourceDocument, id: String) -> Self {
        self.id = Some(id);
        self.metadata = stored.metadata;
        self.spec = stored.spec;
        self
    }
}

/// Config and state of a data source
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct DataSourceState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
}

impl DataSourceState {
    pub fn to_document(&self) -> ResourceDocument {
        ResourceDocument {
            metadata: self.metadata.clone(),
            ..Default::default()
        }
    }
}

impl From<(String, ResourceDocument)> for DataSourceState {
    fn from((id, document): (String, ResourceDocument)) -> Self {
        Self {
            id: Some(id),
            metadata: document.metadata,
            spec: document.spec,
        }
    }
}

/// Config and state of a manifest data source
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ManifestState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,
}

impl ManifestState {
    pub fn to_document(&self) -> ResourceDocument {
        ResourceDocument {
            metadata: self.metadata.clone(),
            spec: self.spec.clone(),
            ..Default::default()
        }
    }
}
