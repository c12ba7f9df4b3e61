// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::error::{AdapterError, Result};
use std::fmt;

/// Name and optional namespace of a cluster object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceIdentity {
    pub name: String,
    pub namespace: Option<String>,
}

impl ResourceIdentity {
    pub fn cluster(name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: None,
        }
    }

    pub fn namespaced(namespace: &str, name: &str) -> Self {
        Self {
            name: name.to_string(),
            namespace: Some(namespace.to_string()),
        }
    }

    /// Parse `name` (cluster-scoped) or `namespace/name` (namespaced)
    pub fn parse(id: &str, namespaced: bool) -> Result<Self> {
        let invalid = |reason: &str| AdapterError::InvalidIdentity {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        if namespaced {
            let Some((namespace, name)) = id.split_once('/') else {
                return Err(invalid("expected 'namespace/name'"));
            };
            if namespace.is_empty() || name.is_empty() || name.contains('/') {
                return Err(invalid("expected 'namespace/name'"));
            }
            Ok(Self::namespaced(namespace, name))
        } else {
            if id.is_empty() || id.contains('/') {
                return Err(invalid("expected 'name'"));
            }
            Ok(Self::cluster(id))
        }
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}", ns, self.name),
            None => f.write_str(&self.name),
        }
    }
}
