// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

use crate::adapter::OperationOptions;
use crate::constants::{env as keys, DEFAULT_FIELD_MANAGER};

/// Provider-wide configuration, set once and shared by every adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Field manager used for server-side apply unless a resource overrides it
    pub field_manager: String,
    /// Whether field ownership conflicts are overridden by default
    pub force_conflicts: bool,
    /// When set, every operation that needs the cluster fails immediately
    pub offline: bool,
    pub kubeconfig: Option<PathBuf>,
    pub context: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            force_conflicts: false,
            offline: false,
            kubeconfig: None,
            context: None,
        }
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let field_manager = lookup(keys::FIELD_MANAGER)
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_FIELD_MANAGER.to_string());
        let force_conflicts = parse_flag(lookup(keys::FORCE_CONFLICTS))
            .with_context(|| format!("{} must be 'true' or 'false'", keys::FORCE_CONFLICTS))?;
        let offline = parse_flag(lookup(keys::OFFLINE))
            .with_context(|| format!("{} must be 'true' or 'false'", keys::OFFLINE))?;

        Ok(ProviderConfig {
            field_manager,
            force_conflicts,
            offline,
            kubeconfig: lookup(keys::KUBECONFIG)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            context: lookup(keys::CONTEXT).filter(|v| !v.is_empty()),
        })
    }

    /// Operation options carrying the provider defaults
    pub fn default_options(&self) -> OperationOptions {
        OperationOptions {
            field_manager: self.field_manager.clone(),
            force_conflicts: self.force_conflicts,
            wait_for: Vec::new(),
        }
    }
}

/// Unset or empty is false; otherwise `true`/`false`/`1`/`0`, case-insensitive
fn parse_flag(value: Option<String>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "false" | "0" => Ok(false),
        "true" | "1" => Ok(true),
        other => bail!("unrecognized boolean '{}'", other),
    }
}
