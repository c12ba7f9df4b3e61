// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::adapter::render_manifest;
use crate::error::Result;
use crate::kinds::KindEntry;
use crate::provider::state::ManifestState;
use std::sync::Arc;

/// Manifest data source: renders YAML, never contacts the cluster
pub struct ManifestHandler {
    entry: Arc<KindEntry>,
}

impl ManifestHandler {
    pub fn new(entry: Arc<KindEntry>) -> Self {
        Self { entry }
    }

    pub fn read(&self, config: &ManifestState) -> Result<ManifestState> {
        let document = config.to_document();
        let identity = self.entry.descriptor.identity_of(&document)?;
        self.entry.spec.validate(document.spec.as_ref())?;

        Ok(ManifestState {
            id: Some(identity.to_string()),
            yaml: Some(render_manifest(&self.entry.descriptor, &document)?),
            ..config.clone()
        })
    }
}
