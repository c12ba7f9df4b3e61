// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Provider state plane: resources, data sources and manifest data sources
//! for every registered kind.

pub mod data_source;
pub mod manifest;
pub mod resource;
pub mod state;

pub use data_source::DataSourceHandler;
pub use manifest::ManifestHandler;
pub use resource::{ChangePlan, ResourceHandler};
pub use state::{DataSourceState, ManifestState, ResourceState};

use crate::adapter::TypedResourceAdapter;
use crate::constants::wait::POLL_INTERVAL;
use crate::error::{AdapterError, Result};
use crate::kinds::{KindEntry, Registry, TypeVariant};
use crate::kubernetes::ProviderContext;
use crate::schema::ResourceSchema;
use std::sync::Arc;
use std::time::Duration;

pub struct Provider {
    context: ProviderContext,
    registry: Arc<Registry>,
    poll_interval: Duration,
}

impl Provider {
    pub fn new(context: ProviderContext, registry: Registry) -> Self {
        Self {
            context,
            registry: Arc::new(registry),
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn context(&self) -> &ProviderContext {
        &self.context
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    fn entry(&self, type_name: &str, expected: TypeVariant) -> Result<Arc<KindEntry>> {
        match self.registry.resolve(type_name)? {
            (entry, variant) if variant == expected => Ok(entry),
            _ => Err(AdapterError::UnknownType(type_name.to_string())),
        }
    }

    fn adapter(&self, entry: Arc<KindEntry>) -> TypedResourceAdapter {
        TypedResourceAdapter::new(entry, self.context.clone()).with_poll_interval(self.poll_interval)
    }

    pub fn resource(&self, type_name: &str) -> Result<ResourceHandler> {
        let entry = self.entry(type_name, TypeVariant::Resource)?;
        Ok(ResourceHandler::new(self.adapter(entry)))
    }

    pub fn data_source(&self, type_name: &str) -> Result<DataSourceHandler> {
        let entry = self.entry(type_name, TypeVariant::Resource)?;
        Ok(DataSourceHandler::new(self.adapter(entry)))
    }

    pub fn manifest(&self, type_name: &str) -> Result<ManifestHandler> {
        let entry = self.entry(type_name, TypeVariant::Manifest)?;
        Ok(ManifestHandler::new(entry))
    }

    /// Schemas published under `type_name`: resource and data source, or the manifest
    pub fn schema(&self, type_name: &str) -> Result<Vec<ResourceSchema>> {
        let (entry, variant) = self.registry.resolve(type_name)?;
        Ok(match variant {
            TypeVariant::Resource => vec![entry.resource_schema(), entry.data_source_schema()],
            TypeVariant::Manifest => vec![entry.manifest_schema()],
        })
    }

    /// Every schema of every registered kind
    pub fn schemas(&self) -> Vec<ResourceSchema> {
        self.registry
            .iter()
            .flat_map(|entry| {
                [
                    entry.resource_schema(),
                    entry.data_source_schema(),
                    entry.manifest_schema(),
                ]
            })
            .collect()
    }
}
