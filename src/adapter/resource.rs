// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Generic adapter between a `ResourceDocument` and one CRD endpoint.

use crate::adapter::manifest::render_manifest;
use crate::adapter::options::OperationOptions;
use crate::adapter::wait::WaitPoller;
use crate::constants::wait::POLL_INTERVAL;
use crate::error::{AdapterError, Result};
use crate::kinds::KindEntry;
use crate::kubernetes::ProviderContext;
use crate::types::{ResourceDescriptor, ResourceDocument, ResourceIdentity};
use kube::api::{Api, DeleteParams, DynamicObject, Patch, PatchParams};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

pub struct TypedResourceAdapter {
    entry: Arc<KindEntry>,
    context: ProviderContext,
    poll_interval: Duration,
}

impl TypedResourceAdapter {
    pub fn new(entry: Arc<KindEntry>, context: ProviderContext) -> Self {
        Self {
            entry,
            context,
            poll_interval: POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        &self.entry.descriptor
    }

    pub fn context(&self) -> &ProviderContext {
        &self.context
    }

    fn api(&self, namespace: Option<&str>) -> Result<Api<DynamicObject>> {
        let client = self.context.client()?.clone();
        let resource = self.descriptor().api_resource();
        Ok(match namespace {
            Some(ns) if self.descriptor().namespaced => Api::namespaced_with(client, ns, &resource),
            _ => Api::all_with(client, &resource),
        })
    }

    /// Create the object with a server-side apply patch
    #[instrument(skip(self, desired, options), fields(kind = self.descriptor().kind, name = %desired.metadata.name))]
    pub async fn create(
        &self,
        desired: &ResourceDocument,
        options: &OperationOptions,
    ) -> Result<ResourceDocument> {
        info!("Creating {}", self.descriptor().kind);
        self.apply(desired, options).await
    }

    /// Update the object; the same apply patch as `create`
    #[instrument(skip(self, desired, options), fields(kind = self.descriptor().kind, name = %desired.metadata.name))]
    pub async fn update(
        &self,
        desired: &ResourceDocument,
        options: &OperationOptions,
    ) -> Result<ResourceDocument> {
        info!("Updating {}", self.descriptor().kind);
        self.apply(desired, options).await
    }

    async fn apply(
        &self,
        desired: &ResourceDocument,
        options: &OperationOptions,
    ) -> Result<ResourceDocument> {
        let identity = self.descriptor().identity_of(desired)?;
        self.entry.spec.validate(desired.spec.as_ref())?;

        let mut document = desired.clone();
        self.descriptor().stamp(&mut document);
        let body = serde_json::to_value(&document)?;

        let api = self.api(identity.namespace.as_deref())?;
        let mut params = PatchParams::apply(&options.field_manager).validation_strict();
        if options.force_conflicts {
            params = params.force();
        }

        debug!(
            "Applying {} as field manager {} (force={})",
            identity, options.field_manager, options.force_conflicts
        );
        let stored = api
            .patch(&identity.name, &params, &Patch::Apply(&body))
            .await
            .map_err(|e| AdapterError::api("PATCH", e))?;

        decode("PATCH", stored)
    }

    /// Fetch the object; `None` when it does not exist
    #[instrument(skip(self), fields(kind = self.descriptor().kind))]
    pub async fn read(&self, identity: &ResourceIdentity) -> Result<Option<ResourceDocument>> {
        match self.fetch(identity).await? {
            Some(object) => decode("GET", object).map(Some),
            None => {
                debug!("{} {} not found", self.descriptor().kind, identity);
                Ok(None)
            }
        }
    }

    async fn fetch(&self, identity: &ResourceIdentity) -> Result<Option<DynamicObject>> {
        self.api(identity.namespace.as_deref())?
            .get_opt(&identity.name)
            .await
            .map_err(|e| AdapterError::api("GET", e))
    }

    async fn fetch_value(&self, identity: &ResourceIdentity) -> Result<Option<Value>> {
        match self.fetch(identity).await? {
            Some(object) => Ok(Some(serde_json::to_value(&object)?)),
            None => Ok(None),
        }
    }

    /// Delete the object; an object that is already gone counts as deleted
    #[instrument(skip(self), fields(kind = self.descriptor().kind))]
    pub async fn delete(&self, identity: &ResourceIdentity) -> Result<()> {
        let api = self.api(identity.namespace.as_deref())?;
        match api.delete(&identity.name, &DeleteParams::default()).await {
            Ok(_) => {
                info!("Deleted {} {}", self.descriptor().kind, identity);
                Ok(())
            }
            Err(kube::Error::Api(response)) if response.code == 404 => {
                debug!("{} {} already absent", self.descriptor().kind, identity);
                Ok(())
            }
            Err(e) => Err(AdapterError::api("DELETE", e)),
        }
    }

    /// Poll the stored object until every wait condition in `options` holds
    #[instrument(skip(self, options, cancel), fields(kind = self.descriptor().kind))]
    pub async fn wait(
        &self,
        identity: &ResourceIdentity,
        options: &OperationOptions,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let label = identity.to_string();
        let poller = WaitPoller::new(&label, self.poll_interval, cancel);
        for condition in &options.wait_for {
            debug!(
                "Waiting for {} on {} (timeout {})",
                condition.json_path, identity, condition.timeout
            );
            poller
                .wait(condition, || self.fetch_value(identity))
                .await?;
        }
        Ok(())
    }

    pub fn render_manifest(&self, desired: &ResourceDocument) -> Result<String> {
        render_manifest(self.descriptor(), desired)
    }
}

fn decode(verb: &'static str, object: DynamicObject) -> Result<ResourceDocument> {
    serde_json::to_value(&object)
        .and_then(serde_json::from_value)
        .map_err(|source| AdapterError::Deserialize { verb, source })
}
