// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Lifecycle of a managed resource on top of the typed adapter.

use crate::adapter::{OperationOptions, TypedResourceAdapter};
use crate::error::{AdapterError, Result};
use crate::provider::state::ResourceState;
use crate::types::{ResourceDescriptor, ResourceIdentity};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Outcome of comparing prior state with a desired configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangePlan {
    Create,
    NoOp,
    Update,
    /// Name or namespace changed: delete `from`, then create `to`
    Replace {
        from: ResourceIdentity,
        to: ResourceIdentity,
    },
}

pub struct ResourceHandler {
    adapter: TypedResourceAdapter,
}

impl ResourceHandler {
    pub fn new(adapter: TypedResourceAdapter) -> Self {
        Self { adapter }
    }

    pub fn descriptor(&self) -> &ResourceDescriptor {
        self.adapter.descriptor()
    }

    fn options(&self, state: &ResourceState) -> OperationOptions {
        self.adapter
            .context()
            .options(state.field_manager.as_deref(), state.force_conflicts)
            .with_wait_for(state.wait_for.clone())
    }

    fn identity(&self, state: &ResourceState) -> Result<ResourceIdentity> {
        match state.id.as_deref() {
            Some(id) => self.descriptor().parse_import_id(id),
            None => self.descriptor().identity_of(&state.to_document()),
        }
    }

    /// Apply the planned state and wait for its conditions
    #[instrument(skip(self, plan, cancel), fields(kind = self.descriptor().kind))]
    pub async fn create(
        &self,
        plan: &ResourceState,
        cancel: &CancellationToken,
    ) -> Result<ResourceState> {
        let identity = self.descriptor().identity_of(&plan.to_document())?;
        let options = self.options(plan);

        let stored = self.adapter.create(&plan.to_document(), &options).await?;
        self.adapter.wait(&identity, &options, cancel).await?;

        info!("Created {} {}", self.descriptor().kind, identity);
        Ok(plan.clone().with_stored(stored, identity.to_string()))
    }

    /// Refresh state from the cluster; `None` when the object was removed externally
    #[instrument(skip(self, state), fields(kind = self.descriptor().kind))]
    pub async fn read(&self, state: &ResourceState) -> Result<Option<ResourceState>> {
        let identity = self.identity(state)?;
        match self.adapter.read(&identity).await? {
            Some(stored) => Ok(Some(state.clone().with_stored(stored, identity.to_string()))),
            None => {
                warn!(
                    "{} {} no longer exists, dropping it from state",
                    self.descriptor().kind,
                    identity
                );
                Ok(None)
            }
        }
    }

    /// Apply a changed configuration to an existing object
    #[instrument(skip(self, prior, plan, cancel), fields(kind = self.descriptor().kind))]
    pub async fn update(
        &self,
        prior: &ResourceState,
        plan: &ResourceState,
        cancel: &CancellationToken,
    ) -> Result<ResourceState> {
        let from = self.identity(prior)?;
        let to = self.descriptor().identity_of(&plan.to_document())?;
        if from != to {
            return Err(AdapterError::IdentityChanged {
                from: from.to_string(),
                to: to.to_string(),
            });
        }

        let options = self.options(plan);
        let stored = self.adapter.update(&plan.to_document(), &options).await?;
        self.adapter.wait(&to, &options, cancel).await?;

        Ok(plan.clone().with_stored(stored, to.to_string()))
    }

    #[instrument(skip(self, state), fields(kind = self.descriptor().kind))]
    pub async fn delete(&self, state: &ResourceState) -> Result<()> {
        let identity = self.identity(state)?;
        self.adapter.delete(&identity).await
    }

    /// Adopt an existing object given `name` or `namespace/name`
    #[instrument(skip(self), fields(kind = self.descriptor().kind))]
    pub async fn import(&self, id: &str) -> Result<ResourceState> {
        let identity = self.descriptor().parse_import_id(id)?;
        let stored = self
            .adapter
            .read(&identity)
            .await?
            .ok_or_else(|| AdapterError::NotFound {
                kind: self.descriptor().kind.to_string(),
                identity: identity.to_string(),
            })?;

        info!("Imported {} {}", self.descriptor().kind, identity);
        Ok(ResourceState::default().with_stored(stored, identity.to_string()))
    }

    /// Decide how to move from `prior` state to the `desired` configuration
    pub fn plan(&self, prior: Option<&ResourceState>, desired: &ResourceState) -> Result<ChangePlan> {
        let to = self.descriptor().identity_of(&desired.to_document())?;
        let Some(prior) = prior else {
            return Ok(ChangePlan::Create);
        };

        let from = self.identity(prior)?;
        if from != to {
            debug!("Identity of {} changes from {} to {}", self.descriptor().kind, from, to);
            return Ok(ChangePlan::Replace { from, to });
        }

        let unchanged = prior.metadata.labels == desired.metadata.labels
            && prior.metadata.annotations == desired.metadata.annotations
            && prior.spec == desired.spec
            && prior.field_manager == desired.field_manager
            && prior.force_conflicts == desired.force_conflicts
            && prior.wait_for == desired.wait_for;

        Ok(if unchanged {
            ChangePlan::NoOp
        } else {
            ChangePlan::Update
        })
    }
}
