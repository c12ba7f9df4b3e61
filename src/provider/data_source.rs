// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::adapter::TypedResourceAdapter;
use crate::error::{AdapterError, Result};
use crate::provider::state::DataSourceState;
use tracing::instrument;

/// Read-only lookup of an existing object
pub struct DataSourceHandler {
    adapter: TypedResourceAdapter,
}

impl DataSourceHandler {
    pub fn new(adapter: TypedResourceAdapter) -> Self {
        Self { adapter }
    }

    /// Fetch the object named by `config.metadata`; an absent object is an error
    #[instrument(skip(self, config), fields(kind = self.adapter.descriptor().kind))]
    pub async fn read(&self, config: &DataSourceState) -> Result<DataSourceState> {
        let descriptor = self.adapter.descriptor();
        let identity = descriptor.identity_of(&config.to_document())?;

        let stored = self
            .adapter
            .read(&identity)
            .await?
            .ok_or_else(|| AdapterError::NotFound {
                kind: descriptor.kind.to_string(),
                identity: identity.to_string(),
            })?;

        Ok(DataSourceState::from((identity.to_string(), stored)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;
    use crate::kinds::calico::{FELIX_CONFIGURATION, NETWORK_SET};
    use crate::kinds::Registry;
    use crate::kubernetes::ProviderContext;
    use crate::test_utils::MockService;
    use crate::types::{ResourceDescriptor, ResourceDocument};
    use serde_json::json;

    fn handler(mock: &MockService, descriptor: ResourceDescriptor) -> DataSourceHandler {
        let entry = Registry::calico().unwrap().by_kind(descriptor.kind, None).unwrap();
        let context = ProviderContext::new(mock.client(), ProviderConfig::default());
        DataSourceHandler::new(TypedResourceAdapter::new(entry, context))
    }

    fn config(name: &str) -> DataSourceState {
        DataSourceState {
            metadata: ResourceDocument::new(name).metadata,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_read_fills_computed_fields() {
        let mock = MockService::new().with_object(
            "/apis/crd.projectcalico.org/v1/felixconfigurations/default",
            json!({
                "apiVersion": "crd.projectcalico.org/v1",
                "kind": "FelixConfiguration",
                "metadata": {
                    "name": "default",
                    "labels": {"managed-by": "operator"}
                },
                "spec": {"bpfEnabled": true, "logSeverityScreen": "Info"}
            }),
            "operator",
        );

        let state = handler(&mock, FELIX_CONFIGURATION)
            .read(&config("default"))
            .await
            .unwrap();

        assert_eq!(state.id.as_deref(), Some("default"));
        assert_eq!(
            state.metadata.labels.unwrap().get("managed-by").map(String::as_str),
            Some("operator")
        );
        assert_eq!(state.spec.unwrap()["bpfEnabled"], true);
    }

    #[tokio::test]
    async fn test_read_missing_is_not_found() {
        let mock = MockService::new();

        let err = handler(&mock, FELIX_CONFIGURATION)
            .read(&config("default"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdapterError::NotFound { .. }));
        assert_eq!(err.to_string(), "FelixConfiguration default not found");
    }

    #[tokio::test]
    async fn test_read_namespaced_requires_namespace() {
        let mock = MockService::new();

        let err = handler(&mock, NETWORK_SET)
            .read(&config("blocked"))
            .await
            .unwrap_err();

        assert!(matches!(err, AdapterError::InvalidDocument(_)));
        assert!(mock.requests().is_empty());
    }
}
