// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Client creation and the shared provider context

use crate::adapter::OperationOptions;
use crate::config::ProviderConfig;
use crate::error::{AdapterError, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config as KConfig};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Everything an adapter needs from the provider, built once at configuration time
#[derive(Clone)]
pub struct ProviderContext {
    client: Option<Client>,
    config: Arc<ProviderConfig>,
}

impl ProviderContext {
    pub fn new(client: Client, config: ProviderConfig) -> Self {
        Self {
            client: Some(client),
            config: Arc::new(config),
        }
    }

    /// A context without a cluster connection; network operations fail with `Offline`
    pub fn offline(config: ProviderConfig) -> Self {
        Self {
            client: None,
            config: Arc::new(config),
        }
    }

    /// Connect according to the configuration, or stay offline when asked to
    pub async fn connect(config: ProviderConfig) -> Result<Self> {
        if config.offline {
            info!("Offline mode enabled, no cluster connection will be made");
            return Ok(Self::offline(config));
        }
        let client = create_client(&config).await?;
        Ok(Self::new(client, config))
    }

    pub fn client(&self) -> Result<&Client> {
        if self.config.offline {
            return Err(AdapterError::Offline);
        }
        self.client.as_ref().ok_or(AdapterError::Offline)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Provider defaults with optional per-resource overrides
    pub fn options(
        &self,
        field_manager: Option<&str>,
        force_conflicts: Option<bool>,
    ) -> OperationOptions {
        self.config
            .default_options()
            .with_overrides(field_manager, force_conflicts)
    }
}

/// Create a Kubernetes client from an explicit kubeconfig, a named context or the environment
#[instrument(skip(config), fields(kubeconfig = ?config.kubeconfig, context = ?config.context))]
pub async fn create_client(config: &ProviderConfig) -> Result<Client> {
    let options = KubeConfigOptions {
        context: config.context.clone(),
        ..Default::default()
    };

    let client_config = match &config.kubeconfig {
        Some(path) => {
            debug!("Reading kubeconfig from {}", path.display());
            let kubeconfig = Kubeconfig::read_from(path).map_err(|e| {
                AdapterError::Config(format!(
                    "Failed to read kubeconfig {}: {}",
                    path.display(),
                    e
                ))
            })?;
            KConfig::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(|e| AdapterError::Config(format!("Failed to create config: {}", e)))?
        }
        None if config.context.is_some() => KConfig::from_kubeconfig(&options)
            .await
            .map_err(|e| AdapterError::Config(format!("Failed to create config: {}", e)))?,
        None => KConfig::infer()
            .await
            .map_err(|e| AdapterError::Config(format!("Failed to infer config: {}", e)))?,
    };

    info!("Connecting to cluster at {}", client_config.cluster_url);
    Client::try_from(client_config)
        .map_err(|e| AdapterError::Config(format!("Failed to create client: {}", e)))
}
