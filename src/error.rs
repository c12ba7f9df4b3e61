// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Provider is offline: no connection to a Kubernetes cluster is configured")]
    Offline,

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to render manifest: {0}")]
    Render(#[from] serde_yaml::Error),

    #[error("Failed to deserialize {verb} response: {source}")]
    Deserialize {
        verb: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Kubernetes API error during {verb}: {source}")]
    Api {
        verb: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("{kind} {identity} not found")]
    NotFound { kind: String, identity: String },

    #[error("Timed out waiting for {path} on {identity}")]
    WaitTimeout { identity: String, path: String },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid import identifier '{id}': {reason}")]
    InvalidIdentity { id: String, reason: String },

    #[error("Identity changed from {from} to {to}, resource must be replaced")]
    IdentityChanged { from: String, to: String },

    #[error("Unknown resource type: {0}")]
    UnknownType(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl AdapterError {
    /// Wrap a kube error with the REST verb that produced it
    pub fn api(verb: &'static str, source: kube::Error) -> Self {
        AdapterError::Api { verb, source }
    }

    /// HTTP status code of the API server response, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AdapterError::Api {
                source: kube::Error::Api(response),
                ..
            } => Some(response.code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AdapterError>;
