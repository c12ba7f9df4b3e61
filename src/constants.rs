// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// Field manager used for server-side apply when none is configured
pub const DEFAULT_FIELD_MANAGER: &str = "crd-adapter";

/// Environment variables read by the provider configuration
pub mod env {
    pub const FIELD_MANAGER: &str = "CRD_ADAPTER_FIELD_MANAGER";
    pub const FORCE_CONFLICTS: &str = "CRD_ADAPTER_FORCE_CONFLICTS";
    pub const OFFLINE: &str = "CRD_ADAPTER_OFFLINE";
    pub const CONTEXT: &str = "CRD_ADAPTER_CONTEXT";
    pub const KUBECONFIG: &str = "CRD_ADAPTER_KUBECONFIG";
}

/// Wait-for-condition polling configuration
pub mod wait {
    use std::time::Duration;

    /// Interval between two evaluations of a wait condition
    pub const POLL_INTERVAL: Duration = Duration::from_secs(2);
    /// Upper bound applied when a negative timeout is configured
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(7 * 24 * 60 * 60);
}
