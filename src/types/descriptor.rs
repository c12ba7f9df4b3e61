// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Static description of a custom resource kind.

use crate::error::{AdapterError, Result};
use crate::types::document::ResourceDocument;
use crate::types::identity::ResourceIdentity;
use kube::api::ApiResource;
use kube::core::GroupVersionKind;

/// Prefix shared by every provider type name
const TYPE_PREFIX: &str = "k8s";
const MANIFEST_SUFFIX: &str = "_manifest";

/// Identifies one CRD endpoint: group, version, kind, plural and scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceDescriptor {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
    pub plural: &'static str,
    pub namespaced: bool,
}

impl ResourceDescriptor {
    pub const fn cluster(
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        plural: &'static str,
    ) -> Self {
        Self {
            group,
            version,
            kind,
            plural,
            namespaced: false,
        }
    }

    pub const fn namespaced(
        group: &'static str,
        version: &'static str,
        kind: &'static str,
        plural: &'static str,
    ) -> Self {
        Self {
            group,
            version,
            kind,
            plural,
            namespaced: true,
        }
    }

    /// The `apiVersion` stamped on documents of this kind
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.to_string()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    pub fn api_resource(&self) -> ApiResource {
        ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk(self.group, self.version, self.kind),
            self.plural,
        )
    }

    /// Provider type name, e.g. `k8s_crd_projectcalico_org_ip_pool_v1`
    pub fn type_name(&self) -> String {
        let group = self.group.replace(['.', '-'], "_");
        let mut parts = vec![TYPE_PREFIX.to_string()];
        if !group.is_empty() {
            parts.push(group);
        }
        parts.push(snake_case(self.kind));
        parts.push(self.version.to_string());
        parts.join("_")
    }

    pub fn manifest_type_name(&self) -> String {
        format!("{}{}", self.type_name(), MANIFEST_SUFFIX)
    }

    /// Set `apiVersion` and `kind` on a document
    pub fn stamp(&self, document: &mut ResourceDocument) {
        document.api_version = Some(self.api_version());
        document.kind = Some(self.kind.to_string());
    }

    /// Extract the identity of a document, enforcing the scope of this kind
    pub fn identity_of(&self, document: &ResourceDocument) -> Result<ResourceIdentity> {
        let metadata = &document.metadata;
        if metadata.name.is_empty() {
            return Err(AdapterError::InvalidDocument(format!(
                "{} requires a non-empty metadata.name",
                self.kind
            )));
        }

        if !self.namespaced {
            return Ok(ResourceIdentity::cluster(&metadata.name));
        }

        match metadata.namespace.as_deref() {
            Some(ns) if !ns.is_empty() => Ok(ResourceIdentity::namespaced(ns, &metadata.name)),
            _ => Err(AdapterError::InvalidDocument(format!(
                "{} is namespaced and requires a non-empty metadata.namespace",
                self.kind
            ))),
        }
    }

    /// Parse an import identifier: `name` or `namespace/name`
    pub fn parse_import_id(&self, id: &str) -> Result<ResourceIdentity> {
        ResourceIdentity::parse(id, self.namespaced)
    }
}

fn snake_case(kind: &str) -> String {
    let chars: Vec<char> = kind.chars().collect();
    let mut out = String::with_capacity(kind.len() + 4);

    for (i, c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.push(c.to_ascii_lowercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::document::DocumentMetadata;

    const IP_POOL: ResourceDescriptor =
        ResourceDescriptor::cluster("crd.projectcalico.org", "v1", "IPPool", "ippools");
    const NETWORK_POLICY: ResourceDescriptor = ResourceDescriptor::namespaced(
        "crd.projectcalico.org",
        "v1",
        "NetworkPolicy",
        "networkpolicies",
    );

    fn document(name: &str, namespace: Option<&str>) -> ResourceDocument {
        ResourceDocument {
            metadata: DocumentMetadata {
                name: name.to_string(),
                namespace: namespace.map(str::to_string),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_snake_case_handles_acronyms() {
        assert_eq!(snake_case("BGPConfiguration"), "bgp_configuration");
        assert_eq!(snake_case("IPPool"), "ip_pool");
        assert_eq!(snake_case("NetworkPolicy"), "network_policy");
        assert_eq!(
            snake_case("KubeControllersConfiguration"),
            "kube_controllers_configuration"
        );
        assert_eq!(snake_case("Ingress"), "ingress");
    }

    #[test]
    fn test_type_names() {
        assert_eq!(IP_POOL.type_name(), "k8s_crd_projectcalico_org_ip_pool_v1");
        assert_eq!(
            NETWORK_POLICY.manifest_type_name(),
            "k8s_crd_projectcalico_org_network_policy_v1_manifest"
        );
    }

    #[test]
    fn test_api_version_and_resource() {
        assert_eq!(IP_POOL.api_version(), "crd.projectcalico.org/v1");

        let ar = IP_POOL.api_resource();
        assert_eq!(ar.group, "crd.projectcalico.org");
        assert_eq!(ar.version, "v1");
        assert_eq!(ar.kind, "IPPool");
        assert_eq!(ar.plural, "ippools");
    }

    #[test]
    fn test_core_group_api_version() {
        let config_map = ResourceDescriptor::namespaced("", "v1", "ConfigMap", "configmaps");
        assert_eq!(config_map.api_version(), "v1");
        assert_eq!(config_map.type_name(), "k8s_config_map_v1");
    }

    #[test]
    fn test_stamp_sets_type_meta() {
        let mut doc = document("default-ipv4", None);
        IP_POOL.stamp(&mut doc);

        assert_eq!(doc.api_version.as_deref(), Some("crd.projectcalico.org/v1"));
        assert_eq!(doc.kind.as_deref(), Some("IPPool"));
    }

    #[test]
    fn test_identity_of_cluster_scoped_ignores_namespace() {
        let id = IP_POOL.identity_of(&document("default", Some("ignored"))).unwrap();
        assert_eq!(id.to_string(), "default");
    }

    #[test]
    fn test_identity_of_namespaced() {
        let id = NETWORK_POLICY
            .identity_of(&document("web-allow", Some("default")))
            .unwrap();
        assert_eq!(id.to_string(), "default/web-allow");
    }

    #[test]
    fn test_identity_of_requires_name() {
        let err = IP_POOL.identity_of(&document("", None)).unwrap_err();
        assert!(matches!(err, AdapterError::InvalidDocument(_)));
    }

    #[test]
    fn test_identity_of_requires_namespace_for_namespaced_kind() {
        assert!(NETWORK_POLICY.identity_of(&document("web-allow", None)).is_err());
        assert!(NETWORK_POLICY
            .identity_of(&document("web-allow", Some("")))
            .is_err());
    }
}
