// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Attribute schemas exposed to the provider state plane.
//!
//! Every kind gets three variants built from the same descriptor: a managed
//! resource, a data source and a manifest data source. The common blocks
//! (`id`, `metadata`, `spec`) are identical across the three.

use crate::schema::spec::{Field, FieldType, SpecSchema};
use crate::types::ResourceDescriptor;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
    Float64,
    Bool,
    Object,
    List,
    Map,
    Dynamic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeMode {
    Required,
    Optional,
    Computed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: AttributeType,
    pub mode: AttributeMode,
    /// Changing this attribute forces the resource to be replaced
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<Attribute>,
}

impl Attribute {
    fn new(name: &str, ty: AttributeType, mode: AttributeMode, description: &str) -> Self {
        Self {
            name: name.to_string(),
            ty,
            mode,
            requires_replace: false,
            description: description.to_string(),
            nested: Vec::new(),
        }
    }

    fn replaces(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    fn with_nested(mut self, nested: Vec<Attribute>) -> Self {
        self.nested = nested;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaVariant {
    Resource,
    DataSource,
    Manifest,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceSchema {
    pub type_name: String,
    pub variant: SchemaVariant,
    pub description: String,
    pub attributes: Vec<Attribute>,
}

impl ResourceSchema {
    pub fn resource(descriptor: &ResourceDescriptor, spec: &SpecSchema) -> Self {
        use AttributeMode::*;
        use AttributeType as T;

        let attributes = vec![
            id_attribute(descriptor),
            Attribute::new(
                "force_conflicts",
                T::Bool,
                Optional,
                "Override field ownership conflicts during server-side apply.",
            ),
            Attribute::new(
                "field_manager",
                T::String,
                Optional,
                "Field manager used for server-side apply.",
            ),
            Attribute::new(
                "wait_for",
                T::List,
                Optional,
                "Conditions to wait for after the object was applied.",
            )
            .with_nested(vec![
                Attribute::new("jsonpath", T::String, Required, "Path evaluated against the stored object."),
                Attribute::new("value", T::String, Optional, "Expected value at the path."),
                Attribute::new("timeout", T::String, Optional, "Duration to wait, e.g. 30s. 0s checks once, negative waits one week."),
            ]),
            metadata_attribute(descriptor, Required, Optional),
            spec_attribute(spec, if spec.required { Required } else { Optional }),
        ];

        Self {
            type_name: descriptor.type_name(),
            variant: SchemaVariant::Resource,
            description: format!("{} ({}) managed with server-side apply.", descriptor.kind, descriptor.api_version()),
            attributes,
        }
    }

    pub fn data_source(descriptor: &ResourceDescriptor, spec: &SpecSchema) -> Self {
        use AttributeMode::*;

        Self {
            type_name: descriptor.type_name(),
            variant: SchemaVariant::DataSource,
            description: format!("Reads an existing {} ({}).", descriptor.kind, descriptor.api_version()),
            attributes: vec![
                id_attribute(descriptor),
                metadata_attribute(descriptor, Required, Computed),
                spec_attribute(spec, Computed),
            ],
        }
    }

    pub fn manifest(descriptor: &ResourceDescriptor, spec: &SpecSchema) -> Self {
        use AttributeMode::*;

        Self {
            type_name: descriptor.manifest_type_name(),
            variant: SchemaVariant::Manifest,
            description: format!("Renders a {} ({}) as YAML.", descriptor.kind, descriptor.api_version()),
            attributes: vec![
                id_attribute(descriptor),
                metadata_attribute(descriptor, Required, Optional),
                spec_attribute(spec, if spec.required { Required } else { Optional }),
                Attribute::new("yaml", AttributeType::String, Computed, "The rendered manifest."),
            ],
        }
    }

    /// Look up an attribute by dotted path, e.g. `metadata.namespace`
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.attributes.iter().find(|a| a.name == first)?;
        for segment in segments {
            current = current.nested.iter().find(|a| a.name == segment)?;
        }
        Some(current)
    }
}

fn id_attribute(descriptor: &ResourceDescriptor) -> Attribute {
    let format = if descriptor.namespaced {
        "'namespace/name'"
    } else {
        "'name'"
    };
    Attribute::new(
        "id",
        AttributeType::String,
        AttributeMode::Computed,
        &format!("Identity of the object in the form {}.", format),
    )
}

fn metadata_attribute(
    descriptor: &ResourceDescriptor,
    identity_mode: AttributeMode,
    maps_mode: AttributeMode,
) -> Attribute {
    use AttributeType as T;

    let mut nested = vec![Attribute::new("name", T::String, identity_mode, "Name of the object.").replaces()];
    if descriptor.namespaced {
        nested.push(
            Attribute::new("namespace", T::String, identity_mode, "Namespace of the object.").replaces(),
        );
    }
    nested.push(Attribute::new("labels", T::Map, maps_mode, "Labels of the object."));
    nested.push(Attribute::new("annotations", T::Map, maps_mode, "Annotations of the object."));

    Attribute::new("metadata", T::Object, AttributeMode::Required, "").with_nested(nested)
}

fn spec_attribute(spec: &SpecSchema, mode: AttributeMode) -> Attribute {
    let (ty, nested) = attribute_shape(&spec.root, mode);
    Attribute::new("spec", ty, mode, "").with_nested(nested)
}

fn attribute_shape(ty: &FieldType, mode: AttributeMode) -> (AttributeType, Vec<Attribute>) {
    match ty {
        FieldType::String => (AttributeType::String, Vec::new()),
        FieldType::Integer => (AttributeType::Int64, Vec::new()),
        FieldType::Number => (AttributeType::Float64, Vec::new()),
        FieldType::Boolean => (AttributeType::Bool, Vec::new()),
        FieldType::Array(_) => (AttributeType::List, Vec::new()),
        FieldType::Map(_) => (AttributeType::Map, Vec::new()),
        FieldType::Any => (AttributeType::Dynamic, Vec::new()),
        FieldType::Object(fields) => (
            AttributeType::Object,
            fields.iter().map(|f| field_attribute(f, mode)).collect(),
        ),
    }
}

fn field_attribute(field: &Field, parent_mode: AttributeMode) -> Attribute {
    let mode = match parent_mode {
        AttributeMode::Computed => AttributeMode::Computed,
        _ if field.required => AttributeMode::Required,
        _ => AttributeMode::Optional,
    };
    let (ty, nested) = attribute_shape(&field.ty, mode);
    Attribute::new(field.name, ty, mode, field.description).with_nested(nested)
}

#[cfg(test)]
mod tests {
    use super::*;

    const IP_POOL: ResourceDescriptor =
        ResourceDescriptor::cluster("crd.projectcalico.org", "v1", "IPPool", "ippools");
    const NETWORK_SET: ResourceDescriptor =
        ResourceDescriptor::namespaced("crd.projectcalico.org", "v1", "NetworkSet", "networksets");

    fn ip_pool_spec() -> SpecSchema {
        SpecSchema::object(vec![
            Field::required("cidr", FieldType::String),
            Field::optional("blockSize", FieldType::Integer),
        ])
    }

    #[test]
    fn test_resource_schema_has_common_attributes() {
        let schema = ResourceSchema::resource(&IP_POOL, &ip_pool_spec());

        for path in ["id", "force_conflicts", "field_manager", "wait_for.jsonpath", "metadata.name", "spec.cidr"] {
            assert!(schema.attribute(path).is_some(), "missing {}", path);
        }
        assert_eq!(schema.type_name, "k8s_crd_projectcalico_org_ip_pool_v1");
        assert_eq!(schema.attribute("spec").unwrap().mode, AttributeMode::Required);
        assert_eq!(schema.attribute("spec.cidr").unwrap().mode, AttributeMode::Required);
        assert_eq!(schema.attribute("spec.blockSize").unwrap().ty, AttributeType::Int64);
    }

    #[test]
    fn test_namespace_attribute_only_for_namespaced_kinds() {
        let cluster = ResourceSchema::resource(&IP_POOL, &SpecSchema::any());
        let namespaced = ResourceSchema::resource(&NETWORK_SET, &SpecSchema::any());

        assert!(cluster.attribute("metadata.namespace").is_none());
        let ns = namespaced.attribute("metadata.namespace").unwrap();
        assert!(ns.requires_replace);
        assert_eq!(ns.mode, AttributeMode::Required);
    }

    #[test]
    fn test_identity_attributes_require_replace() {
        let schema = ResourceSchema::resource(&IP_POOL, &SpecSchema::any());
        assert!(schema.attribute("metadata.name").unwrap().requires_replace);
        assert!(!schema.attribute("metadata.labels").unwrap().requires_replace);
    }

    #[test]
    fn test_every_variant_declares_id() {
        let spec = ip_pool_spec();
        for schema in [
            ResourceSchema::resource(&IP_POOL, &spec),
            ResourceSchema::data_source(&IP_POOL, &spec),
            ResourceSchema::manifest(&IP_POOL, &spec),
        ] {
            let id = schema.attribute("id").unwrap();
            assert_eq!(id.mode, AttributeMode::Computed);
        }
    }

    #[test]
    fn test_manifest_schema() {
        let schema = ResourceSchema::manifest(&NETWORK_SET, &SpecSchema::any());

        assert_eq!(
            schema.type_name,
            "k8s_crd_projectcalico_org_network_set_v1_manifest"
        );
        assert_eq!(schema.attribute("yaml").unwrap().mode, AttributeMode::Computed);
        assert!(schema.attribute("wait_for").is_none());
        assert!(schema.attribute("force_conflicts").is_none());
        assert_eq!(schema.attribute("spec").unwrap().ty, AttributeType::Dynamic);
    }

    #[test]
    fn test_data_source_spec_is_computed() {
        let schema = ResourceSchema::data_source(&IP_POOL, &ip_pool_spec());

        assert_eq!(schema.attribute("spec").unwrap().mode, AttributeMode::Computed);
        assert_eq!(schema.attribute("spec.cidr").unwrap().mode, AttributeMode::Computed);
        assert_eq!(schema.attribute("metadata.labels").unwrap().mode, AttributeMode::Computed);
        assert_eq!(schema.attribute("metadata.name").unwrap().mode, AttributeMode::Required);
    }

    #[test]
    fn test_schema_serializes_for_display() {
        let schema = ResourceSchema::manifest(&IP_POOL, &SpecSchema::any());
        let value = serde_json::to_value(&schema).unwrap();

        assert_eq!(value["variant"], "manifest");
        assert_eq!(value["attributes"][0]["name"], "id");
        assert_eq!(value["attributes"][0]["type"], "string");
    }
}
