// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Calico custom resources served under `crd.projectcalico.org/v1`.

use crate::kinds::KindEntry;
use crate::schema::{Field, FieldType, SpecSchema};
use crate::types::ResourceDescriptor;

const GROUP: &str = "crd.projectcalico.org";
const VERSION: &str = "v1";

pub const BGP_CONFIGURATION: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "BGPConfiguration", "bgpconfigurations");
pub const BGP_FILTER: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "BGPFilter", "bgpfilters");
pub const BGP_PEER: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "BGPPeer", "bgppeers");
pub const CLUSTER_INFORMATION: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "ClusterInformation", "clusterinformations");
pub const FELIX_CONFIGURATION: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "FelixConfiguration", "felixconfigurations");
pub const GLOBAL_NETWORK_POLICY: ResourceDescriptor = ResourceDescriptor::cluster(
    GROUP,
    VERSION,
    "GlobalNetworkPolicy",
    "globalnetworkpolicies",
);
pub const GLOBAL_NETWORK_SET: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "GlobalNetworkSet", "globalnetworksets");
pub const HOST_ENDPOINT: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "HostEndpoint", "hostendpoints");
pub const IP_POOL: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "IPPool", "ippools");
pub const IP_RESERVATION: ResourceDescriptor =
    ResourceDescriptor::cluster(GROUP, VERSION, "IPReservation", "ipreservations");
pub const KUBE_CONTROLLERS_CONFIGURATION: ResourceDescriptor = ResourceDescriptor::cluster(
    GROUP,
    VERSION,
    "KubeControllersConfiguration",
    "kubecontrollersconfigurations",
);
pub const NETWORK_POLICY: ResourceDescriptor =
    ResourceDescriptor::namespaced(GROUP, VERSION, "NetworkPolicy", "networkpolicies");
pub const NETWORK_SET: ResourceDescriptor =
    ResourceDescriptor::namespaced(GROUP, VERSION, "NetworkSet", "networksets");

pub fn kinds() -> Vec<KindEntry> {
    vec![
        KindEntry::new(BGP_CONFIGURATION, bgp_configuration()),
        KindEntry::new(BGP_FILTER, SpecSchema::any()),
        KindEntry::new(BGP_PEER, bgp_peer()),
        KindEntry::new(CLUSTER_INFORMATION, cluster_information()),
        KindEntry::new(FELIX_CONFIGURATION, SpecSchema::any()),
        KindEntry::new(GLOBAL_NETWORK_POLICY, network_policy(true)),
        KindEntry::new(GLOBAL_NETWORK_SET, network_set()),
        KindEntry::new(HOST_ENDPOINT, host_endpoint()),
        KindEntry::new(IP_POOL, ip_pool()),
        KindEntry::new(IP_RESERVATION, ip_reservation()),
        KindEntry::new(KUBE_CONTROLLERS_CONFIGURATION, SpecSchema::any()),
        KindEntry::new(NETWORK_POLICY, network_policy(false)),
        KindEntry::new(NETWORK_SET, network_set()),
    ]
}

fn strings() -> FieldType {
    FieldType::array_of(FieldType::String)
}

fn cidr_list() -> FieldType {
    FieldType::array_of(FieldType::Object(vec![Field::optional(
        "cidr",
        FieldType::String,
    )]))
}

fn bgp_configuration() -> SpecSchema {
    SpecSchema::object(vec![
        Field::optional("asNumber", FieldType::Integer)
            .describe("Default local AS number used when a node has none."),
        Field::optional("bindMode", FieldType::String),
        Field::optional(
            "communities",
            FieldType::array_of(FieldType::Object(vec![
                Field::optional("name", FieldType::String),
                Field::optional("value", FieldType::String),
            ])),
        ),
        Field::optional("ignoredInterfaces", strings()),
        Field::optional("listenPort", FieldType::Integer),
        Field::optional("localWorkloadPeeringIPV4", FieldType::String),
        Field::optional("localWorkloadPeeringIPV6", FieldType::String),
        Field::optional("logSeverityScreen", FieldType::String),
        Field::optional("nodeMeshMaxRestartTime", FieldType::String),
        Field::optional("nodeMeshPassword", FieldType::Any),
        Field::optional("nodeToNodeMeshEnabled", FieldType::Boolean),
        Field::optional("prefixAdvertisements", FieldType::array_of(FieldType::Any)),
        Field::optional("serviceClusterIPs", cidr_list()),
        Field::optional("serviceExternalIPs", cidr_list()),
        Field::optional("serviceLoadBalancerIPs", cidr_list()),
    ])
}

fn bgp_peer() -> SpecSchema {
    SpecSchema::object(vec![
        Field::optional("asNumber", FieldType::Integer),
        Field::optional("filters", strings()),
        Field::optional("keepOriginalNextHop", FieldType::Boolean),
        Field::optional("maxRestartTime", FieldType::String),
        Field::optional("node", FieldType::String),
        Field::optional("nodeSelector", FieldType::String),
        Field::optional("numAllowedLocalASNumbers", FieldType::Integer),
        Field::optional("password", FieldType::Any),
        Field::optional("peerIP", FieldType::String),
        Field::optional("peerSelector", FieldType::String),
        Field::optional("reachableBy", FieldType::String),
        Field::optional("sourceAddress", FieldType::String),
        Field::optional("ttlSecurity", FieldType::Integer),
    ])
}

fn cluster_information() -> SpecSchema {
    SpecSchema::object(vec![
        Field::optional("calicoVersion", FieldType::String),
        Field::optional("clusterGUID", FieldType::String),
        Field::optional("clusterType", FieldType::String),
        Field::optional("datastoreReady", FieldType::Boolean),
        Field::optional("variant", FieldType::String),
    ])
}

fn host_endpoint() -> SpecSchema {
    SpecSchema::object(vec![
        Field::optional("expectedIPs", strings()),
        Field::optional("interfaceName", FieldType::String),
        Field::optional("node", FieldType::String),
        Field::optional(
            "ports",
            FieldType::array_of(FieldType::Object(vec![
                Field::required("name", FieldType::String),
                Field::required("port", FieldType::Integer),
                Field::required("protocol", FieldType::Any),
            ])),
        ),
        Field::optional("profiles", strings()),
    ])
}

fn ip_pool() -> SpecSchema {
    SpecSchema::object(vec![
        Field::optional("allowedUses", strings()),
        Field::optional("assignmentMode", FieldType::String),
        Field::optional("blockSize", FieldType::Integer),
        Field::required("cidr", FieldType::String).describe("The pool CIDR."),
        Field::optional("disableBGPExport", FieldType::Boolean),
        Field::optional("disabled", FieldType::Boolean),
        Field::optional(
            "ipip",
            FieldType::Object(vec![
                Field::optional("enabled", FieldType::Boolean),
                Field::optional("mode", FieldType::String),
            ]),
        )
        .describe("Deprecated, use ipipMode."),
        Field::optional("ipipMode", FieldType::String),
        Field::optional("nat-outgoing", FieldType::Boolean)
            .describe("Deprecated, use natOutgoing."),
        Field::optional("natOutgoing", FieldType::Boolean),
        Field::optional("nodeSelector", FieldType::String),
        Field::optional("vxlanMode", FieldType::String),
    ])
}

fn ip_reservation() -> SpecSchema {
    SpecSchema::object(vec![Field::optional("reservedCIDRs", strings())])
}

fn network_policy(global: bool) -> SpecSchema {
    let mut fields = vec![
        Field::optional("egress", FieldType::array_of(FieldType::Any)),
        Field::optional("ingress", FieldType::array_of(FieldType::Any)),
        Field::optional("order", FieldType::Number),
        Field::optional("performanceHints", strings()),
        Field::optional("selector", FieldType::String),
        Field::optional("serviceAccountSelector", FieldType::String),
        Field::optional("tier", FieldType::String),
        Field::optional("types", strings()),
    ];
    if global {
        fields.extend([
            Field::optional("applyOnForward", FieldType::Boolean),
            Field::optional("doNotTrack", FieldType::Boolean),
            Field::optional("namespaceSelector", FieldType::String),
            Field::optional("preDNAT", FieldType::Boolean),
        ]);
    }
    SpecSchema::object(fields)
}

fn network_set() -> SpecSchema {
    SpecSchema::object(vec![Field::optional("nets", strings())])
}
