use serde::Serialize;
use std::collections::BTreeMap;

use crate::types::{Config, ResourceIdentifier};

pub const LOG_FORWARDER_GROUP: &str = "observability.openshift.io";
pub const LOG_FORWARDER_RESOURCE: &str = "clusterlogforwarders";
pub const TRACE_COLLECTOR_GROUP: &str = "opentelemetry.io";
pub const TRACE_COLLECTOR_RESOURCE: &str = "opentelemetrycollectors";

const LOG_FORWARDER_PROBE_KEY: &str = "status";
const LOG_FORWARDER_PROBE_PATH: &str = r#".status.conditions[?(@.type=="Ready")].status"#;
const TRACE_COLLECTOR_PROBE_KEY: &str = "replicas";
const TRACE_COLLECTOR_PROBE_PATH: &str = ".spec.replicas";

/// How a reported value is judged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeRule {
    StringEquals(String),
    IntegerAtLeast(i64),
}

/// Declares the feedback expected from one monitored resource kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSpec {
    pub identifier: ResourceIdentifier,
    pub key: String,
    pub json_path: String,
    pub rule: ProbeRule,
}

/// Immutable lookup from resource kind to its health rule
#[derive(Debug, Clone, Default)]
pub struct ProbeRegistry {
    specs: BTreeMap<String, ProbeSpec>,
}

impl ProbeRegistry {
    /// Later specs for the same resource kind replace earlier ones
    pub fn new(specs: impl IntoIterator<Item = ProbeSpec>) -> Self {
        let specs = specs
            .into_iter()
            .map(|spec| (spec.identifier.resource.clone(), spec))
            .collect();
        Self { specs }
    }

    /// Registry for the log forwarder and the trace collector deployed by the addon
    pub fn from_config(cfg: &Config) -> Self {
        Self::new([
            ProbeSpec {
                identifier: ResourceIdentifier::new(
                    LOG_FORWARDER_GROUP,
                    LOG_FORWARDER_RESOURCE,
                    &cfg.log_forwarder.name,
                    &cfg.log_forwarder.namespace,
                ),
                key: LOG_FORWARDER_PROBE_KEY.to_string(),
                json_path: LOG_FORWARDER_PROBE_PATH.to_string(),
                rule: ProbeRule::StringEquals("True".to_string()),
            },
            ProbeSpec {
                identifier: ResourceIdentifier::new(
                    TRACE_COLLECTOR_GROUP,
                    TRACE_COLLECTOR_RESOURCE,
                    &cfg.trace_collector.name,
                    &cfg.trace_collector.namespace,
                ),
                key: TRACE_COLLECTOR_PROBE_KEY.to_string(),
                json_path: TRACE_COLLECTOR_PROBE_PATH.to_string(),
                rule: ProbeRule::IntegerAtLeast(1),
            },
        ])
    }

    pub fn lookup(&self, resource: &str) -> Option<&ProbeSpec> {
        self.specs.get(resource)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Work prober declaration asking the spoke to report each probe's JSON path
    pub fn probe_fields(&self) -> Vec<ProbeField> {
        self.specs
            .values()
            .map(|spec| ProbeField {
                resource_identifier: spec.identifier.clone(),
                probe_rules: vec![FeedbackRule {
                    type_: "JSONPaths".to_string(),
                    json_paths: vec![JsonPath {
                        name: spec.key.clone(),
                        path: spec.json_path.clone(),
                    }],
                }],
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeField {
    pub resource_identifier: ResourceIdentifier,
    pub probe_rules: Vec<FeedbackRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRule {
    #[serde(rename = "type")]
    pub type_: String,
    pub json_paths: Vec<JsonPath>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonPath {
    pub name: String,
    pub path: String,
}
