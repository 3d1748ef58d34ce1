use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone)]
pub struct Config {
    pub cluster_namespace: String,
    pub work_name: String,
    pub log_forwarder: ProbeTarget,
    pub trace_collector: ProbeTarget,
    pub unmanaged_collection_key: String,
    pub default_stack_key: String,
    pub hub_label_key: String,
    pub subscription_channel: String,
    pub fail_on_unhealthy: bool,
}

/// Name and namespace of a probed instance on the spoke
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    pub name: String,
    pub namespace: String,
}

/// Identifies a single resource instance deployed on the spoke cluster
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceIdentifier {
    #[serde(default)]
    pub group: String,
    pub resource: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

impl ResourceIdentifier {
    pub fn new(group: &str, resource: &str, name: &str, namespace: &str) -> Self {
        Self {
            group: group.to_string(),
            resource: resource.to_string(),
            name: name.to_string(),
            namespace: namespace.to_string(),
        }
    }
}

impl fmt::Display for ResourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.resource, self.namespace, self.name)
    }
}

/// A reported feedback value, tagged by its wire type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackValue {
    String(String),
    Integer(i64),
    Absent,
}

impl FeedbackValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FeedbackValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FeedbackValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for FeedbackValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackValue::String(s) => write!(f, "{}", s),
            FeedbackValue::Integer(i) => write!(f, "{}", i),
            FeedbackValue::Absent => write!(f, "<nil>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackEntry {
    pub key: String,
    pub value: FeedbackValue,
}

/// Everything reported back for one probed resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackField {
    pub identifier: ResourceIdentifier,
    pub values: Vec<FeedbackEntry>,
}

impl FeedbackField {
    pub fn new(identifier: ResourceIdentifier) -> Self {
        Self {
            identifier,
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, key: &str, value: FeedbackValue) -> Self {
        self.values.push(FeedbackEntry {
            key: key.to_string(),
            value,
        });
        self
    }
}

/// Feature flags that select which configuration branches get populated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureOptions {
    pub unmanaged_collection_enabled: bool,
    pub default_stack_enabled: bool,
    pub is_hub_cluster: bool,
}
