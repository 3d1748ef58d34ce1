// Configuration document handed to the chart templates
pub mod specs;

use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use kube::core::DynamicObject;
use kube::ResourceExt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::types::FeatureOptions;
pub use specs::{ForwarderParams, LokiStackParams};

/// A fragment could not be encoded; the whole build is abandoned
#[derive(Debug, Error)]
#[error("failed to encode {what}: {source}")]
pub struct ComposeError {
    pub what: String,
    #[source]
    pub source: serde_json::Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingValues {
    pub enabled: bool,
    pub openshift_logging_channel: String,
    pub unmanaged: UnmanagedValues,
    pub managed: ManagedValues,
}

/// Resources declared by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmanagedValues {
    pub collection: CollectionValues,
}

/// Resources synthesized by the addon itself
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedValues {
    pub collection: CollectionValues,
    pub storage: StorageValues,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionValues {
    pub enabled: bool,
    pub clf_annotations: String,
    pub clf_spec: String,
    pub secrets: Vec<ResourceValue>,
    #[serde(rename = "configmaps")]
    pub config_maps: Vec<ResourceValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageValues {
    pub enabled: bool,
    pub secrets: Vec<ResourceValue>,
    pub ls_spec: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceValue {
    pub name: String,
    pub data: String,
}

impl LoggingValues {
    pub fn to_values(&self) -> Result<serde_json::Value, ComposeError> {
        serde_json::to_value(self).map_err(|source| ComposeError {
            what: "logging values".to_string(),
            source,
        })
    }

    pub fn to_json(&self) -> Result<String, ComposeError> {
        encode("logging values", self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UnmanagedFragments {
    pub forwarder: Option<DynamicObject>,
    pub secrets: Vec<Secret>,
    pub config_maps: Vec<ConfigMap>,
}

#[derive(Debug, Clone, Default)]
pub struct ManagedCollectionFragments {
    pub params: ForwarderParams,
    pub secrets: Vec<Secret>,
    pub config_maps: Vec<ConfigMap>,
}

#[derive(Debug, Clone, Default)]
pub struct ManagedStorageFragments {
    pub params: LokiStackParams,
    pub secrets: Vec<Secret>,
}

/// Resource fragments gathered by the caller for one managed cluster
#[derive(Debug, Clone, Default)]
pub struct Fragments {
    pub subscription_channel: String,
    pub unmanaged: UnmanagedFragments,
    pub managed_collection: ManagedCollectionFragments,
    pub managed_storage: ManagedStorageFragments,
}

/// Which managed area is populated; hub and spoke roles never overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedBranch {
    Inactive,
    Collection,
    Storage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveBranches {
    pub enabled: bool,
    pub unmanaged_collection: bool,
    pub managed: ManagedBranch,
}

impl From<FeatureOptions> for ActiveBranches {
    fn from(opts: FeatureOptions) -> Self {
        let managed = match (opts.default_stack_enabled, opts.is_hub_cluster) {
            (false, _) => ManagedBranch::Inactive,
            (true, false) => ManagedBranch::Collection,
            (true, true) => ManagedBranch::Storage,
        };
        Self {
            enabled: opts.unmanaged_collection_enabled || opts.default_stack_enabled,
            unmanaged_collection: opts.unmanaged_collection_enabled,
            managed,
        }
    }
}

/// Build the configuration document for the active branches only
pub fn compose(opts: FeatureOptions, fragments: &Fragments) -> Result<LoggingValues, ComposeError> {
    let branches = ActiveBranches::from(opts);
    debug!(?branches, "composing logging values");

    let unmanaged = if branches.unmanaged_collection {
        UnmanagedValues {
            collection: unmanaged_collection(&fragments.unmanaged)?,
        }
    } else {
        UnmanagedValues::default()
    };

    let managed = match branches.managed {
        ManagedBranch::Inactive => ManagedValues::default(),
        ManagedBranch::Collection => ManagedValues {
            collection: managed_collection(&fragments.managed_collection)?,
            storage: StorageValues::default(),
        },
        ManagedBranch::Storage => ManagedValues {
            collection: CollectionValues::default(),
            storage: managed_storage(&fragments.managed_storage)?,
        },
    };

    Ok(LoggingValues {
        enabled: branches.enabled,
        openshift_logging_channel: fragments.subscription_channel.clone(),
        unmanaged,
        managed,
    })
}

fn unmanaged_collection(fragments: &UnmanagedFragments) -> Result<CollectionValues, ComposeError> {
    let empty = BTreeMap::new();
    // Annotations carry feature flags for the log forwarder operator
    let annotations = fragments
        .forwarder
        .as_ref()
        .map(|clf| clf.annotations())
        .unwrap_or(&empty);
    let spec = fragments
        .forwarder
        .as_ref()
        .and_then(|clf| clf.data.get("spec"))
        .cloned()
        .unwrap_or_else(|| serde_json::Value::Object(Default::default()));

    Ok(CollectionValues {
        enabled: true,
        clf_annotations: encode("forwarder annotations", annotations)?,
        clf_spec: encode("forwarder spec", &spec)?,
        secrets: secret_values(&fragments.secrets)?,
        config_maps: config_map_values(&fragments.config_maps)?,
    })
}

fn managed_collection(fragments: &ManagedCollectionFragments) -> Result<CollectionValues, ComposeError> {
    let spec = specs::managed_forwarder_spec(&fragments.params);

    Ok(CollectionValues {
        enabled: true,
        clf_annotations: String::new(),
        clf_spec: encode("managed forwarder spec", &spec)?,
        secrets: secret_values(&fragments.secrets)?,
        config_maps: config_map_values(&fragments.config_maps)?,
    })
}

fn managed_storage(fragments: &ManagedStorageFragments) -> Result<StorageValues, ComposeError> {
    let spec = specs::managed_lokistack_spec(&fragments.params);

    Ok(StorageValues {
        enabled: true,
        secrets: secret_values(&fragments.secrets)?,
        ls_spec: encode("managed lokistack spec", &spec)?,
    })
}

fn secret_values(secrets: &[Secret]) -> Result<Vec<ResourceValue>, ComposeError> {
    secrets
        .iter()
        .map(|secret| resource_value("secret", secret.name_any(), secret.data.as_ref()))
        .collect()
}

fn config_map_values(config_maps: &[ConfigMap]) -> Result<Vec<ResourceValue>, ComposeError> {
    config_maps
        .iter()
        .map(|cm| resource_value("configmap", cm.name_any(), cm.data.as_ref()))
        .collect()
}

fn resource_value<T: Serialize>(
    kind: &str,
    name: String,
    data: Option<&BTreeMap<String, T>>,
) -> Result<ResourceValue, ComposeError> {
    let empty = BTreeMap::new();
    let data = encode(&format!("{} {} data", kind, name), data.unwrap_or(&empty))?;
    Ok(ResourceValue { name, data })
}

fn encode<T: Serialize + ?Sized>(what: &str, value: &T) -> Result<String, ComposeError> {
    serde_json::to_string(value).map_err(|source| ComposeError {
        what: what.to_string(),
        source,
    })
}
