use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::types::{Config, FeatureOptions};

const SUBSCRIPTION_CHANNEL_KEY: &str = "openshiftLoggingChannel";

/// A name/value pair declared on the addon deployment config
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomizedVariable {
    pub name: String,
    pub value: String,
}

/// Intents declared for one managed cluster
#[derive(Debug, Clone, Default)]
pub struct DeploymentIntents {
    pub customized_variables: Vec<CustomizedVariable>,
    pub cluster_labels: BTreeMap<String, String>,
}

impl DeploymentIntents {
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.customized_variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }

    pub fn with_variable(mut self, name: &str, value: &str) -> Self {
        self.customized_variables.push(CustomizedVariable {
            name: name.to_string(),
            value: value.to_string(),
        });
        self
    }

    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.cluster_labels.insert(key.to_string(), value.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct OptionResolver {
    unmanaged_collection_key: String,
    default_stack_key: String,
    hub_label_key: String,
    default_channel: String,
}

impl OptionResolver {
    pub fn new(cfg: &Config) -> Self {
        Self {
            unmanaged_collection_key: cfg.unmanaged_collection_key.clone(),
            default_stack_key: cfg.default_stack_key.clone(),
            hub_label_key: cfg.hub_label_key.clone(),
            default_channel: cfg.subscription_channel.clone(),
        }
    }

    pub fn resolve(&self, intents: &DeploymentIntents) -> FeatureOptions {
        let unmanaged_collection_enabled = intents
            .variable(&self.unmanaged_collection_key)
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false);

        let default_stack_enabled = intents
            .variable(&self.default_stack_key)
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let is_hub_cluster = intents
            .cluster_labels
            .get(&self.hub_label_key)
            .map(|v| v == "true")
            .unwrap_or(false);

        FeatureOptions {
            unmanaged_collection_enabled,
            default_stack_enabled,
            is_hub_cluster,
        }
    }

    pub fn subscription_channel(&self, intents: &DeploymentIntents) -> String {
        intents
            .variable(SUBSCRIPTION_CHANNEL_KEY)
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|| self.default_channel.clone())
    }
}

/// A configuration reference attached to the addon
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigReference {
    #[serde(default)]
    pub group: String,
    pub resource: String,
    pub name: String,
    #[serde(default)]
    pub namespace: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey {
    pub name: String,
    pub namespace: String,
}

/// Keys of the referenced objects of a given group and resource
pub fn config_object_keys(refs: &[ConfigReference], group: &str, resource: &str) -> Vec<ObjectKey> {
    refs.iter()
        .filter(|r| r.group == group && r.resource == resource)
        .map(|r| ObjectKey {
            name: r.name.clone(),
            namespace: r.namespace.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_with_env, MockEnvironment};

    fn resolver() -> OptionResolver {
        let env = MockEnvironment::new().with_var("CLUSTER_NAMESPACE", "cluster-1");
        OptionResolver::new(&load_config_with_env(&env).unwrap())
    }

    #[test]
    fn test_resolve_nothing_requested() {
        let opts = resolver().resolve(&DeploymentIntents::default());
        assert_eq!(opts, FeatureOptions::default());
    }

    #[test]
    fn test_resolve_unmanaged_collection() {
        let intents = DeploymentIntents::default()
            .with_variable("platformLogsCollection", "clusterlogforwarders.v1.observability.openshift.io");
        let opts = resolver().resolve(&intents);
        assert!(opts.unmanaged_collection_enabled);
        assert!(!opts.default_stack_enabled);

        // An empty value is not a request
        let intents = DeploymentIntents::default().with_variable("platformLogsCollection", " ");
        assert!(!resolver().resolve(&intents).unmanaged_collection_enabled);
    }

    #[test]
    fn test_resolve_default_stack_and_hub() {
        let intents = DeploymentIntents::default()
            .with_variable("platformLogsDefault", "TRUE")
            .with_label("local-cluster", "true");
        let opts = resolver().resolve(&intents);
        assert!(opts.default_stack_enabled);
        assert!(opts.is_hub_cluster);
        assert!(!opts.unmanaged_collection_enabled);

        let intents = DeploymentIntents::default()
            .with_variable("platformLogsDefault", "false")
            .with_label("local-cluster", "false");
        let opts = resolver().resolve(&intents);
        assert!(!opts.default_stack_enabled);
        assert!(!opts.is_hub_cluster);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let intents = DeploymentIntents::default()
            .with_variable("platformLogsCollection", "clusterlogforwarders.v1.observability.openshift.io")
            .with_variable("platformLogsDefault", "true");
        let r = resolver();
        assert_eq!(r.resolve(&intents), r.resolve(&intents));
    }

    #[test]
    fn test_injected_keys() {
        let env = MockEnvironment::new()
            .with_var("CLUSTER_NAMESPACE", "cluster-1")
            .with_var("DEFAULT_STACK_KEY", "logsDefault")
            .with_var("HUB_LABEL_KEY", "is-hub");
        let resolver = OptionResolver::new(&load_config_with_env(&env).unwrap());

        let intents = DeploymentIntents::default()
            .with_variable("logsDefault", "true")
            .with_label("is-hub", "true")
            .with_label("local-cluster", "false");
        let opts = resolver.resolve(&intents);
        assert!(opts.default_stack_enabled);
        assert!(opts.is_hub_cluster);
    }

    #[test]
    fn test_subscription_channel() {
        let r = resolver();
        assert_eq!(r.subscription_channel(&DeploymentIntents::default()), "stable-6.2");

        let intents = DeploymentIntents::default().with_variable("openshiftLoggingChannel", "stable-6.1");
        assert_eq!(r.subscription_channel(&intents), "stable-6.1");
    }

    #[test]
    fn test_config_object_keys() {
        let reference = |group: &str, resource: &str, name: &str| ConfigReference {
            group: group.to_string(),
            resource: resource.to_string(),
            name: name.to_string(),
            namespace: "open-cluster-management".to_string(),
        };
        let refs = vec![
            reference("addon.open-cluster-management.io", "addondeploymentconfigs", "mcoa"),
            reference("observability.openshift.io", "clusterlogforwarders", "instance"),
            reference("", "secrets", "loki-auth"),
            reference("observability.openshift.io", "clusterlogforwarders", "second"),
        ];

        let keys = config_object_keys(&refs, "observability.openshift.io", "clusterlogforwarders");
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].name, "instance");
        assert_eq!(keys[1].name, "second");

        let keys = config_object_keys(&refs, "", "secrets");
        assert_eq!(keys, vec![ObjectKey { name: "loki-auth".into(), namespace: "open-cluster-management".into() }]);

        assert!(config_object_keys(&refs, "", "configmaps").is_empty());
    }
}
