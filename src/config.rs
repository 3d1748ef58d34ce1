use anyhow::{anyhow, Result};
use std::collections::HashMap;
use crate::types::{Config, ProbeTarget};

/// Trait for abstracting environment variable access
pub trait EnvironmentProvider {
    fn get_var(&self, key: &str) -> Option<String>;
}

/// Production implementation using std::env
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Mock implementation for testing
#[derive(Debug, Default)]
pub struct MockEnvironment {
    vars: HashMap<String, String>,
}

impl MockEnvironment {
    pub fn new() -> Self {
        Self {
            vars: HashMap::new(),
        }
    }
    
    pub fn set_var<K, V>(&mut self, key: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.vars.insert(key.into(), value.into());
        self
    }
    
    pub fn with_var<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.set_var(key, value);
        self
    }
}

impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

pub fn load_config() -> Result<Config> {
    load_config_with_env(&SystemEnvironment)
}

pub fn load_config_with_env<E: EnvironmentProvider>(env: &E) -> Result<Config> {
    let cluster_namespace = env.get_var("CLUSTER_NAMESPACE")
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow!("CLUSTER_NAMESPACE env var must be set"))?;

    let work_name = var_or(env, "WORK_NAME", "addon-multicluster-observability-addon-deploy-0");

    let log_forwarder = ProbeTarget {
        name: var_or(env, "LOG_FORWARDER_NAME", "mcoa-instance"),
        namespace: var_or(env, "LOG_FORWARDER_NAMESPACE", "openshift-logging"),
    };
    let trace_collector = ProbeTarget {
        name: var_or(env, "TRACE_COLLECTOR_NAME", "mcoa-instance"),
        namespace: var_or(env, "TRACE_COLLECTOR_NAMESPACE", "mcoa-opentelemetry"),
    };

    let unmanaged_collection_key = var_or(env, "UNMANAGED_COLLECTION_KEY", "platformLogsCollection");
    let default_stack_key = var_or(env, "DEFAULT_STACK_KEY", "platformLogsDefault");
    let hub_label_key = var_or(env, "HUB_LABEL_KEY", "local-cluster");
    let subscription_channel = var_or(env, "SUBSCRIPTION_CHANNEL", "stable-6.2");

    let fail_on_unhealthy = env.get_var("FAIL_ON_UNHEALTHY")
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(false);

    Ok(Config {
        cluster_namespace,
        work_name,
        log_forwarder,
        trace_collector,
        unmanaged_collection_key,
        default_stack_key,
        hub_label_key,
        subscription_channel,
        fail_on_unhealthy,
    })
}

fn var_or<E: EnvironmentProvider>(env: &E, key: &str, default: &str) -> String {
    env.get_var(key)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}
