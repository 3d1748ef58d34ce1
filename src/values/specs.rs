use serde::Serialize;

const HUB_OUTPUT_NAME: &str = "hub-lokistack";

/// Inputs for the forwarder spec applied on spokes running the default stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwarderParams {
    pub service_account: String,
    pub hub_endpoint: String,
    pub tls_secret_name: String,
}

impl Default for ForwarderParams {
    fn default() -> Self {
        Self {
            service_account: "mcoa-logcollector".to_string(),
            hub_endpoint: String::new(),
            tls_secret_name: "mcoa-managed-collection-tls".to_string(),
        }
    }
}

/// Inputs for the storage spec applied on the hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LokiStackParams {
    pub size: String,
    pub storage_secret_name: String,
    pub storage_secret_type: String,
    pub storage_class_name: String,
    pub schema_effective_date: String,
}

impl Default for LokiStackParams {
    fn default() -> Self {
        Self {
            size: "1x.extra-small".to_string(),
            storage_secret_name: "mcoa-managed-storage".to_string(),
            storage_secret_type: "s3".to_string(),
            storage_class_name: "gp3-csi".to_string(),
            schema_effective_date: "2024-01-01".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwarderSpec {
    pub service_account: NameRef,
    pub outputs: Vec<ForwarderOutput>,
    pub pipelines: Vec<Pipeline>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameRef {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwarderOutput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub loki: LokiOutput,
    pub tls: OutputTls,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LokiOutput {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputTls {
    pub ca: SecretKeyRef,
    pub certificate: SecretKeyRef,
    pub key: SecretKeyRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeyRef {
    pub key: String,
    pub secret_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub name: String,
    pub input_refs: Vec<String>,
    pub output_refs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LokiStackSpec {
    pub size: String,
    pub storage: LokiStorage,
    pub storage_class_name: String,
    pub tenants: Tenants,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LokiStorage {
    pub secret: StorageSecret,
    pub schemas: Vec<SchemaSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageSecret {
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaSpec {
    pub version: String,
    pub effective_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tenants {
    pub mode: String,
}

/// Forward platform logs from the spoke to the hub LokiStack
pub fn managed_forwarder_spec(params: &ForwarderParams) -> ForwarderSpec {
    let secret_key = |key: &str| SecretKeyRef {
        key: key.to_string(),
        secret_name: params.tls_secret_name.clone(),
    };

    ForwarderSpec {
        service_account: NameRef {
            name: params.service_account.clone(),
        },
        outputs: vec![ForwarderOutput {
            name: HUB_OUTPUT_NAME.to_string(),
            type_: "loki".to_string(),
            loki: LokiOutput {
                url: params.hub_endpoint.clone(),
            },
            tls: OutputTls {
                ca: secret_key("ca.crt"),
                certificate: secret_key("tls.crt"),
                key: secret_key("tls.key"),
            },
        }],
        pipelines: vec![Pipeline {
            name: "default-pipeline".to_string(),
            input_refs: vec!["application".to_string(), "infrastructure".to_string()],
            output_refs: vec![HUB_OUTPUT_NAME.to_string()],
        }],
    }
}

pub fn managed_lokistack_spec(params: &LokiStackParams) -> LokiStackSpec {
    LokiStackSpec {
        size: params.size.clone(),
        storage: LokiStorage {
            secret: StorageSecret {
                name: params.storage_secret_name.clone(),
                type_: params.storage_secret_type.clone(),
            },
            schemas: vec![SchemaSpec {
                version: "v13".to_string(),
                effective_date: params.schema_effective_date.clone(),
            }],
        },
        storage_class_name: params.storage_class_name.clone(),
        tenants: Tenants {
            mode: "openshift-logging".to_string(),
        },
    }
}
