use anyhow::{Context, Result};
use serde::Deserialize;

use crate::types::{FeedbackEntry, FeedbackField, FeedbackValue, ResourceIdentifier};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkStatus {
    #[serde(default)]
    pub resource_status: Option<ResourceStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResourceStatus {
    #[serde(default)]
    pub manifests: Vec<ManifestCondition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestCondition {
    pub resource_meta: ResourceIdentifier,
    #[serde(default)]
    pub status_feedback: Option<StatusFeedback>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StatusFeedback {
    #[serde(default)]
    pub values: Vec<FeedbackWireValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackWireValue {
    pub name: String,
    #[serde(default)]
    pub field_value: Option<FieldValue>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FieldValue {
    #[serde(rename = "type", default)]
    pub type_: String,
    pub string: Option<String>,
    pub integer: Option<i64>,
}

impl From<Option<FieldValue>> for FeedbackValue {
    fn from(value: Option<FieldValue>) -> Self {
        match value {
            Some(FieldValue { type_, string: Some(s), .. }) if type_ == "String" => FeedbackValue::String(s),
            Some(FieldValue { type_, integer: Some(i), .. }) if type_ == "Integer" => FeedbackValue::Integer(i),
            _ => FeedbackValue::Absent,
        }
    }
}

/// Decode the feedback fields out of a ManifestWork `status` object
pub fn parse_work_status(status: &serde_json::Value) -> Result<Vec<FeedbackField>> {
    if status.is_null() {
        return Ok(Vec::new());
    }
    let status = WorkStatus::deserialize(status).context("decode ManifestWork status")?;
    Ok(fields_from_status(status))
}

pub fn fields_from_status(status: WorkStatus) -> Vec<FeedbackField> {
    let manifests = status.resource_status.map(|rs| rs.manifests).unwrap_or_default();

    manifests
        .into_iter()
        .filter_map(|manifest| {
            // Only probed resources carry a feedback block
            let feedback = manifest.status_feedback?;
            let values = feedback
                .values
                .into_iter()
                .map(|v| FeedbackEntry {
                    key: v.name,
                    value: FeedbackValue::from(v.field_value),
                })
                .collect();
            Some(FeedbackField {
                identifier: manifest.resource_meta,
                values,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_work_status() {
        let status = json!({
            "conditions": [{"type": "Applied", "status": "True"}],
            "resourceStatus": {
                "manifests": [
                    {
                        "resourceMeta": {
                            "group": "observability.openshift.io",
                            "version": "v1",
                            "kind": "ClusterLogForwarder",
                            "resource": "clusterlogforwarders",
                            "name": "mcoa-instance",
                            "namespace": "openshift-logging",
                            "ordinal": 3
                        },
                        "statusFeedback": {
                            "values": [
                                {"name": "status", "fieldValue": {"type": "String", "string": "True"}}
                            ]
                        }
                    },
                    {
                        "resourceMeta": {
                            "group": "opentelemetry.io",
                            "resource": "opentelemetrycollectors",
                            "name": "mcoa-instance",
                            "namespace": "mcoa-opentelemetry"
                        },
                        "statusFeedback": {
                            "values": [
                                {"name": "replicas", "fieldValue": {"type": "Integer", "integer": 2}}
                            ]
                        }
                    },
                    {
                        "resourceMeta": {
                            "group": "",
                            "resource": "namespaces",
                            "name": "openshift-logging"
                        }
                    }
                ]
            }
        });

        let fields = parse_work_status(&status).unwrap();
        assert_eq!(fields.len(), 2);

        assert_eq!(fields[0].identifier.resource, "clusterlogforwarders");
        assert_eq!(fields[0].identifier.namespace, "openshift-logging");
        assert_eq!(fields[0].values[0].key, "status");
        assert_eq!(fields[0].values[0].value, FeedbackValue::String("True".to_string()));

        assert_eq!(fields[1].identifier.group, "opentelemetry.io");
        assert_eq!(fields[1].values[0].value, FeedbackValue::Integer(2));
    }

    #[test]
    fn test_value_type_mapping() {
        let decode = |v: serde_json::Value| FeedbackValue::from(serde_json::from_value::<Option<FieldValue>>(v).unwrap());

        assert_eq!(decode(json!({"type": "String", "string": "False"})), FeedbackValue::String("False".into()));
        assert_eq!(decode(json!({"type": "Integer", "integer": 0})), FeedbackValue::Integer(0));
        assert_eq!(decode(json!({"type": "String"})), FeedbackValue::Absent);
        assert_eq!(decode(json!({"type": "Boolean", "boolean": true})), FeedbackValue::Absent);
        assert_eq!(decode(json!({"type": "JsonRaw", "jsonRaw": "{}"})), FeedbackValue::Absent);
        assert_eq!(decode(json!(null)), FeedbackValue::Absent);
    }

    #[test]
    fn test_feedback_without_values() {
        let status = json!({
            "resourceStatus": {
                "manifests": [{
                    "resourceMeta": {"resource": "clusterlogforwarders", "name": "mcoa-instance"},
                    "statusFeedback": {}
                }]
            }
        });
        let fields = parse_work_status(&status).unwrap();
        assert_eq!(fields.len(), 1);
        assert!(fields[0].values.is_empty());
        assert_eq!(fields[0].identifier.group, "");
    }

    #[test]
    fn test_missing_resource_status() {
        assert!(parse_work_status(&json!({})).unwrap().is_empty());
        assert!(parse_work_status(&serde_json::Value::Null).unwrap().is_empty());
        assert!(parse_work_status(&json!({"resourceStatus": null})).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_status() {
        let status = json!({"resourceStatus": {"manifests": [{"statusFeedback": {}}]}});
        let err = parse_work_status(&status).unwrap_err();
        assert!(err.to_string().contains("ManifestWork status"));
    }
}
