use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::probe::{ProbeRegistry, ProbeRule, ProbeSpec};
use crate::types::{FeedbackEntry, FeedbackField, FeedbackValue, ResourceIdentifier};

/// Why a feedback batch was judged unhealthy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HealthError {
    #[error("no fields found in health checker")]
    NoFieldsReported,

    #[error("probe has key that doesn't match the key defined: {resource} unknown probe key {key}")]
    UnknownProbeKey {
        resource: ResourceIdentifier,
        key: String,
    },

    #[error("probe value is nil: {resource} with key {key}")]
    ProbeValueNil {
        resource: ResourceIdentifier,
        key: String,
    },

    #[error("probe condition is not satisfied: {resource} reported {key}={observed}")]
    ConditionNotSatisfied {
        resource: ResourceIdentifier,
        key: String,
        observed: FeedbackValue,
    },

    #[error("undefined health check for resource: {resource}")]
    UnknownResource { resource: ResourceIdentifier },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnhealthyReason {
    NoFieldsReported,
    UnknownProbeKey,
    ProbeValueNil,
    ConditionNotSatisfied,
    UnknownResource,
}

impl UnhealthyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnhealthyReason::NoFieldsReported => "no-fields-reported",
            UnhealthyReason::UnknownProbeKey => "unknown-probe-key",
            UnhealthyReason::ProbeValueNil => "probe-value-nil",
            UnhealthyReason::ConditionNotSatisfied => "condition-not-satisfied",
            UnhealthyReason::UnknownResource => "unknown-resource",
        }
    }
}

impl HealthError {
    pub fn reason(&self) -> UnhealthyReason {
        match self {
            HealthError::NoFieldsReported => UnhealthyReason::NoFieldsReported,
            HealthError::UnknownProbeKey { .. } => UnhealthyReason::UnknownProbeKey,
            HealthError::ProbeValueNil { .. } => UnhealthyReason::ProbeValueNil,
            HealthError::ConditionNotSatisfied { .. } => UnhealthyReason::ConditionNotSatisfied,
            HealthError::UnknownResource { .. } => UnhealthyReason::UnknownResource,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvaluationVerdict {
    Healthy,
    Unhealthy(HealthError),
}

impl EvaluationVerdict {
    pub fn is_healthy(&self) -> bool {
        matches!(self, EvaluationVerdict::Healthy)
    }

    pub fn reason(&self) -> Option<UnhealthyReason> {
        match self {
            EvaluationVerdict::Healthy => None,
            EvaluationVerdict::Unhealthy(err) => Some(err.reason()),
        }
    }

    pub fn message(&self) -> String {
        match self {
            EvaluationVerdict::Healthy => "all probed resources are healthy".to_string(),
            EvaluationVerdict::Unhealthy(err) => err.to_string(),
        }
    }
}

impl From<Result<(), HealthError>> for EvaluationVerdict {
    fn from(result: Result<(), HealthError>) -> Self {
        match result {
            Ok(()) => EvaluationVerdict::Healthy,
            Err(err) => EvaluationVerdict::Unhealthy(err),
        }
    }
}

/// Evaluate a batch of feedback fields against the registry
pub fn evaluate(fields: &[FeedbackField], registry: &ProbeRegistry) -> EvaluationVerdict {
    let verdict = EvaluationVerdict::from(check_fields(fields, registry));
    if let EvaluationVerdict::Unhealthy(err) = &verdict {
        warn!(reason = err.reason().as_str(), "health probe failed: {}", err);
    }
    verdict
}

/// Stops at the first failing field or value
pub fn check_fields(fields: &[FeedbackField], registry: &ProbeRegistry) -> Result<(), HealthError> {
    if fields.is_empty() {
        return Err(HealthError::NoFieldsReported);
    }

    for field in fields {
        if field.values.is_empty() {
            // The resource may not be deployed on the spoke yet
            debug!("no feedback values for {}, skipping", field.identifier);
            continue;
        }

        let spec = registry
            .lookup(&field.identifier.resource)
            .ok_or_else(|| HealthError::UnknownResource {
                resource: field.identifier.clone(),
            })?;

        for entry in &field.values {
            check_value(&field.identifier, spec, entry)?;
        }
    }

    Ok(())
}

fn check_value(
    identifier: &ResourceIdentifier,
    spec: &ProbeSpec,
    entry: &FeedbackEntry,
) -> Result<(), HealthError> {
    if entry.key != spec.key {
        return Err(HealthError::UnknownProbeKey {
            resource: identifier.clone(),
            key: entry.key.clone(),
        });
    }

    let nil = || HealthError::ProbeValueNil {
        resource: identifier.clone(),
        key: entry.key.clone(),
    };

    let satisfied = match &spec.rule {
        ProbeRule::StringEquals(expected) => entry.value.as_str().ok_or_else(nil)? == expected.as_str(),
        ProbeRule::IntegerAtLeast(min) => entry.value.as_integer().ok_or_else(nil)? >= *min,
    };

    if !satisfied {
        return Err(HealthError::ConditionNotSatisfied {
            resource: identifier.clone(),
            key: entry.key.clone(),
            observed: entry.value.clone(),
        });
    }
    Ok(())
}
