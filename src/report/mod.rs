use chrono::{DateTime, Utc};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{Condition, Time};
use serde::Serialize;

use crate::health::{EvaluationVerdict, UnhealthyReason};

const AVAILABLE_CONDITION: &str = "Available";

/// Readiness outcome for one managed cluster, handed to the readiness gate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub cluster: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<UnhealthyReason>,
    pub message: String,
    pub evaluated_at: DateTime<Utc>,
}

impl ReadinessReport {
    pub fn new(cluster: &str, verdict: &EvaluationVerdict) -> Self {
        Self::at(cluster, verdict, Utc::now())
    }

    pub fn at(cluster: &str, verdict: &EvaluationVerdict, evaluated_at: DateTime<Utc>) -> Self {
        Self {
            cluster: cluster.to_string(),
            healthy: verdict.is_healthy(),
            reason: verdict.reason(),
            message: verdict.message(),
            evaluated_at,
        }
    }

    /// Addon status condition mirroring this report
    pub fn available_condition(&self) -> Condition {
        let (status, reason) = if self.healthy {
            ("True", "ProbeAvailable")
        } else {
            ("False", "ProbeUnavailable")
        };

        Condition {
            type_: AVAILABLE_CONDITION.to_string(),
            status: status.to_string(),
            reason: reason.to_string(),
            message: self.message.clone(),
            last_transition_time: Time(self.evaluated_at),
            observed_generation: None,
        }
    }
}
