use anyhow::{Context, Result};
use kube::api::{Api, ApiResource, DynamicObject, GroupVersionKind};
use kube::Client;
use tracing::debug;

use crate::feedback::parse_work_status;
use crate::types::FeedbackField;

fn manifest_work_resource() -> ApiResource {
    let gvk = GroupVersionKind::gvk("work.open-cluster-management.io", "v1", "ManifestWork");
    ApiResource::from_gvk(&gvk)
}

/// Fetch the addon ManifestWork from the hub and decode its status feedback
pub async fn fetch_work_feedback(
    client: &Client,
    namespace: &str,
    work_name: &str,
) -> Result<Vec<FeedbackField>> {
    let api: Api<DynamicObject> = Api::namespaced_with(client.clone(), namespace, &manifest_work_resource());
    let work = api
        .get(work_name)
        .await
        .with_context(|| format!("get ManifestWork {}/{}", namespace, work_name))?;

    let status = work.data.get("status").cloned().unwrap_or_default();
    let fields = parse_work_status(&status)?;
    debug!("decoded {} feedback fields from {}/{}", fields.len(), namespace, work_name);
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_work_resource() {
        let resource = manifest_work_resource();
        assert_eq!(resource.api_version, "work.open-cluster-management.io/v1");
        assert_eq!(resource.plural, "manifestworks");
    }
}
