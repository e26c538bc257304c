use chrono::{DateTime, Utc};
use kube::api::{Api, DynamicObject};
use kube::core::GroupVersionKind;
use kube::discovery::ApiResource;
use kube::{Client, ResourceExt};

/// OpenShift `apps.openshift.io/v1` DeploymentConfig
pub fn deployment_config_resource() -> ApiResource {
    ApiResource::from_gvk(&GroupVersionKind::gvk(
        "apps.openshift.io",
        "v1",
        "DeploymentConfig",
    ))
}

/// OpenShift `machine.openshift.io/v1beta1` MachineSet
pub fn machineset_resource() -> ApiResource {
    ApiResource::from_gvk(&GroupVersionKind::gvk(
        "machine.openshift.io",
        "v1beta1",
        "MachineSet",
    ))
}

pub fn dynamic_api(
    client: Client,
    resource: &ApiResource,
    namespace: Option<&str>,
) -> Api<DynamicObject> {
    match namespace {
        Some(ns) => Api::namespaced_with(client, ns, resource),
        None => Api::all_with(client, resource),
    }
}

pub fn is_not_found(err: &kube::Error) -> bool {
    matches!(err, kube::Error::Api(resp) if resp.code == 404)
}

/// Age of a resource as shown by `kubectl get`, or "unknown" without a creation timestamp.
pub fn age_of<K: ResourceExt>(obj: &K, now: DateTime<Utc>) -> String {
    // Go through the RFC 3339 wire form so this does not depend on k8s-openapi's time type
    obj.creation_timestamp()
        .and_then(|t| serde_json::to_value(t).ok())
        .and_then(|v| v.as_str().and_then(|s| DateTime::parse_from_rfc3339(s).ok()))
        .map(|created| format_age(now.signed_duration_since(created.with_timezone(&Utc))))
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn format_age(duration: chrono::Duration) -> String {
    let total_secs = duration.num_seconds().max(0);
    if total_secs < 60 {
        format!("{}s", total_secs)
    } else if total_secs < 3600 {
        format!("{}m", total_secs / 60)
    } else if total_secs < 86400 {
        format!("{}h", total_secs / 3600)
    } else {
        format!("{}d", total_secs / 86400)
    }
}
