//! RFC 6902 JSON patches shared by the Deployment, DeploymentConfig and MachineSet commands.

use kube::api::Patch;
use serde::Serialize;

pub const IMAGE_PATH: &str = "/spec/template/spec/containers/0/image";
pub const REPLICAS_PATH: &str = "/spec/replicas";

/// A single `{op, path, value}` patch operation.
#[derive(Debug, Clone, Serialize)]
pub struct PatchOperation<T> {
    pub op: &'static str,
    pub path: &'static str,
    pub value: T,
}

impl<T> PatchOperation<T> {
    pub fn replace(path: &'static str, value: T) -> Self {
        Self {
            op: "replace",
            path,
            value,
        }
    }
}

/// Replace the image of the first container in the pod template.
pub fn replace_image(image: &str) -> Vec<PatchOperation<String>> {
    vec![PatchOperation::replace(IMAGE_PATH, image.to_string())]
}

pub fn replace_replicas(replicas: u32) -> Vec<PatchOperation<u32>> {
    vec![PatchOperation::replace(REPLICAS_PATH, replicas)]
}

/// Convert operations into a JSON patch request body.
pub fn to_json_patch<T: Serialize>(ops: &[PatchOperation<T>]) -> anyhow::Result<Patch<()>> {
    let value = serde_json::to_value(ops)?;
    Ok(Patch::Json(serde_json::from_value(value)?))
}
