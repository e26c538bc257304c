use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, ContainerPort, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use kube::api::DynamicObject;
use kube::discovery::ApiResource;
use serde_json::json;
use std::collections::BTreeMap;

fn app_labels(name: &str) -> BTreeMap<String, String> {
    BTreeMap::from([("app".to_string(), name.to_string())])
}

/// Deployment running one `web` container that serves HTTP on port 80.
pub fn deployment(name: &str, image: &str, replicas: i32) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(replicas),
            selector: LabelSelector {
                match_labels: Some(app_labels(name)),
                match_expressions: None,
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(app_labels(name)),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: "web".to_string(),
                        image: Some(image.to_string()),
                        ports: Some(vec![ContainerPort {
                            name: Some("http".to_string()),
                            protocol: Some("TCP".to_string()),
                            container_port: 80,
                            ..Default::default()
                        }]),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// DeploymentConfig whose single container is named after the resource and
/// which redeploys on every config change.
pub fn deployment_config(
    resource: &ApiResource,
    name: &str,
    image: &str,
    replicas: i32,
) -> DynamicObject {
    DynamicObject::new(name, resource).data(json!({
        "spec": {
            "replicas": replicas,
            "selector": app_labels(name),
            "template": {
                "metadata": { "labels": app_labels(name) },
                "spec": {
                    "containers": [{
                        "name": name,
                        "image": image,
                        "ports": [{ "containerPort": 8080, "protocol": "TCP" }],
                    }],
                },
            },
            "triggers": [{ "type": "ConfigChange" }],
        }
    }))
}
