use anyhow::Context;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::autoscaling::v1::ScaleSpec;
use kube::api::{DeleteParams, ListParams, ObjectList, PatchParams, PostParams};
use kube::{Api, Client, ResourceExt};
use tracing::debug;

use crate::cli::{DeploymentCommand, Target};
use crate::kubernetes::age_of;
use crate::types::ScalePlan;
use crate::{manifest, patch};

pub struct Deployments {
    client: Client,
}

impl Deployments {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn api(&self, namespace: &str) -> Api<Deployment> {
        Api::namespaced(self.client.clone(), namespace)
    }

    pub async fn create(
        &self,
        name: &str,
        namespace: &str,
        image: &str,
        replicas: i32,
    ) -> anyhow::Result<()> {
        let deployment = manifest::deployment(name, image, replicas);

        println!("Creating deployment...");
        let result = self
            .api(namespace)
            .create(&PostParams::default(), &deployment)
            .await
            .with_context(|| format!("error creating Deployment {name}"))?;
        println!("Created deployment {:?}.", result.name_any());
        Ok(())
    }

    pub async fn get(&self, name: &str, namespace: &str) -> anyhow::Result<Deployment> {
        println!("Get Deployment in namespace {}", namespace);
        match self.api(namespace).get(name).await {
            Ok(deployment) => Ok(deployment),
            Err(e) => {
                println!("Failed to get Deployment: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn list(&self, namespace: &str) -> anyhow::Result<ObjectList<Deployment>> {
        println!("List Deployments");
        self.api(namespace)
            .list(&ListParams::default())
            .await
            .context("error listing deployments")
    }

    pub async fn set_image(&self, name: &str, namespace: &str, image: &str) -> anyhow::Result<()> {
        println!(
            "Updating Deployment `{}` in namespace `{}`",
            name, namespace
        );
        let patch = patch::to_json_patch(&patch::replace_image(image))?;
        self.api(namespace)
            .patch(name, &PatchParams::default(), &patch)
            .await
            .context("error updating Deployment image")?;
        println!("Successfully updated image for Deployment {}", name);
        Ok(())
    }

    pub async fn scale(&self, name: &str, namespace: &str, replicas: i32) -> anyhow::Result<()> {
        let api = self.api(namespace);
        let mut scale = api
            .get_scale(name)
            .await
            .context("error getting scale object")?;
        let current = scale.spec.as_ref().and_then(|s| s.replicas).unwrap_or(0);

        match ScalePlan::new(current, replicas) {
            ScalePlan::Unchanged => {
                println!(
                    "Deployment {} replicas {}, no changes applied",
                    name, replicas
                );
                return Ok(());
            }
            ScalePlan::Down { from, to } => {
                println!("Scale down Deployment {} from {} to {} replicas", name, from, to);
            }
            ScalePlan::Up { from, to } => {
                println!("Scale Up Deployment {} from {} to {} replicas", name, from, to);
            }
        }

        scale.spec = Some(ScaleSpec {
            replicas: Some(replicas),
        });
        let body = serde_json::to_vec(&scale)?;
        let updated = api
            .replace_scale(name, &PostParams::default(), body)
            .await
            .context("error updating scale object")?;
        let applied = updated.spec.and_then(|s| s.replicas).unwrap_or(0);
        println!(
            "Successfully scaled deployment {} to {} replicas",
            name, applied
        );
        Ok(())
    }

    pub async fn delete(&self, name: &str, namespace: &str) -> anyhow::Result<()> {
        println!(
            "Deleting Deployment `{}` in namespace `{}`",
            name, namespace
        );
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .context("error deleting Deployment")?;
        println!("Successfully deleted Deployment {}", name);
        Ok(())
    }
}

pub async fn run(client: Client, command: DeploymentCommand) -> anyhow::Result<()> {
    let deployments = Deployments::new(client);
    match command {
        DeploymentCommand::Create {
            target,
            image,
            replicas,
        } => {
            deployments
                .create(&target.name, &target.namespace, &image, replicas)
                .await
        }
        DeploymentCommand::Get { target } => {
            let deployment = deployments.get(&target.name, &target.namespace).await?;
            print!("{}", serde_yaml::to_string(&deployment)?);
            Ok(())
        }
        DeploymentCommand::List { namespace } => {
            let list = deployments.list(&namespace).await?;
            print_names(&list);
            Ok(())
        }
        DeploymentCommand::SetImage { target, image } => {
            deployments
                .set_image(&target.name, &target.namespace, &image)
                .await
        }
        DeploymentCommand::Scale { target, replicas } => {
            deployments
                .scale(&target.name, &target.namespace, replicas)
                .await
        }
        DeploymentCommand::Delete { target } => {
            deployments.delete(&target.name, &target.namespace).await
        }
        DeploymentCommand::Demo {
            target,
            image,
            new_image,
            replicas,
        } => demo(&deployments, &target, &image, &new_image, replicas).await,
    }
}

/// Walk a Deployment through its whole lifecycle, stopping at the first failure.
async fn demo(
    deployments: &Deployments,
    target: &Target,
    image: &str,
    new_image: &str,
    replicas: i32,
) -> anyhow::Result<()> {
    let Target { name, namespace } = target;
    deployments.create(name, namespace, image, replicas).await?;

    let deployment = deployments.get(name, namespace).await?;
    debug!("Fetched {:?}", deployment.metadata);
    print!("{}", serde_yaml::to_string(&deployment)?);

    let list = deployments.list(namespace).await?;
    print_names(&list);

    deployments.set_image(name, namespace, new_image).await?;
    deployments.scale(name, namespace, replicas).await?;
    deployments.delete(name, namespace).await
}

fn print_names(list: &ObjectList<Deployment>) {
    let now = chrono::Utc::now();
    for d in &list.items {
        println!("{}\t{}", d.name_any(), age_of(d, now));
    }
}
