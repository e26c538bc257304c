use anyhow::Context;
use kube::api::{
    Api, DeleteParams, DynamicObject, ListParams, ObjectList, PatchParams, PostParams,
};
use kube::discovery::ApiResource;
use kube::{Client, ResourceExt};

use crate::cli::{DeploymentConfigCommand, Target};
use crate::kubernetes::{age_of, deployment_config_resource, dynamic_api};
use crate::{manifest, patch};

/// OpenShift DeploymentConfigs, addressed through the dynamic API.
pub struct DeploymentConfigs {
    client: Client,
    resource: ApiResource,
}

impl DeploymentConfigs {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            resource: deployment_config_resource(),
        }
    }

    fn api(&self, namespace: &str) -> Api<DynamicObject> {
        dynamic_api(self.client.clone(), &self.resource, Some(namespace))
    }

    pub async fn create(
        &self,
        name: &str,
        namespace: &str,
        image: &str,
        replicas: i32,
    ) -> anyhow::Result<()> {
        println!(
            "Creating new DeploymentConfig `{}` in namespace `{}`",
            name, namespace
        );
        let dc =
            manifest::deployment_config(&self.resource, name, image, replicas).within(namespace);
        let created = self
            .api(namespace)
            .create(&PostParams::default(), &dc)
            .await
            .context("error creating DeploymentConfig")?;
        println!(
            "Successfully created deploymentconfig `{}` in namespace `{}`",
            created.name_any(),
            namespace
        );
        Ok(())
    }

    pub async fn list(&self, namespace: &str) -> anyhow::Result<ObjectList<DynamicObject>> {
        println!("Listing DeploymentConfigs in namespace `{}`", namespace);
        self.api(namespace)
            .list(&ListParams::default())
            .await
            .context("error listing DeploymentConfigs")
    }

    pub async fn set_image(&self, name: &str, namespace: &str, image: &str) -> anyhow::Result<()> {
        println!(
            "Updating DeploymentConfig `{}` in namespace `{}`",
            name, namespace
        );
        let patch = patch::to_json_patch(&patch::replace_image(image))?;
        self.api(namespace)
            .patch(name, &PatchParams::default(), &patch)
            .await
            .context("error updating DeploymentConfig image")?;
        println!("Successfully updated image for deploymentconfig {}", name);
        Ok(())
    }

    pub async fn scale(&self, name: &str, namespace: &str, replicas: u32) -> anyhow::Result<()> {
        println!(
            "Scaling DeploymentConfig `{}` in namespace `{}`",
            name, namespace
        );
        let patch = patch::to_json_patch(&patch::replace_replicas(replicas))?;
        self.api(namespace)
            .patch(name, &PatchParams::default(), &patch)
            .await
            .context("error scaling DeploymentConfig")?;
        println!("Successfully scaled deploymentconfig to {} replicas", replicas);
        Ok(())
    }

    pub async fn delete(&self, name: &str, namespace: &str) -> anyhow::Result<()> {
        println!(
            "Deleting DeploymentConfig `{}` in namespace `{}`",
            name, namespace
        );
        self.api(namespace)
            .delete(name, &DeleteParams::default())
            .await
            .context("error deleting DeploymentConfig")?;
        println!("Successfully deleted deploymentconfig {}", name);
        Ok(())
    }
}

pub async fn run(client: Client, command: DeploymentConfigCommand) -> anyhow::Result<()> {
    let dcs = DeploymentConfigs::new(client);
    match command {
        DeploymentConfigCommand::Create {
            target,
            image,
            replicas,
        } => {
            dcs.create(&target.name, &target.namespace, &image, replicas)
                .await
        }
        DeploymentConfigCommand::List { namespace } => {
            let list = dcs.list(&namespace).await?;
            print_names(&list);
            Ok(())
        }
        DeploymentConfigCommand::SetImage { target, image } => {
            dcs.set_image(&target.name, &target.namespace, &image).await
        }
        DeploymentConfigCommand::Scale { target, replicas } => {
            dcs.scale(&target.name, &target.namespace, replicas).await
        }
        DeploymentConfigCommand::Delete { target } => {
            dcs.delete(&target.name, &target.namespace).await
        }
        DeploymentConfigCommand::Demo {
            target,
            image,
            new_image,
            replicas,
        } => {
            let Target { name, namespace } = &target;
            dcs.create(name, namespace, &image, replicas).await?;
            let list = dcs.list(namespace).await?;
            print_names(&list);
            dcs.set_image(name, namespace, &new_image).await?;
            dcs.scale(name, namespace, replicas.max(0) as u32).await?;
            dcs.delete(name, namespace).await
        }
    }
}

fn print_names(list: &ObjectList<DynamicObject>) {
    let now = chrono::Utc::now();
    for dc in &list.items {
        println!("{}\t{}", dc.name_any(), age_of(dc, now));
    }
}
