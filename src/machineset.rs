use anyhow::Context;
use kube::api::{ListParams, PatchParams};
use kube::{Client, ResourceExt};
use tracing::debug;

use crate::cli::MachineSetCommand;
use crate::kubernetes::{dynamic_api, is_not_found, machineset_resource};
use crate::patch;

/// Patch the replica count of every MachineSet in the cluster.
///
/// A cluster without the MachineSet API is treated as having none.
pub async fn scale_all(client: Client, replicas: u32) -> anyhow::Result<usize> {
    let resource = machineset_resource();
    let list = match dynamic_api(client.clone(), &resource, None)
        .list(&ListParams::default())
        .await
    {
        Ok(list) => list,
        Err(e) if is_not_found(&e) => {
            debug!("MachineSet API returned not found: {}", e);
            println!("No MachineSets found");
            return Ok(0);
        }
        Err(e) => return Err(e).context("error listing MachineSets"),
    };

    let patch = patch::to_json_patch(&patch::replace_replicas(replicas))?;

    println!("There are {} MachineSets in the cluster", list.items.len());
    for ms in &list.items {
        let name = ms.name_any();
        let namespace = ms.namespace().unwrap_or_default();
        println!("{}", name);

        dynamic_api(client.clone(), &resource, Some(&namespace))
            .patch(&name, &PatchParams::default(), &patch)
            .await
            .with_context(|| format!("error updating scale for MachineSet {name}"))?;
        println!("Updated scale for MachineSet: {}", name);
    }
    Ok(list.items.len())
}

pub async fn run(client: Client, command: MachineSetCommand) -> anyhow::Result<()> {
    match command {
        MachineSetCommand::Scale { replicas } => {
            scale_all(client, replicas).await?;
            Ok(())
        }
    }
}
