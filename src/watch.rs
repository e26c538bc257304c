//! Pod watch that reports containers stuck in CrashLoopBackOff.
//!
//! The producer is any stream of pod watch events, which keeps the consumer
//! loop independent of the HTTP transport. The loop never reconnects: once the
//! API server closes the watch it returns.

use std::io::Write;
use std::pin::Pin;

use anyhow::Context;
use futures::{Stream, StreamExt, TryStreamExt};
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, WatchEvent, WatchParams};
use kube::{Client, ResourceExt};
use tracing::{debug, info, trace};

use crate::types::CrashLoopMatch;

pub const CRASH_LOOP_BACK_OFF: &str = "CrashLoopBackOff";

pub type PodEventStream = Pin<Box<dyn Stream<Item = Result<WatchEvent<Pod>, kube::Error>> + Send>>;

/// Open a raw watch on pods, across all namespaces unless one is given.
pub async fn open_pod_watch(
    client: Client,
    namespace: Option<&str>,
) -> anyhow::Result<PodEventStream> {
    let api: Api<Pod> = match namespace {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::all(client),
    };
    let stream = api
        .watch(&WatchParams::default(), "0")
        .await
        .context("error creating pod watcher")?;
    Ok(stream.boxed())
}

/// Containers of `pod` whose waiting reason is exactly CrashLoopBackOff.
pub fn crashloop_matches(pod: &Pod) -> Vec<CrashLoopMatch> {
    let Some(status) = pod.status.as_ref() else {
        return Vec::new();
    };
    let phase = status.phase.clone().unwrap_or_default();

    status
        .container_statuses
        .iter()
        .flatten()
        .filter(|cs| {
            cs.state
                .as_ref()
                .and_then(|s| s.waiting.as_ref())
                .and_then(|w| w.reason.as_deref())
                == Some(CRASH_LOOP_BACK_OFF)
        })
        .map(|cs| CrashLoopMatch {
            pod_name: pod.name_any(),
            namespace: pod.namespace().unwrap_or_default(),
            phase: phase.clone(),
            container_name: cs.name.clone(),
        })
        .collect()
}

/// Consume `events` until the producer closes the stream, writing one line per
/// crash-looping container. Returns how many lines were written.
pub async fn report_crashloops<S, W>(mut events: S, out: &mut W) -> anyhow::Result<usize>
where
    S: Stream<Item = Result<WatchEvent<Pod>, kube::Error>> + Unpin,
    W: Write,
{
    let mut reported = 0;
    while let Some(event) = events.try_next().await? {
        let pod = match event {
            WatchEvent::Added(pod) | WatchEvent::Modified(pod) | WatchEvent::Deleted(pod) => pod,
            WatchEvent::Bookmark(_) => {
                trace!("Skipping bookmark event");
                continue;
            }
            WatchEvent::Error(err) => {
                debug!("Watch error notification: {:?}", err);
                continue;
            }
        };

        for found in crashloop_matches(&pod) {
            writeln!(out, "{}", found)?;
            reported += 1;
        }
    }
    info!("Pod watch closed by the API server");
    Ok(reported)
}

pub async fn watch_crashloops(client: Client, namespace: Option<&str>) -> anyhow::Result<()> {
    println!("Watch Kubernetes Pods in {} state", CRASH_LOOP_BACK_OFF);
    let events = open_pod_watch(client, namespace).await?;
    let mut stdout = std::io::stdout();
    let reported = report_crashloops(events, &mut stdout).await?;
    debug!("Reported {} crash-looping containers", reported);
    Ok(())
}
