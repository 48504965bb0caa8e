//! Polling a single target, and a whole batch of them.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::{
    client::{ClientFactory, DRPC},
    status::{BatchResult, Health, PollOutcome, TargetStatus},
    target::{Target, TargetRegistry},
};

/// Namespaces worth showing; everything else is dropped.
pub const RAMEN_NAMESPACES: [&str; 5] = [
    "ramen-system",
    "ramen-ops",
    "openshift-operators",
    "openshift-dr-system",
    "openshift-dr-ops",
];

pub fn filter_ramen_namespaces(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .filter(|name| RAMEN_NAMESPACES.contains(&name.as_str()))
        .collect()
}

/// Polls one target. Never fails: errors end up in the returned status.
///
/// Steps run in order (connect, nodes, namespaces, DRPCs on the primary) and
/// the first failure stops the attempt. Whatever earlier steps captured is
/// kept.
#[tracing::instrument(skip_all, fields(cluster = %target.name, generation = generation))]
pub async fn poll(target: &Target, factory: &dyn ClientFactory, generation: u64) -> TargetStatus {
    let mut status = TargetStatus::attempt(generation);

    let client = match factory.connect(&target.descriptor).await {
        Ok(client) => client,
        Err(err) => {
            warn!(error = %err, "connection failed");
            return status.fail(err.to_string());
        }
    };

    match client.list_nodes().await {
        Ok(nodes) => debug!(nodes = nodes.len(), "health probe ok"),
        Err(err) => {
            warn!(error = %err, call = err.call(), "health probe failed");
            return status.fail(err.to_string());
        }
    }
    status.health = Health::Healthy;

    match client.list_namespaces().await {
        Ok(names) => status.namespaces = filter_ramen_namespaces(names),
        Err(err) => {
            warn!(error = %err, call = err.call(), "namespace listing failed");
            return status.fail(err.to_string());
        }
    }

    if target.is_primary() {
        match client.list_custom_resources(&DRPC).await {
            Ok(names) => status.resources = names,
            Err(err) => {
                warn!(
                    error = %err,
                    call = err.call(),
                    kind = DRPC.kind,
                    "custom resource listing failed"
                );
                return status.fail(err.to_string());
            }
        }
    }

    status.finish()
}

/// Polls every target concurrently and returns once all of them are done.
#[tracing::instrument(skip_all, fields(generation = generation))]
pub async fn poll_all(
    registry: Arc<TargetRegistry>,
    factory: Arc<dyn ClientFactory>,
    generation: u64,
) -> BatchResult {
    let tasks = registry.iter().map(|(id, target)| {
        let target = target.clone();
        let factory = factory.clone();
        let handle =
            tokio::spawn(async move { poll(&target, factory.as_ref(), generation).await });
        async move { (id, handle.await) }
    });

    let entries = join_all(tasks)
        .await
        .into_iter()
        .map(|(id, joined)| {
            let outcome = match joined {
                Ok(status) => PollOutcome::Polled(status),
                Err(err) => {
                    warn!(cluster = id.0, error = %err, "poll task died");
                    PollOutcome::Failed(format!("poll task died: {err}"))
                }
            };
            (id, outcome)
        })
        .collect();

    BatchResult {
        generation,
        entries,
    }
}
