//! Scripted clusters for tests.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    client::{ClientFactory, ClusterClient, CustomResourceKind},
    error::{ConnectionError, RemoteCallError},
    target::{Role, Target, TargetRegistry},
};

const FAKE_TIMEOUT: Duration = Duration::from_secs(2);

/// What one fake cluster answers. `None` means the call times out.
#[derive(Clone, Debug)]
pub struct Script {
    pub connects: bool,
    pub nodes: Option<Vec<String>>,
    pub namespaces: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,
    pub delay: Duration,
    pub panics: bool,
}

impl Script {
    pub fn healthy() -> Self {
        Self {
            connects: true,
            nodes: Some(vec!["node-1".into()]),
            namespaces: Some(Vec::new()),
            resources: Some(Vec::new()),
            delay: Duration::ZERO,
            panics: false,
        }
    }

    pub fn unreachable() -> Self {
        Self {
            connects: false,
            ..Self::healthy()
        }
    }

    pub fn namespaces(mut self, names: &[&str]) -> Self {
        self.namespaces = Some(strings(names));
        self
    }

    pub fn resources(mut self, names: &[&str]) -> Self {
        self.resources = Some(strings(names));
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn answer(call: &'static str, reply: &Option<Vec<String>>) -> Result<Vec<String>, RemoteCallError> {
    reply.clone().ok_or(RemoteCallError::Timeout {
        call,
        timeout: FAKE_TIMEOUT,
    })
}

/// Factory keyed by descriptor.
#[derive(Clone, Default)]
pub struct FakeFactory {
    scripts: HashMap<String, Script>,
}

impl FakeFactory {
    pub fn with(mut self, descriptor: &str, script: Script) -> Self {
        self.scripts.insert(descriptor.to_string(), script);
        self
    }
}

struct FakeCluster {
    script: Script,
}

#[async_trait]
impl ClientFactory for FakeFactory {
    async fn connect(&self, descriptor: &str) -> Result<Box<dyn ClusterClient>, ConnectionError> {
        let script = match self.scripts.get(descriptor) {
            Some(script) if script.connects => script.clone(),
            _ => {
                return Err(ConnectionError::Timeout {
                    path: descriptor.to_string(),
                    timeout: FAKE_TIMEOUT,
                })
            }
        };
        if script.panics {
            panic!("scripted panic for {descriptor}");
        }
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        Ok(Box::new(FakeCluster { script }))
    }
}

#[async_trait]
impl ClusterClient for FakeCluster {
    async fn list_nodes(&self) -> Result<Vec<String>, RemoteCallError> {
        answer("list nodes", &self.script.nodes)
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, RemoteCallError> {
        answer("list namespaces", &self.script.namespaces)
    }

    async fn list_custom_resources(
        &self,
        _kind: &CustomResourceKind,
    ) -> Result<Vec<String>, RemoteCallError> {
        answer("list custom resources", &self.script.resources)
    }
}

/// Hub plus two DR clusters, descriptors `hub`, `dr1`, `dr2`.
pub fn registry() -> Arc<TargetRegistry> {
    Arc::new(
        TargetRegistry::new(vec![
            Target::new("Hub", Role::Primary, "hub"),
            Target::new("DR1", Role::Secondary, "dr1"),
            Target::new("DR2", Role::Secondary, "dr2"),
        ])
        .expect("valid registry"),
    )
}
