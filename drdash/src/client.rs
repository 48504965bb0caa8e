//! Remote cluster access.
//!
//! [`ClientFactory`] turns a kubeconfig path into a [`ClusterClient`]; the
//! poller only ever talks to these two traits so tests can script clusters.

use std::{future::Future, time::Duration};

use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Namespace, Node};
use kube::{
    api::{DynamicObject, GroupVersionKind, ListParams, ResourceExt},
    config::{KubeConfigOptions, Kubeconfig},
    Api, Client, Config,
};
use tokio::time::timeout;

use crate::error::{ConnectionError, RemoteCallError};

/// Default bound for connecting and for each remote call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2);

/// A custom resource type addressed by group, version and kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CustomResourceKind {
    pub group: &'static str,
    pub version: &'static str,
    pub kind: &'static str,
}

/// Ramen's DRPlacementControl, listed on the hub.
pub const DRPC: CustomResourceKind = CustomResourceKind {
    group: "ramendr.openshift.io",
    version: "v1alpha1",
    kind: "DRPlacementControl",
};

/// Read-only queries the poller issues against one cluster.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn list_nodes(&self) -> Result<Vec<String>, RemoteCallError>;

    async fn list_namespaces(&self) -> Result<Vec<String>, RemoteCallError>;

    async fn list_custom_resources(
        &self,
        kind: &CustomResourceKind,
    ) -> Result<Vec<String>, RemoteCallError>;
}

/// Builds a connected client from a descriptor. No caching, no retries.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    async fn connect(&self, descriptor: &str) -> Result<Box<dyn ClusterClient>, ConnectionError>;
}

/// Factory backed by kubeconfig files.
#[derive(Clone, Debug)]
pub struct KubeClientFactory {
    request_timeout: Duration,
}

impl KubeClientFactory {
    pub fn new(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

#[async_trait]
impl ClientFactory for KubeClientFactory {
    #[tracing::instrument(skip(self))]
    async fn connect(&self, descriptor: &str) -> Result<Box<dyn ClusterClient>, ConnectionError> {
        if descriptor.trim().is_empty() {
            return Err(ConnectionError::MissingDescriptor);
        }
        let path = descriptor.to_string();

        let kubeconfig =
            Kubeconfig::read_from(descriptor).map_err(|source| ConnectionError::Kubeconfig {
                path: path.clone(),
                source,
            })?;

        // exec auth plugins run while the config is built
        let config = timeout(
            self.request_timeout,
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default()),
        )
        .await
        .map_err(|_| ConnectionError::Timeout {
            path: path.clone(),
            timeout: self.request_timeout,
        })?
        .map_err(|source| ConnectionError::Kubeconfig {
            path: path.clone(),
            source,
        })?;

        let client =
            Client::try_from(config).map_err(|source| ConnectionError::Client { path, source })?;

        Ok(Box::new(KubeClusterClient::new(client, self.request_timeout)))
    }
}

pub struct KubeClusterClient {
    client: Client,
    request_timeout: Duration,
}

impl KubeClusterClient {
    pub fn new(client: Client, request_timeout: Duration) -> Self {
        Self {
            client,
            request_timeout,
        }
    }

    async fn bounded<T, F>(&self, call: &'static str, fut: F) -> Result<T, RemoteCallError>
    where
        F: Future<Output = Result<T, kube::Error>> + Send,
    {
        match timeout(self.request_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(source)) => Err(RemoteCallError::Api { call, source }),
            Err(_) => Err(RemoteCallError::Timeout {
                call,
                timeout: self.request_timeout,
            }),
        }
    }
}

#[async_trait]
impl ClusterClient for KubeClusterClient {
    async fn list_nodes(&self) -> Result<Vec<String>, RemoteCallError> {
        let api: Api<Node> = Api::all(self.client.clone());
        let list = self
            .bounded("list nodes", api.list(&ListParams::default()))
            .await?;
        Ok(list.items.iter().map(|n| n.name_any()).collect())
    }

    async fn list_namespaces(&self) -> Result<Vec<String>, RemoteCallError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = self
            .bounded("list namespaces", api.list(&ListParams::default()))
            .await?;
        Ok(list.items.iter().map(|ns| ns.name_any()).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn list_custom_resources(
        &self,
        kind: &CustomResourceKind,
    ) -> Result<Vec<String>, RemoteCallError> {
        let gvk = GroupVersionKind::gvk(kind.group, kind.version, kind.kind);
        let client = self.client.clone();
        let fetch = async move {
            let (ar, _caps) = kube::discovery::pinned_kind(&client, &gvk).await?;
            let api: Api<DynamicObject> = Api::all_with(client, &ar);
            api.list(&ListParams::default()).await
        };
        let list = self.bounded("list custom resources", fetch).await?;
        Ok(list.items.iter().map(|obj| obj.name_any()).collect())
    }
}
