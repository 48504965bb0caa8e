//! Error taxonomy for talking to remote clusters.
//!
//! Neither error is fatal: the poller folds both into the target's
//! [`TargetStatus`](crate::status::TargetStatus) so they end up on screen.

use std::time::Duration;

use kube::config::KubeconfigError;
use thiserror::Error;

/// Building a client for a connection descriptor failed.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("no kubeconfig path given")]
    MissingDescriptor,

    #[error("failed to load kubeconfig {path}: {source}")]
    Kubeconfig {
        path: String,
        #[source]
        source: KubeconfigError,
    },

    #[error("failed to build client from {path}: {source}")]
    Client {
        path: String,
        #[source]
        source: kube::Error,
    },

    #[error("loading {path} timed out after {timeout:?}")]
    Timeout { path: String, timeout: Duration },
}

/// A single query failed after the client was built.
#[derive(Debug, Error)]
pub enum RemoteCallError {
    #[error("{call} failed: {source}")]
    Api {
        call: &'static str,
        #[source]
        source: kube::Error,
    },

    #[error("{call} timed out after {timeout:?}")]
    Timeout {
        call: &'static str,
        timeout: Duration,
    },
}

impl RemoteCallError {
    pub fn call(&self) -> &'static str {
        match self {
            RemoteCallError::Api { call, .. } | RemoteCallError::Timeout { call, .. } => call,
        }
    }
}
