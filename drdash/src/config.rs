//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

use crate::{
    client::REQUEST_TIMEOUT,
    target::{RegistryError, Role, Target, TargetRegistry},
};

const MIN_INTERVAL_MS: u64 = 100;

/// Terminal dashboard for a Ramen DR hub and its two managed clusters.
#[derive(Debug, Parser)]
#[command(name = "drdash", version, about)]
pub struct Args {
    /// Path to the hub kubeconfig
    #[arg(long, env = "DRDASH_HUB")]
    pub hub: String,

    /// Path to the first DR cluster kubeconfig
    #[arg(long, env = "DRDASH_DR1")]
    pub dr1: String,

    /// Path to the second DR cluster kubeconfig
    #[arg(long, env = "DRDASH_DR2")]
    pub dr2: String,

    /// How often to poll all clusters, in milliseconds
    #[arg(long, env = "DRDASH_INTERVAL_MS", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Upper bound for connecting and for each remote call, in milliseconds
    #[arg(
        long,
        env = "DRDASH_REQUEST_TIMEOUT_MS",
        default_value_t = REQUEST_TIMEOUT.as_millis() as u64
    )]
    pub request_timeout_ms: u64,

    /// Directory for drdash.log (defaults to the system temp dir)
    #[arg(long, env = "DRDASH_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Log filter, e.g. `info` or `drdash=debug`
    #[arg(long, env = "DRDASH_LOG", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Hub first, then DR1 and DR2.
    pub fn registry(&self) -> Result<TargetRegistry, RegistryError> {
        TargetRegistry::new(vec![
            Target::new("Hub", Role::Primary, &self.hub),
            Target::new("DR1", Role::Secondary, &self.dr1),
            Target::new("DR2", Role::Secondary, &self.dr2),
        ])
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_INTERVAL_MS))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}
