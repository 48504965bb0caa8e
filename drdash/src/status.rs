//! Per-target poll results.

use std::fmt;

use chrono::{DateTime, Local};

use crate::target::TargetId;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Health {
    #[default]
    Unknown,
    Healthy,
    Error,
}

impl fmt::Display for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Health::Unknown => f.write_str("Unknown"),
            Health::Healthy => f.write_str("Healthy"),
            Health::Error => f.write_str("Error"),
        }
    }
}

/// Everything one poll attempt learned about one target.
///
/// A status is only ever replaced as a whole, so every field comes from the
/// attempt tagged by `generation`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TargetStatus {
    pub health: Health,
    /// Allow-listed namespaces, in listing order.
    pub namespaces: Vec<String>,
    /// DRPC names, in listing order. Always empty for secondaries.
    pub resources: Vec<String>,
    /// Batch that produced this status; `None` until the first poll lands.
    pub generation: Option<u64>,
    pub polled_at: Option<DateTime<Local>>,
    pub error: Option<String>,
}

impl TargetStatus {
    /// Fresh, empty status for a poll attempt of `generation`.
    pub fn attempt(generation: u64) -> Self {
        Self {
            generation: Some(generation),
            ..Self::default()
        }
    }

    /// Marks the attempt as failed and stamps it.
    pub fn fail(mut self, reason: impl Into<String>) -> Self {
        self.health = Health::Error;
        self.error = Some(reason.into());
        self.finish()
    }

    pub fn finish(mut self) -> Self {
        self.polled_at = Some(Local::now());
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    Polled(TargetStatus),
    /// The poll task itself died before producing a status.
    Failed(String),
}

impl PollOutcome {
    /// Status to display for this outcome.
    pub fn into_status(self, generation: u64) -> TargetStatus {
        match self {
            PollOutcome::Polled(status) => status,
            PollOutcome::Failed(reason) => TargetStatus::attempt(generation).fail(reason),
        }
    }
}

/// One complete round over every target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchResult {
    pub generation: u64,
    pub entries: Vec<(TargetId, PollOutcome)>,
}
