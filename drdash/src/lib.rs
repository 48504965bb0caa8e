//! Terminal dashboard for a Ramen DR setup: one hub cluster and two managed
//! DR clusters, polled on a fixed interval and shown side by side.

pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod log;
pub mod poller;
pub mod runtime;
pub mod status;
pub mod target;
pub mod ui;

#[cfg(test)]
mod testing;
