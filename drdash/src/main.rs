use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::EventStream;
use tracing::{error, info};

use drdash::{
    client::{ClientFactory, KubeClientFactory},
    config::Args,
    dashboard::{DashboardState, Event},
    log::setup_logger,
    runtime::{run, CommandRunner},
    ui::terminal::{install_panic_hook, TerminalSession},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    setup_logger(&args.log_dir(), &args.log_level)?;

    let registry = Arc::new(args.registry().context("invalid cluster configuration")?);
    let factory: Arc<dyn ClientFactory> =
        Arc::new(KubeClientFactory::new(args.request_timeout()));
    info!(
        clusters = registry.len(),
        interval_ms = args.interval().as_millis() as u64,
        "starting dashboard"
    );

    install_panic_hook();
    let mut session = TerminalSession::enter()?;

    // dropping the session restores the terminal
    let mut state = DashboardState::new(registry.clone());
    let size = session
        .terminal_mut()
        .size()
        .context("failed to read terminal size")?;
    state.update(Event::Resized {
        width: size.width,
        height: size.height,
    });

    let (runner, events) = CommandRunner::new(registry, factory, args.interval());
    let result = run(
        session.terminal_mut(),
        state,
        &runner,
        events,
        EventStream::new(),
    )
    .await;

    let restored = session.restore();
    if let Err(err) = &result {
        error!(error = %err, "dashboard exited with error");
    }
    result?;
    restored?;

    info!("dashboard stopped");
    Ok(())
}
