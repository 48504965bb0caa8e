//! The event loop and the background work it starts.
//!
//! The loop owns the [`DashboardState`]. Polls and ticks run as tokio tasks
//! and report back over an unbounded channel, so a slow cluster never holds
//! up key handling or redraws.

use std::{io, ops::ControlFlow, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use crossterm::event::Event as TermEvent;
use futures::{Stream, StreamExt};
use ratatui::{backend::Backend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::{
    client::ClientFactory,
    dashboard::{Command, DashboardState, Event},
    poller::poll_all,
    target::TargetRegistry,
    ui::{events::translate, DashboardView},
};

/// Carries out [`Command`]s on behalf of the state machine.
pub struct CommandRunner {
    registry: Arc<TargetRegistry>,
    factory: Arc<dyn ClientFactory>,
    tick_interval: Duration,
    events: UnboundedSender<Event>,
    shutdown: CancellationToken,
}

impl CommandRunner {
    /// Creates a runner and the receiving end of its event channel.
    pub fn new(
        registry: Arc<TargetRegistry>,
        factory: Arc<dyn ClientFactory>,
        tick_interval: Duration,
    ) -> (Self, UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        let runner = Self {
            registry,
            factory,
            tick_interval,
            events,
            shutdown: CancellationToken::new(),
        };
        (runner, rx)
    }

    pub fn execute(&self, command: Command) -> ControlFlow<()> {
        match command {
            Command::StartPollBatch { generation } => {
                self.spawn_poll(generation);
                ControlFlow::Continue(())
            }
            Command::ScheduleTick => {
                self.spawn_tick();
                ControlFlow::Continue(())
            }
            Command::Stop => {
                self.shutdown.cancel();
                ControlFlow::Break(())
            }
        }
    }

    fn spawn_poll(&self, generation: u64) {
        let registry = self.registry.clone();
        let factory = self.factory.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let batch = poll_all(registry, factory, generation).await;
            // the loop may be gone already; a late batch is simply dropped
            if events.send(Event::BatchArrived(batch)).is_err() {
                debug!(generation, "batch finished after shutdown");
            }
        });
    }

    fn spawn_tick(&self) {
        let interval = self.tick_interval;
        let events = self.events.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(interval) => {
                    if events.send(Event::TickElapsed).is_err() {
                        debug!("tick fired after shutdown");
                    }
                }
            }
        });
    }
}

/// Runs the dashboard until the state machine asks to stop.
///
/// Returns the final state. `input` is any stream of terminal events, which
/// keeps the loop drivable without a real terminal.
pub async fn run<B, S>(
    terminal: &mut Terminal<B>,
    mut state: DashboardState,
    runner: &CommandRunner,
    mut events: UnboundedReceiver<Event>,
    mut input: S,
) -> Result<DashboardState>
where
    B: Backend,
    S: Stream<Item = io::Result<TermEvent>> + Unpin,
{
    let mut commands = state.update(Event::Init);

    loop {
        for command in commands.drain(..) {
            if runner.execute(command).is_break() {
                return Ok(state);
            }
        }

        terminal
            .draw(|f| f.render_widget(DashboardView::new(&state), f.area()))
            .context("failed to render terminal frame")?;

        let event = tokio::select! {
            Some(event) = events.recv() => event,
            maybe_input = input.next() => match maybe_input {
                Some(Ok(ev)) => match translate(&ev) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(err)) => {
                    warn!(error = %err, "terminal input error");
                    continue;
                }
                None => anyhow::bail!("terminal input stream closed"),
            },
        };

        debug!(kind = ?event.kind(), "event");
        commands = state.update(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dashboard::Mode,
        status::Health,
        testing::{registry, FakeFactory, Script},
        ui::text::buffer_lines,
    };
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use futures::stream;
    use ratatui::backend::TestBackend;

    fn factory() -> Arc<dyn ClientFactory> {
        Arc::new(
            FakeFactory::default()
                .with(
                    "hub",
                    Script::healthy()
                        .namespaces(&["ramen-system", "default"])
                        .resources(&["drpc-a"]),
                )
                .with("dr1", Script::healthy())
                .with("dr2", Script::unreachable()),
        )
    }

    fn key(code: KeyCode) -> io::Result<TermEvent> {
        Ok(TermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE)))
    }

    /// Yields `events` after `delay`, then stays open.
    fn delayed(
        delay: Duration,
        events: Vec<io::Result<TermEvent>>,
    ) -> impl Stream<Item = io::Result<TermEvent>> + Unpin {
        Box::pin(
            stream::once(async move {
                tokio::time::sleep(delay).await;
                stream::iter(events)
            })
            .flatten()
            .chain(stream::pending()),
        )
    }

    #[tokio::test]
    async fn test_execute_stop_breaks() {
        let (runner, _rx) = CommandRunner::new(registry(), factory(), Duration::from_secs(60));
        assert!(runner.execute(Command::Stop).is_break());
        assert!(runner.shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn test_tick_is_delivered() {
        let (runner, mut rx) =
            CommandRunner::new(registry(), factory(), Duration::from_millis(10));
        assert!(runner.execute(Command::ScheduleTick).is_continue());
        assert_eq!(rx.recv().await, Some(Event::TickElapsed));
    }

    #[tokio::test]
    async fn test_tick_after_loop_exit_is_dropped() {
        let (runner, rx) = CommandRunner::new(registry(), factory(), Duration::from_millis(5));
        drop(rx);
        runner.execute(Command::ScheduleTick);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(!runner.shutdown.is_cancelled());
    }

    #[tokio::test]
    async fn test_poll_batch_is_delivered_as_one_event() {
        let (runner, mut rx) = CommandRunner::new(registry(), factory(), Duration::from_secs(60));
        runner.execute(Command::StartPollBatch { generation: 4 });

        match rx.recv().await {
            Some(Event::BatchArrived(batch)) => {
                assert_eq!(batch.generation, 4);
                assert_eq!(batch.entries.len(), 3);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    // paused time: the first batch always lands before the keys are due
    #[tokio::test(start_paused = true)]
    async fn test_run_polls_renders_and_quits() {
        let registry = registry();
        let (runner, rx) =
            CommandRunner::new(registry.clone(), factory(), Duration::from_millis(20));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let input = delayed(
            Duration::from_millis(300),
            vec![key(KeyCode::Down), key(KeyCode::Char('q'))],
        );

        let state = run(
            &mut terminal,
            DashboardState::new(registry),
            &runner,
            rx,
            input,
        )
        .await
        .unwrap();

        assert_eq!(state.mode(), Mode::Terminating);
        assert_eq!(state.cursor(), 1);
        assert_eq!(state.statuses()[0].health, Health::Healthy);
        assert_eq!(state.statuses()[0].namespaces, ["ramen-system"]);
        assert_eq!(state.statuses()[0].resources, ["drpc-a"]);
        assert_eq!(state.statuses()[1].health, Health::Healthy);
        assert_eq!(state.statuses()[2].health, Health::Error);
        assert!(state.last_applied().is_some());
        assert!(runner.shutdown.is_cancelled());

        let screen = buffer_lines(terminal.backend().buffer()).join("\n");
        assert!(screen.contains("drpc-a"));
    }

    #[tokio::test]
    async fn test_keys_are_handled_while_a_poll_hangs() {
        let registry = registry();
        let factory: Arc<dyn ClientFactory> = Arc::new(
            FakeFactory::default()
                .with("hub", Script::healthy().delay(Duration::from_secs(30)))
                .with("dr1", Script::healthy())
                .with("dr2", Script::healthy()),
        );
        let (runner, rx) = CommandRunner::new(registry.clone(), factory, Duration::from_millis(20));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let input = delayed(
            Duration::from_millis(50),
            vec![key(KeyCode::Down), key(KeyCode::Char('q'))],
        );

        let state = tokio::time::timeout(
            Duration::from_secs(1),
            run(
                &mut terminal,
                DashboardState::new(registry),
                &runner,
                rx,
                input,
            ),
        )
        .await
        .expect("loop blocked behind a slow poll")
        .unwrap();

        assert_eq!(state.mode(), Mode::Terminating);
        assert_eq!(state.cursor(), 1);
        // the hub never answered, so no batch was ever applied
        assert_eq!(state.last_applied(), None);
        assert!(state.statuses().iter().all(|s| s.health == Health::Unknown));
        let screen = buffer_lines(terminal.backend().buffer()).join("\n");
        assert_eq!(screen.matches("Unknown").count(), 3);
    }

    #[tokio::test]
    async fn test_run_fails_when_input_closes() {
        let registry = registry();
        let (runner, rx) = CommandRunner::new(registry.clone(), factory(), Duration::from_secs(60));
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

        let result = run(
            &mut terminal,
            DashboardState::new(registry),
            &runner,
            rx,
            stream::empty(),
        )
        .await;

        assert!(result.is_err());
    }
}
