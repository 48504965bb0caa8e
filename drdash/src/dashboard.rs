//! The dashboard state machine.
//!
//! [`DashboardState::update`] is the only place display state changes. It
//! takes one [`Event`], mutates the state and hands back the [`Command`]s the
//! runtime should carry out. It never blocks and never does I/O.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::{
    status::{BatchResult, TargetStatus},
    target::{Target, TargetId, TargetRegistry},
};

/// Keys the dashboard reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Quit,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Init,
    TickElapsed,
    BatchArrived(BatchResult),
    KeyPressed(Key),
    Resized { width: u16, height: u16 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Init,
    TickElapsed,
    BatchArrived,
    KeyPressed,
    Resized,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Init,
        EventKind::TickElapsed,
        EventKind::BatchArrived,
        EventKind::KeyPressed,
        EventKind::Resized,
    ];
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Init => EventKind::Init,
            Event::TickElapsed => EventKind::TickElapsed,
            Event::BatchArrived(_) => EventKind::BatchArrived,
            Event::KeyPressed(_) => EventKind::KeyPressed,
            Event::Resized { .. } => EventKind::Resized,
        }
    }
}

/// Side effects requested by the state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    StartPollBatch { generation: u64 },
    ScheduleTick,
    Stop,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Running,
    Terminating,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug)]
pub struct DashboardState {
    registry: Arc<TargetRegistry>,
    /// Indexed by [`TargetId`]; always as long as the registry.
    statuses: Vec<TargetStatus>,
    cursor: usize,
    viewport: Viewport,
    mode: Mode,
    next_generation: u64,
    last_applied: Option<u64>,
}

impl DashboardState {
    pub fn new(registry: Arc<TargetRegistry>) -> Self {
        let statuses = vec![TargetStatus::default(); registry.len()];
        Self {
            registry,
            statuses,
            cursor: 0,
            viewport: Viewport::default(),
            mode: Mode::Running,
            next_generation: 1,
            last_applied: None,
        }
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn statuses(&self) -> &[TargetStatus] {
        &self.statuses
    }

    pub fn status(&self, id: TargetId) -> Option<&TargetStatus> {
        self.statuses.get(id.0)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&Target> {
        self.registry.get(TargetId(self.cursor))
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Generation of the most recently applied batch.
    pub fn last_applied(&self) -> Option<u64> {
        self.last_applied
    }

    pub fn update(&mut self, event: Event) -> Vec<Command> {
        if self.mode == Mode::Terminating {
            debug!(kind = ?event.kind(), "ignoring event after quit");
            return Vec::new();
        }

        match event {
            Event::Init | Event::TickElapsed => {
                vec![self.start_poll(), Command::ScheduleTick]
            }
            Event::BatchArrived(batch) => {
                self.apply_batch(batch);
                Vec::new()
            }
            Event::KeyPressed(key) => self.on_key(key),
            Event::Resized { width, height } => {
                self.viewport = Viewport { width, height };
                Vec::new()
            }
        }
    }

    fn start_poll(&mut self) -> Command {
        let generation = self.next_generation;
        self.next_generation += 1;
        Command::StartPollBatch { generation }
    }

    fn apply_batch(&mut self, batch: BatchResult) {
        let generation = batch.generation;
        if self.last_applied.is_some_and(|last| generation < last) {
            debug!(generation, last = ?self.last_applied, "applying superseded batch");
        }

        for (id, outcome) in batch.entries {
            match self.statuses.get_mut(id.0) {
                Some(slot) => *slot = outcome.into_status(generation),
                None => warn!(cluster = id.0, generation, "batch entry for unknown target"),
            }
        }
        self.last_applied = Some(generation);
    }

    fn on_key(&mut self, key: Key) -> Vec<Command> {
        let last = self.statuses.len().saturating_sub(1);
        match key {
            Key::Quit => {
                info!("quit requested");
                self.mode = Mode::Terminating;
                return vec![Command::Stop];
            }
            Key::Up => self.cursor = self.cursor.saturating_sub(1),
            Key::Down => self.cursor = (self.cursor + 1).min(last),
            Key::Other => {}
        }
        Vec::new()
    }
}
