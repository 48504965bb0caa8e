//! Raw-mode terminal setup and teardown.
//!
//! [`TerminalSession`] owns the ratatui terminal. Leaving it, by
//! [`TerminalSession::restore`], by drop or by a panic, always puts the
//! shell back into cooked mode on the main screen.

use std::{backtrace::Backtrace, io, panic};

use anyhow::{Context, Result};
use crossterm::{
    cursor, execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::error;

pub type Tui = Terminal<CrosstermBackend<io::Stdout>>;

pub struct TerminalSession {
    terminal: Tui,
    restored: bool,
}

impl TerminalSession {
    /// Enables raw mode and switches to the alternate screen.
    ///
    /// Raw mode is undone again when any later setup step fails.
    pub fn enter() -> Result<Self> {
        terminal::enable_raw_mode().context("failed to enable raw mode")?;

        match setup() {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(err) => {
                let _ = leave(&mut io::stdout());
                Err(err)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Restores the terminal and reports any failure to do so.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        leave(self.terminal.backend_mut()).context("failed to restore terminal")
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if !self.restored {
            let _ = leave(self.terminal.backend_mut());
        }
    }
}

fn setup() -> Result<Tui> {
    execute!(io::stdout(), EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(io::stdout())).context("failed to create terminal")?;
    terminal.clear().context("failed to clear terminal")?;
    Ok(terminal)
}

fn leave<W: io::Write>(out: &mut W) -> io::Result<()> {
    terminal::disable_raw_mode()?;
    write_restore(out)
}

fn write_restore<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, cursor::Show)
}

/// Restores the terminal before the default panic output, and logs the
/// panic with a backtrace.
pub fn install_panic_hook() {
    let default = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = leave(&mut io::stdout());
        let bt = Backtrace::force_capture();
        error!(target: "panic", "panic: {panic_info}\n\nBacktrace:\n{bt}");
        default(panic_info);
    }));
}
