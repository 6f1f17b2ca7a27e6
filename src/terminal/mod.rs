//! Terminal management with RAII cleanup.
//!
//! [`TerminalManager`] puts the terminal into TUI mode on creation and
//! restores it on drop, so every exit path (normal quit, `?` error, panic via
//! [`setup_panic_hook`]) leaves a usable shell behind.
//!
//! # Example
//!
//! ```no_run
//! use gpt_term::terminal::TerminalManager;
//!
//! fn main() -> color_eyre::Result<()> {
//!     let mut term_manager = TerminalManager::new()?;
//!     let terminal = term_manager.terminal();
//!     // ... run the application ...
//!     Ok(())
//! }
//! ```

mod panic;
mod setup;

pub use panic::setup_panic_hook;
pub use setup::{emergency_restore, enter_tui_mode, leave_tui_mode};

use color_eyre::Result;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};

/// Restores the terminal when dropped, unless already cleaned up.
pub struct TerminalGuard {
    cleaned_up: bool,
}

impl TerminalGuard {
    fn new() -> Self {
        Self { cleaned_up: false }
    }

    pub fn cleanup(&mut self) {
        if self.cleaned_up {
            return;
        }
        self.cleaned_up = true;
        leave_tui_mode(&mut io::stdout());
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        self.cleanup();
    }
}

pub type Backend = CrosstermBackend<Stdout>;

pub struct TerminalManager {
    terminal: Terminal<Backend>,
    _guard: TerminalGuard,
}

impl TerminalManager {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        enter_tui_mode(&mut stdout)?;

        // Guard first so a failure below still restores the terminal.
        let guard = TerminalGuard::new();
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.clear()?;

        Ok(Self {
            terminal,
            _guard: guard,
        })
    }

    pub fn terminal(&mut self) -> &mut Terminal<Backend> {
        &mut self.terminal
    }

    /// Hand the terminal to a child process.
    pub fn suspend(&mut self) {
        leave_tui_mode(self.terminal.backend_mut());
    }

    /// Take the terminal back after [`suspend`](Self::suspend) and force a
    /// full redraw on the next frame.
    pub fn resume(&mut self) -> Result<()> {
        enter_tui_mode(self.terminal.backend_mut())?;
        self.terminal.clear()?;
        Ok(())
    }
}
