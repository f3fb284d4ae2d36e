//! Terminal setup and teardown.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::{Result, TrackerError};

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// A terminal in raw mode on the alternate screen.
///
/// Restores the normal screen when dropped, so an early return from the
/// UI loop still leaves the shell usable.
pub struct TerminalGuard {
    terminal: Tui,
    restored: bool,
}

impl TerminalGuard {
    /// Enters raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Io`] if stdout is not a TTY or the terminal
    /// cannot be switched.
    pub fn enter() -> Result<Self> {
        if !io::stdout().is_terminal() {
            return Err(TrackerError::Io(
                "the dashboard needs an interactive terminal; use --headless instead".to_string(),
            ));
        }

        enable_raw_mode().map_err(|e| TrackerError::Io(format!("failed to enable raw mode: {e}")))?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(TrackerError::Io(format!("failed to enter alternate screen: {e}")));
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                restored: false,
            }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(TrackerError::Io(format!("failed to create terminal: {e}")))
            }
        }
    }

    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }

    /// Leaves raw mode and the alternate screen.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Io`] if the terminal cannot be restored.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        restore(&mut self.terminal)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if !self.restored
            && let Err(e) = restore(&mut self.terminal)
        {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

fn restore(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| TrackerError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| TrackerError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| TrackerError::Io(e.to_string()))?;
    Ok(())
}
