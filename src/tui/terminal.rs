//! Terminal setup and teardown utilities.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::Result;

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Initializes the terminal for TUI rendering.
///
/// Enables raw mode and switches to the alternate screen buffer. Logging
/// goes to stderr, so the dashboard owns stdout exclusively.
///
/// # Errors
///
/// Returns an error if stdout is not a TTY or terminal setup fails.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(crate::RatewatchError::Io(
            "the dashboard requires an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode()
        .map_err(|e| crate::RatewatchError::Io(format!("failed to enable raw mode: {e}")))?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| {
        let _ = disable_raw_mode();
        crate::RatewatchError::Io(format!("failed to enter alternate screen: {e}"))
    })?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).map_err(|e| {
        let _ = disable_raw_mode();
        crate::RatewatchError::Io(format!("failed to create terminal: {e}"))
    })?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// # Errors
///
/// Returns an error if raw mode or the main screen cannot be restored.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| crate::RatewatchError::Io(e.to_string()))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| crate::RatewatchError::Io(e.to_string()))?;
    terminal
        .show_cursor()
        .map_err(|e| crate::RatewatchError::Io(e.to_string()))?;
    Ok(())
}
