//! Terminal front-end for rudoro.
//!
//! Draws the menu and the phase screens with crossterm and feeds key
//! presses into the session controller.

mod app;
mod console;
mod event;

pub use app::{App, AppOptions};
pub use console::Console;
pub use event::{InputSource, Key, TerminalInput};

use std::io::{self, Write};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::error::RudoroError;
use crate::features::focus::{SessionController, SessionSummary};
use crate::features::notify::Notifier;

/// Keeps the terminal in raw mode until dropped.
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Enable raw mode when `enabled` is set; otherwise a no-op guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal refuses raw mode.
    pub fn enable(enabled: bool) -> Result<Self, RudoroError> {
        if enabled {
            enable_raw_mode()
                .map_err(|e| RudoroError::Terminal(format!("Failed to enable raw mode: {e}")))?;
        }
        Ok(Self { active: enabled })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            disable_raw_mode().ok();
        }
    }
}

/// Run the interactive app on the real terminal.
///
/// Screens and prompts are written to `out`; keys and answers come from
/// stdin.
///
/// # Errors
///
/// Returns an error if the terminal fails.
pub fn run<W: Write>(
    controller: SessionController,
    notifier: Box<dyn Notifier>,
    options: AppOptions,
    out: W,
) -> Result<SessionSummary, RudoroError> {
    let console = Console::new(io::stdin().lock(), out);
    let mut app = App::new(controller, TerminalInput, console, notifier, options);
    let result = app.run();

    // Never leave the shell in raw mode
    disable_raw_mode().ok();
    result
}
