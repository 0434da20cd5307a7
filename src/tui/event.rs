//! Keyboard input while a timer is running.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::error::RudoroError;

/// A key the timer screens care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Ctrl+C
    Interrupt,
    /// Esc
    Escape,
    /// Any printable character, lowercased
    Char(char),
}

/// A source of key presses.
pub trait InputSource {
    /// Wait up to `timeout` for a key.
    ///
    /// Returns `None` once the timeout passes with no key pressed.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>, RudoroError>;

    /// Block until a key arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be read.
    fn read_key(&mut self) -> Result<Key, RudoroError> {
        loop {
            if let Some(key) = self.poll_key(Duration::from_secs(60))? {
                return Ok(key);
            }
        }
    }
}

/// Reads keys from the terminal with crossterm.
///
/// Expects raw mode to be enabled so Ctrl+C arrives as a key instead of a
/// signal.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn poll_key(&mut self, timeout: Duration) -> Result<Option<Key>, RudoroError> {
        let deadline = Instant::now() + timeout;

        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if !event::poll(remaining)
                .map_err(|e| RudoroError::Terminal(format!("Event poll failed: {e}")))?
            {
                return Ok(None);
            }

            let event = event::read()
                .map_err(|e| RudoroError::Terminal(format!("Event read failed: {e}")))?;

            // Resize, mouse and key-release events don't count
            if let Some(key) = map_event(&event) {
                return Ok(Some(key));
            }
        }
    }
}

fn map_event(event: &Event) -> Option<Key> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Key::Interrupt);
    }

    match key.code {
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Char(c) => Some(Key::Char(c.to_ascii_lowercase())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    #[test]
    fn test_map_ctrl_c() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&event), Some(Key::Interrupt));
    }

    #[test]
    fn test_map_plain_keys() {
        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(map_event(&enter), Some(Key::Enter));

        let upper = Event::Key(KeyEvent::new(KeyCode::Char('S'), KeyModifiers::SHIFT));
        assert_eq!(map_event(&upper), Some(Key::Char('s')));

        let arrow = Event::Key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE));
        assert_eq!(map_event(&arrow), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);
    }
}
