//! Input Module - Event conversion and polling
//!
//! Bridges crossterm's event system with the entry screen. The screen
//! emulates a number-pad keyboard, so only digits and backspace reach
//! the capture buffer; everything else is either a quit chord or noise.
//!
//! # API
//!
//! - `convert_key_event` - Convert crossterm KeyEvent to our InputEvent
//! - `poll_event` - Non-blocking event check with timeout
//! - `read_event` - Blocking event read
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use pinpad_tui::input::{poll_event, InputEvent, EntryEvent};
//!
//! // Frame loop
//! loop {
//!     if let Ok(Some(InputEvent::Entry(event))) = poll_event(Duration::from_millis(16)) {
//!         // feed the capture buffer
//!     }
//! }
//! ```

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers,
    poll, read,
};
use std::time::Duration;

// =============================================================================
// EVENT TYPES
// =============================================================================

/// A keystroke the entry screen cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEvent {
    /// A digit key (0-9).
    Digit(u8),
    /// Delete the last typed character.
    Backspace,
    /// Leave the screen (Escape or Ctrl+C).
    Quit,
}

/// Unified event type for the screen loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A keystroke relevant to code entry.
    Entry(EntryEvent),
    /// Terminal resize event (new width, height).
    Resize(u16, u16),
    /// No event or unhandled event type.
    None,
}

// =============================================================================
// KEY EVENT CONVERSION
// =============================================================================

/// Convert a crossterm KeyEvent to our InputEvent.
///
/// Release events never produce input; press and repeat both do, so a
/// held backspace keeps deleting.
pub fn convert_key_event(event: CrosstermKeyEvent) -> InputEvent {
    if event.kind == KeyEventKind::Release {
        return InputEvent::None;
    }

    match event.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            InputEvent::Entry(EntryEvent::Digit(c as u8 - b'0'))
        }
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            InputEvent::Entry(EntryEvent::Quit)
        }
        KeyCode::Backspace => InputEvent::Entry(EntryEvent::Backspace),
        KeyCode::Esc => InputEvent::Entry(EntryEvent::Quit),
        _ => InputEvent::None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an event with timeout.
/// Returns None if no event within timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<InputEvent>> {
    if poll(timeout)? {
        Ok(Some(read_event()?))
    } else {
        Ok(None)
    }
}

/// Read the next event (blocking).
pub fn read_event() -> std::io::Result<InputEvent> {
    match read()? {
        CrosstermEvent::Key(key) => Ok(convert_key_event(key)),
        CrosstermEvent::Resize(w, h) => Ok(InputEvent::Resize(w, h)),
        _ => Ok(InputEvent::None),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CrosstermKeyEvent {
        CrosstermKeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_convert_digits() {
        for d in 0..=9u8 {
            let event = key(
                KeyCode::Char((b'0' + d) as char),
                KeyModifiers::empty(),
                KeyEventKind::Press,
            );
            assert_eq!(
                convert_key_event(event),
                InputEvent::Entry(EntryEvent::Digit(d))
            );
        }
    }

    #[test]
    fn test_convert_backspace() {
        let event = key(KeyCode::Backspace, KeyModifiers::empty(), KeyEventKind::Press);
        assert_eq!(
            convert_key_event(event),
            InputEvent::Entry(EntryEvent::Backspace)
        );
    }

    #[test]
    fn test_convert_quit_chords() {
        let esc = key(KeyCode::Esc, KeyModifiers::empty(), KeyEventKind::Press);
        assert_eq!(convert_key_event(esc), InputEvent::Entry(EntryEvent::Quit));

        let ctrl_c = key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        );
        assert_eq!(
            convert_key_event(ctrl_c),
            InputEvent::Entry(EntryEvent::Quit)
        );
    }

    #[test]
    fn test_letters_are_ignored() {
        let event = key(KeyCode::Char('a'), KeyModifiers::empty(), KeyEventKind::Press);
        assert_eq!(convert_key_event(event), InputEvent::None);

        // Plain 'c' without ctrl is not a quit.
        let plain_c = key(KeyCode::Char('c'), KeyModifiers::empty(), KeyEventKind::Press);
        assert_eq!(convert_key_event(plain_c), InputEvent::None);
    }

    #[test]
    fn test_release_produces_nothing() {
        let event = key(
            KeyCode::Char('5'),
            KeyModifiers::empty(),
            KeyEventKind::Release,
        );
        assert_eq!(convert_key_event(event), InputEvent::None);
    }

    #[test]
    fn test_repeat_keeps_deleting() {
        let event = key(KeyCode::Backspace, KeyModifiers::empty(), KeyEventKind::Repeat);
        assert_eq!(
            convert_key_event(event),
            InputEvent::Entry(EntryEvent::Backspace)
        );
    }
}
