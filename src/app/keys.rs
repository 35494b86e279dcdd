//! Key codes reported by the terminal session.
//!
//! A simplified subset of crossterm's key model, covering what the
//! dispatch loop binds.

use crossterm::event;

/// Key codes for keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A printable character.
    Char(char),
    /// Escape key.
    Esc,
}

/// Key modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyModifiers {
    /// Shift key held.
    pub shift: bool,
    /// Control key held.
    pub control: bool,
    /// Alt/Option key held.
    pub alt: bool,
}

impl KeyModifiers {
    /// No modifiers.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Only Control held.
    pub const CONTROL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };
}

/// What the session reports to the dispatch loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A key was pressed.
    Key {
        /// The key code.
        code: KeyCode,
        /// Modifiers held during keypress.
        modifiers: KeyModifiers,
    },
    /// Terminal was resized; the screen needs a full redraw.
    Resize,
}

/// Convert a crossterm key event, dropping releases, repeats, and
/// keys the dispatch loop does not bind.
pub fn convert_key_event(key: event::KeyEvent) -> Option<(KeyCode, KeyModifiers)> {
    if key.kind != event::KeyEventKind::Press {
        return None;
    }
    let code = convert_key_code(key.code)?;
    Some((code, convert_modifiers(key.modifiers)))
}

fn convert_key_code(code: event::KeyCode) -> Option<KeyCode> {
    Some(match code {
        event::KeyCode::Char(c) => KeyCode::Char(c),
        event::KeyCode::Esc => KeyCode::Esc,
        _ => return None,
    })
}

fn convert_modifiers(mods: event::KeyModifiers) -> KeyModifiers {
    KeyModifiers {
        shift: mods.contains(event::KeyModifiers::SHIFT),
        control: mods.contains(event::KeyModifiers::CONTROL),
        alt: mods.contains(event::KeyModifiers::ALT),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    fn key(code: event::KeyCode, modifiers: event::KeyModifiers, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_press_is_converted() {
        let converted = convert_key_event(key(
            event::KeyCode::Char('c'),
            event::KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert_eq!(converted, Some((KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_release_is_dropped() {
        let converted = convert_key_event(key(
            event::KeyCode::Char('b'),
            event::KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(converted, None);
    }

    #[test]
    fn test_escape_is_converted_and_enter_dropped() {
        let esc = convert_key_event(key(
            event::KeyCode::Esc,
            event::KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(esc, Some((KeyCode::Esc, KeyModifiers::NONE)));

        let enter = convert_key_event(key(
            event::KeyCode::Enter,
            event::KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(enter, None);
    }

    #[test]
    fn test_unbound_key_is_dropped() {
        let converted = convert_key_event(key(
            event::KeyCode::F(5),
            event::KeyModifiers::NONE,
            KeyEventKind::Press,
        ));
        assert_eq!(converted, None);
    }
}
