//! Key mapping for terminal input
//!
//! Converts crossterm key events to emulator key actions.

use bitflags::bitflags;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::terminal::TerminalKey;

bitflags! {
    /// Modifier keys
    #[derive(Clone, Copy, Debug, Default, PartialEq)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0001;
        const CTRL  = 0b0010;
        const ALT   = 0b0100;
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        let mut result = Modifiers::empty();
        if mods.contains(KeyModifiers::SHIFT) {
            result |= Modifiers::SHIFT;
        }
        if mods.contains(KeyModifiers::CONTROL) {
            result |= Modifiers::CTRL;
        }
        if mods.contains(KeyModifiers::ALT) {
            result |= Modifiers::ALT;
        }
        result
    }
}

/// Key mapper for converting key events to emulator actions
pub struct KeyMapper;

impl KeyMapper {
    /// Map a crossterm KeyEvent. Releases and unbound keys map to `None`.
    pub fn map(event: &KeyEvent) -> Option<TerminalKey> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let mods = Modifiers::from(event.modifiers);

        match event.code {
            KeyCode::Char(ch) => Self::map_char(ch, mods),
            KeyCode::Enter => Some(TerminalKey::Enter),
            KeyCode::Backspace => Some(TerminalKey::Backspace),
            KeyCode::Tab => Some(TerminalKey::Tab),
            KeyCode::Up => Some(TerminalKey::Up),
            KeyCode::Down => Some(TerminalKey::Down),
            KeyCode::Esc => Some(TerminalKey::Close),
            _ => None,
        }
    }

    /// Map a character with modifiers
    fn map_char(ch: char, mods: Modifiers) -> Option<TerminalKey> {
        if mods.contains(Modifiers::CTRL) {
            return match ch.to_ascii_lowercase() {
                'l' => Some(TerminalKey::ClearScreen),
                'c' | 'd' => Some(TerminalKey::Close),
                _ => None,
            };
        }
        if mods.contains(Modifiers::ALT) {
            return None;
        }
        Some(TerminalKey::Char(ch))
    }
}
