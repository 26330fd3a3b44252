use rill_core::config::{Command, KeysConfig};
use rill_core::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use rill_core::state::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Command(Command),
    /// Literal text typed into the search prompt
    Insert(char),
}

/// Resolve a key event through the layered keymap for the current mode
pub fn resolve(key: crossterm::event::KeyEvent, mode: Mode, keys: &KeysConfig) -> Option<KeyInput> {
    let key = KeyEvent::from(key);
    if let Some(command) = keys.keymap_for_mode(mode).get(&key) {
        return Some(KeyInput::Command(*command));
    }
    match (mode, key.code) {
        (Mode::Search, KeyCode::Char(c))
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(KeyInput::Insert(c))
        }
        _ => None,
    }
}
