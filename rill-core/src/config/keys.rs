use crate::keyboard::{KeyCode, KeyEvent, KeyModifiers};
use crate::state::Mode;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;

/// Commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// No-op: explicitly unbinds a key (removes inherited/default binding)
    Noop,
    Quit,

    // Movement
    NextItem,
    PrevItem,
    NextTag,
    PrevTag,
    NextMark,
    PrevMark,
    NextUnread,
    PrevUnread,

    // Read state and marks
    JustRead,
    JustUnread,
    TagRead,
    TagUnread,
    AllRead,
    AllUnread,
    ToggleMark,
    AllUnmarked,

    // Structure
    ToggleCollapseTag,
    SetCollapseAll,
    UnsetCollapseAll,
    NextFilter,
    PrevFilter,
    NextTagFilter,
    PrevTagFilter,
    ForceUpdate,

    // Search prompt
    InlineSearch,
    DeleteBackwardChar,
    DeleteBackwardWord,
    Confirm,
    Cancel,
}

impl Command {
    /// Every command with its config name, in the order help lists them.
    pub const fn all() -> &'static [(&'static str, Command)] {
        &[
            ("noop", Command::Noop),
            ("quit", Command::Quit),
            ("next_item", Command::NextItem),
            ("prev_item", Command::PrevItem),
            ("next_tag", Command::NextTag),
            ("prev_tag", Command::PrevTag),
            ("next_mark", Command::NextMark),
            ("prev_mark", Command::PrevMark),
            ("next_unread", Command::NextUnread),
            ("prev_unread", Command::PrevUnread),
            ("just_read", Command::JustRead),
            ("just_unread", Command::JustUnread),
            ("tag_read", Command::TagRead),
            ("tag_unread", Command::TagUnread),
            ("all_read", Command::AllRead),
            ("all_unread", Command::AllUnread),
            ("toggle_mark", Command::ToggleMark),
            ("all_unmarked", Command::AllUnmarked),
            ("toggle_collapse_tag", Command::ToggleCollapseTag),
            ("set_collapse_all", Command::SetCollapseAll),
            ("unset_collapse_all", Command::UnsetCollapseAll),
            ("next_filter", Command::NextFilter),
            ("prev_filter", Command::PrevFilter),
            ("next_tag_filter", Command::NextTagFilter),
            ("prev_tag_filter", Command::PrevTagFilter),
            ("force_update", Command::ForceUpdate),
            ("inline_search", Command::InlineSearch),
            ("delete_backward_char", Command::DeleteBackwardChar),
            ("delete_backward_word", Command::DeleteBackwardWord),
            ("confirm", Command::Confirm),
            ("cancel", Command::Cancel),
        ]
    }

    pub fn name(self) -> &'static str {
        Command::all()
            .iter()
            .find(|(_, command)| *command == self)
            .map_or("noop", |(name, _)| name)
    }

    /// Get a human-readable description of the command for help display
    pub fn description(self) -> &'static str {
        match self {
            Command::Noop => "Unbound",
            Command::Quit => "Quit",
            Command::NextItem => "Next entry",
            Command::PrevItem => "Previous entry",
            Command::NextTag => "First entry of the next group",
            Command::PrevTag => "First entry of the previous group",
            Command::NextMark => "Next marked entry",
            Command::PrevMark => "Previous marked entry",
            Command::NextUnread => "Next unread entry",
            Command::PrevUnread => "Previous unread entry",
            Command::JustRead => "Mark entry read",
            Command::JustUnread => "Mark entry unread",
            Command::TagRead => "Mark group read",
            Command::TagUnread => "Mark group unread",
            Command::AllRead => "Mark everything read",
            Command::AllUnread => "Mark everything unread",
            Command::ToggleMark => "Toggle mark",
            Command::AllUnmarked => "Clear visible marks",
            Command::ToggleCollapseTag => "Collapse or expand group",
            Command::SetCollapseAll => "Collapse all groups",
            Command::UnsetCollapseAll => "Expand all groups",
            Command::NextFilter => "Next filter",
            Command::PrevFilter => "Previous filter",
            Command::NextTagFilter => "Next group filter",
            Command::PrevTagFilter => "Previous group filter",
            Command::ForceUpdate => "Refresh now",
            Command::InlineSearch => "Search and mark",
            Command::DeleteBackwardChar => "Delete backward char",
            Command::DeleteBackwardWord => "Delete backward word",
            Command::Confirm => "Confirm",
            Command::Cancel => "Cancel",
        }
    }
}

impl FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "unbound" => Ok(Command::Noop),
            _ => Command::all()
                .iter()
                .find(|(name, _)| *name == s)
                .map(|(_, command)| *command)
                .ok_or_else(|| format!("Unknown command: {s}")),
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Key bindings for a specific layer/mode
pub type KeyMap = HashMap<KeyEvent, Command>;

/// Layered key bindings: `general` applies everywhere, `browse` and `search` on top of it.
#[derive(Debug, Clone)]
pub struct KeysConfig {
    pub general: KeyMap,
    pub browse: KeyMap,
    pub search: KeyMap,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct KeysConfigRaw {
    #[serde(default)]
    general: HashMap<String, String>,
    #[serde(default)]
    browse: HashMap<String, String>,
    #[serde(default)]
    search: HashMap<String, String>,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn bind(map: &mut KeyMap, key: &str, command: Command) {
    if let Ok(key) = KeyEvent::from_str(key) {
        map.insert(key, command);
    }
}

impl KeysConfig {
    pub fn new() -> Self {
        Self {
            general: Self::default_general(),
            browse: Self::default_browse(),
            search: Self::default_search(),
        }
    }

    /// Effective keymap for a mode: general, then the mode's own layer.
    pub fn keymap_for_mode(&self, mode: Mode) -> KeyMap {
        let mut combined = KeyMap::new();
        Self::apply_layer(&mut combined, &self.general);
        match mode {
            Mode::Browse => Self::apply_layer(&mut combined, &self.browse),
            Mode::Search => Self::apply_layer(&mut combined, &self.search),
        }
        combined
    }

    /// Find the first key bound to a given command in a keymap.
    pub fn find_key(keymap: &KeyMap, command: Command) -> Option<KeyEvent> {
        keymap
            .iter()
            .filter(|(_, bound)| **bound == command)
            .map(|(key, _)| *key)
            .min()
    }

    fn apply_layer(base: &mut KeyMap, layer: &KeyMap) {
        for (key, command) in layer {
            if *command == Command::Noop {
                base.remove(key);
            } else {
                base.insert(*key, *command);
            }
        }
    }

    fn default_general() -> KeyMap {
        let mut map = KeyMap::new();
        map.insert(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Command::Quit,
        );
        map
    }

    fn default_browse() -> KeyMap {
        let mut map = KeyMap::new();
        for (key, command) in [
            ("q", Command::Quit),
            ("j", Command::NextItem),
            ("down", Command::NextItem),
            ("k", Command::PrevItem),
            ("up", Command::PrevItem),
            (".", Command::NextTag),
            (",", Command::PrevTag),
            ("n", Command::NextUnread),
            ("p", Command::PrevUnread),
            ("N", Command::NextMark),
            ("P", Command::PrevMark),
            ("r", Command::JustRead),
            ("u", Command::JustUnread),
            ("R", Command::TagRead),
            ("U", Command::TagUnread),
            ("C-r", Command::AllRead),
            ("C-u", Command::AllUnread),
            ("space", Command::ToggleMark),
            ("M", Command::AllUnmarked),
            ("c", Command::ToggleCollapseTag),
            ("C", Command::SetCollapseAll),
            ("V", Command::UnsetCollapseAll),
            ("]", Command::NextFilter),
            ("[", Command::PrevFilter),
            ("}", Command::NextTagFilter),
            ("{", Command::PrevTagFilter),
            ("f", Command::ForceUpdate),
            ("/", Command::InlineSearch),
        ] {
            bind(&mut map, key, command);
        }
        map
    }

    fn default_search() -> KeyMap {
        let mut map = KeyMap::new();
        for (key, command) in [
            ("enter", Command::Confirm),
            ("esc", Command::Cancel),
            ("backspace", Command::DeleteBackwardChar),
            ("C-w", Command::DeleteBackwardWord),
        ] {
            bind(&mut map, key, command);
        }
        map
    }

    /// Parse a string representation of keybindings into a `KeyMap`
    fn parse_keymap(raw_map: &HashMap<String, String>) -> Result<KeyMap, String> {
        let mut keymap = KeyMap::new();
        for (key_str, command_str) in raw_map {
            let key_event =
                KeyEvent::from_str(key_str).map_err(|e| format!("Invalid key '{key_str}': {e}"))?;
            let command = Command::from_str(command_str)
                .map_err(|e| format!("Invalid command '{command_str}': {e}"))?;
            keymap.insert(key_event, command);
        }
        Ok(keymap)
    }

    /// Merge user configuration with defaults.
    ///
    /// Keep `Noop` values so higher-precedence layers can explicitly unbind inherited mappings.
    fn from_raw(raw: &KeysConfigRaw) -> Result<Self, String> {
        let mut config = Self::default();
        config.general.extend(Self::parse_keymap(&raw.general)?);
        config.browse.extend(Self::parse_keymap(&raw.browse)?);
        config.search.extend(Self::parse_keymap(&raw.search)?);
        Ok(config)
    }
}

impl<'de> Deserialize<'de> for KeysConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = KeysConfigRaw::deserialize(deserializer)?;
        KeysConfig::from_raw(&raw).map_err(serde::de::Error::custom)
    }
}
