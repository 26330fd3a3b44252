pub mod keys;

use crate::filter::{Filter, FilterCycle};
use crate::group::{Group, GroupCollection};
use crate::paths::{expand_tilde, xdg_dir};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

pub use keys::{Command, KeysConfig};

pub const APP_NAME: &str = "rill";

pub const DEFAULT_REFRESH_SECS: u64 = 300;

/// `~/.config/rill/config.toml` on both Linux and macOS, honouring `XDG_CONFIG_HOME`.
pub fn config_file() -> Option<PathBuf> {
    xdg_dir("XDG_CONFIG_HOME", ".config", APP_NAME).map(|dir| dir.join("config.toml"))
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON file holding the entry list. Supports `~` for the home directory.
    pub feed: String,

    /// Seconds between background refreshes.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    #[serde(default)]
    pub layout: LayoutConfig,

    /// Global filters, cycled with `next_filter` / `prev_filter`. For example:
    /// ```toml
    /// filters = ["all", "unread"]
    /// ```
    #[serde(default = "default_filters")]
    pub filters: Vec<Filter>,

    /// Groups in display order. Defaults to a single group holding every entry.
    #[serde(default = "default_groups")]
    pub groups: Vec<GroupConfig>,

    /// Color theme configuration.
    #[serde(default)]
    pub theme: ThemeConfig,

    /// Key binding configuration.
    /// To unbind an inherited key mapping, assign it to `noop`.
    #[serde(default)]
    pub keys: KeysConfig,
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

fn default_filters() -> Vec<Filter> {
    vec![Filter::All]
}

fn default_groups() -> Vec<GroupConfig> {
    vec![GroupConfig {
        name: "all".to_string(),
        tags: Vec::new(),
        filters: Vec::new(),
        collapsed: false,
    }]
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutConfig {
    /// Number of columns the list flows through (default: 1).
    #[serde(default = "LayoutConfig::default_columns")]
    pub columns: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            columns: Self::default_columns(),
        }
    }
}

impl LayoutConfig {
    fn default_columns() -> usize {
        1
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct GroupConfig {
    pub name: String,
    /// Entries carrying any of these tags belong to the group; empty admits everything.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Per-group filters, cycled with `next_tag_filter` / `prev_tag_filter`.
    #[serde(default)]
    pub filters: Vec<Filter>,
    /// Start collapsed.
    #[serde(default)]
    pub collapsed: bool,
}

/// Entry list colours. Each value is a named colour or `#rrggbb`.
#[derive(Debug, Deserialize, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Selection background
    pub accent: ThemeColor,
    pub highlight_fg: ThemeColor,
    pub unread: ThemeColor,
    pub read: ThemeColor,
    /// Mark indicator and marked titles
    pub marked: ThemeColor,
    /// Group names in the status line
    pub title: ThemeColor,
    /// Message dialog border
    pub border: ThemeColor,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        let named = ThemeColor::Named;
        Self {
            accent: named(NamedColor::Magenta),
            highlight_fg: named(NamedColor::White),
            unread: named(NamedColor::White),
            read: named(NamedColor::Gray),
            marked: named(NamedColor::Yellow),
            title: named(NamedColor::Blue),
            border: named(NamedColor::Cyan),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColor {
    Named(NamedColor),
    Rgb(u8, u8, u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

const NAMED_COLORS: &[(&str, NamedColor)] = &[
    ("black", NamedColor::Black),
    ("blue", NamedColor::Blue),
    ("cyan", NamedColor::Cyan),
    ("gray", NamedColor::Gray),
    ("grey", NamedColor::Gray),
    ("green", NamedColor::Green),
    ("magenta", NamedColor::Magenta),
    ("red", NamedColor::Red),
    ("white", NamedColor::White),
    ("yellow", NamedColor::Yellow),
];

impl ThemeColor {
    pub fn parse(s: &str) -> Option<Self> {
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
                return None;
            }
            let [_, r, g, b] = u32::from_str_radix(hex, 16).ok()?.to_be_bytes();
            return Some(Self::Rgb(r, g, b));
        }
        NAMED_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|(_, color)| Self::Named(*color))
    }
}

impl<'de> Deserialize<'de> for ThemeColor {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid color '{s}': expected a name or #rrggbb"))
        })
    }
}

impl Config {
    pub fn resolved_feed(&self) -> Result<PathBuf> {
        expand_tilde(&self.feed)
            .with_context(|| format!("Cannot expand '{}': home directory unknown", self.feed))
    }

    pub fn columns(&self) -> usize {
        self.layout.columns.max(1)
    }

    pub fn filter_cycle(&self) -> FilterCycle {
        FilterCycle::new(self.filters.clone())
    }

    /// Empty groups, in configured order, ready to be populated.
    pub fn build_groups(&self) -> GroupCollection {
        GroupCollection::new(
            self.groups
                .iter()
                .map(|g| {
                    Group::new(g.name.clone())
                        .with_tags(g.tags.iter().cloned())
                        .with_filters(FilterCycle::new(g.filters.clone()))
                        .collapsed(g.collapsed)
                })
                .collect(),
        )
    }
}

pub fn load_config_from_str(s: &str) -> Result<Config> {
    let config: Config = toml::from_str(s)?;
    Ok(config)
}

pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    let config_file = match config_override {
        Some(path) => path.to_path_buf(),
        None => config_file().context("Unable to determine the config directory")?,
    };
    if !config_file.exists() {
        anyhow::bail!("Config file not found at {}", config_file.display());
    }
    let contents = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed to read {}", config_file.display()))?;
    load_config_from_str(&contents)
        .with_context(|| format!("Invalid config in {}", config_file.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_config() {
        let config = load_config_from_str(r#"feed = "~/feeds.json""#).unwrap();
        assert_eq!(config.feed, "~/feeds.json");
        assert_eq!(config.refresh_secs, DEFAULT_REFRESH_SECS);
        assert_eq!(config.columns(), 1);
        assert_eq!(config.filters, vec![Filter::All]);
        assert_eq!(config.groups.len(), 1);
        assert_eq!(config.groups[0].name, "all");
    }

    #[test]
    fn test_full_config() {
        let config = load_config_from_str(
            r#"
feed = "/tmp/feed.json"
refresh_secs = 60
filters = ["all", "unread"]

[layout]
columns = 2

[[groups]]
name = "Rust"
tags = ["rust", "cargo"]
filters = ["all", "marked"]

[[groups]]
name = "Everything"
collapsed = true

[keys.browse]
x = "toggle_mark"
"#,
        )
        .unwrap();
        assert_eq!(config.refresh_secs, 60);
        assert_eq!(config.columns(), 2);
        assert_eq!(config.filters, vec![Filter::All, Filter::Unread]);

        let groups = config.build_groups();
        assert_eq!(groups.len(), 2);
        let rust = groups.get(0).unwrap();
        assert_eq!(rust.name, "Rust");
        assert_eq!(rust.tags, vec!["rust", "cargo"]);
        assert_eq!(rust.filters.filters(), &[Filter::All, Filter::Marked]);
        assert!(groups.get(1).unwrap().collapsed);

        let browse = config.keys.keymap_for_mode(crate::state::Mode::Browse);
        assert_eq!(
            browse.get(&crate::keyboard::KeyEvent::plain('x')),
            Some(&Command::ToggleMark)
        );
    }

    #[test]
    fn test_empty_config_fails() {
        assert!(load_config_from_str("").is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = load_config_from_str(
            r#"
feed = "f.json"
unknown_field = true
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_filter_rejected() {
        let result = load_config_from_str(
            r#"
feed = "f.json"
filters = ["starred"]
"#,
        );
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("starred"), "Error was: {err}");
    }

    #[test]
    fn test_unknown_group_field_rejected() {
        let result = load_config_from_str(
            r#"
feed = "f.json"

[[groups]]
name = "x"
colour = "red"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_columns_clamped() {
        let config = load_config_from_str(
            r#"
feed = "f.json"
[layout]
columns = 0
"#,
        )
        .unwrap();
        assert_eq!(config.columns(), 1);
    }

    #[test]
    fn test_feed_tilde_expansion() {
        let config = load_config_from_str(r#"feed = "~/feed.json""#).unwrap();
        let path = config.resolved_feed().unwrap();
        assert!(!path.to_string_lossy().contains('~'));
        assert!(path.ends_with("feed.json"));
    }

    #[test]
    fn test_theme_config_defaults() {
        let config = load_config_from_str(r#"feed = "f.json""#).unwrap();
        assert_eq!(config.theme.accent, ThemeColor::Named(NamedColor::Magenta));
        assert_eq!(config.theme.read, ThemeColor::Named(NamedColor::Gray));
        assert_eq!(config.theme.marked, ThemeColor::Named(NamedColor::Yellow));
    }

    #[test]
    fn test_theme_config_custom() {
        let config = load_config_from_str(
            r##"
feed = "f.json"

[theme]
accent = "blue"
marked = "#ff00ff"
"##,
        )
        .unwrap();
        assert_eq!(config.theme.accent, ThemeColor::Named(NamedColor::Blue));
        assert_eq!(config.theme.marked, ThemeColor::Rgb(255, 0, 255));
        assert_eq!(config.theme.title, ThemeColor::Named(NamedColor::Blue));
    }

    #[test]
    fn test_theme_invalid_color_rejected() {
        let result = load_config_from_str(
            r#"
feed = "f.json"

[theme]
accent = "notacolor"
"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid color"), "Error was: {err}");
    }

    #[test]
    fn test_theme_color_parse() {
        assert_eq!(
            ThemeColor::parse("RED"),
            Some(ThemeColor::Named(NamedColor::Red))
        );
        assert_eq!(
            ThemeColor::parse("grey"),
            Some(ThemeColor::Named(NamedColor::Gray))
        );
        assert_eq!(
            ThemeColor::parse("#ff0000"),
            Some(ThemeColor::Rgb(255, 0, 0))
        );
        assert_eq!(ThemeColor::parse("#fff"), None);
        assert_eq!(ThemeColor::parse("#+fffff"), None);
        assert_eq!(ThemeColor::parse("#zzzzzz"), None);
        assert_eq!(ThemeColor::parse("notacolor"), None);
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"feed = "/tmp/x.json""#).unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.feed, "/tmp/x.json");
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
