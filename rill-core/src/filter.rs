use crate::entry::Entry;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Built-in named filters. An entry failing the active filter renders zero lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    All,
    Unread,
    Read,
    Marked,
    Unmarked,
}

impl Filter {
    pub const fn all() -> &'static [Filter] {
        &[
            Filter::All,
            Filter::Unread,
            Filter::Read,
            Filter::Marked,
            Filter::Unmarked,
        ]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Unread => "unread",
            Filter::Read => "read",
            Filter::Marked => "marked",
            Filter::Unmarked => "unmarked",
        }
    }

    pub fn admits(self, entry: &Entry) -> bool {
        match self {
            Filter::All => true,
            Filter::Unread => !entry.read,
            Filter::Read => entry.read,
            Filter::Marked => entry.marked,
            Filter::Unmarked => !entry.marked,
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::all()
            .iter()
            .find(|f| f.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let known: Vec<_> = Filter::all().iter().map(|f| f.as_str()).collect();
                format!("Unknown filter '{s}' (expected one of: {})", known.join(", "))
            })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Filter::from_str(&s).map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// An ordered list of filters with a bounded cursor. Stepping past either end is refused
/// rather than wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCycle {
    filters: Vec<Filter>,
    index: usize,
}

impl Default for FilterCycle {
    fn default() -> Self {
        Self::new(vec![Filter::All])
    }
}

impl FilterCycle {
    /// An empty list falls back to `[all]`.
    pub fn new(filters: Vec<Filter>) -> Self {
        let filters = if filters.is_empty() {
            vec![Filter::All]
        } else {
            filters
        };
        Self { filters, index: 0 }
    }

    pub fn current(&self) -> Filter {
        self.filters[self.index]
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Move one step; returns whether the active filter changed.
    pub fn step(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward if self.index + 1 < self.filters.len() => {
                self.index += 1;
                true
            }
            Direction::Backward if self.index > 0 => {
                self.index -= 1;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_admits() {
        let unread = Entry::new("a", "A");
        let mut read_marked = Entry::new("b", "B").with_read();
        read_marked.marked = true;

        assert!(Filter::All.admits(&unread));
        assert!(Filter::Unread.admits(&unread));
        assert!(!Filter::Unread.admits(&read_marked));
        assert!(Filter::Read.admits(&read_marked));
        assert!(Filter::Marked.admits(&read_marked));
        assert!(!Filter::Marked.admits(&unread));
        assert!(Filter::Unmarked.admits(&unread));
    }

    #[test]
    fn test_filter_from_str() {
        assert_eq!(Filter::from_str("unread").unwrap(), Filter::Unread);
        let err = Filter::from_str("starred").unwrap_err();
        assert!(err.contains("starred"), "Error was: {err}");
    }

    #[test]
    fn test_cycle_is_bounded() {
        let mut cycle = FilterCycle::new(vec![Filter::All, Filter::Unread]);
        assert_eq!(cycle.current(), Filter::All);
        assert!(!cycle.step(Direction::Backward));
        assert!(cycle.step(Direction::Forward));
        assert_eq!(cycle.current(), Filter::Unread);
        assert!(!cycle.step(Direction::Forward));
        assert_eq!(cycle.current(), Filter::Unread);
        assert!(cycle.step(Direction::Backward));
        assert_eq!(cycle.current(), Filter::All);
    }

    #[test]
    fn test_empty_cycle_defaults_to_all() {
        let cycle = FilterCycle::new(Vec::new());
        assert_eq!(cycle.filters(), &[Filter::All]);
    }
}
