use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of an entry. Two entries with the same id are the same logical entry, even across
/// refreshes that replace every `Entry` value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntryId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single list item as delivered by an entry source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Entry {
    pub id: EntryId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub marked: bool,
    /// Set by the source for entries it has not delivered before; cleared once announced.
    #[serde(default, rename = "new")]
    pub is_new: bool,
    #[serde(skip)]
    pub selected: bool,
}

impl Entry {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: EntryId::new(id),
            title: title.into(),
            link: None,
            tags: Vec::new(),
            read: false,
            marked: false,
            is_new: false,
            selected: false,
        }
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    #[must_use]
    pub fn with_read(mut self) -> Self {
        self.read = true;
        self
    }

    #[must_use]
    pub fn with_new(mut self) -> Self {
        self.is_new = true;
        self
    }

    pub fn is_unread(&self) -> bool {
        !self.read
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}
