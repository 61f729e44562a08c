use std::collections::HashSet;
use std::fmt::{Display, Formatter};

use crate::model::{EntryId, SettingsEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    EmptyTitle { key: String },
    DuplicateId(EntryId),
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle { key } => write!(f, "entry '{key}' has an empty title"),
            Self::DuplicateId(id) => write!(f, "entry id {id} is used more than once"),
        }
    }
}

impl std::error::Error for IndexError {}

/// Ordered, immutable set of searchable settings. Built once per screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchIndex {
    entries: Vec<SettingsEntry>,
}

impl SearchIndex {
    /// Keeps the ids already carried by `entries`.
    pub fn from_entries(entries: Vec<SettingsEntry>) -> Result<Self, IndexError> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.title().is_empty() {
                return Err(IndexError::EmptyTitle {
                    key: entry.key().to_string(),
                });
            }
            if !seen.insert(entry.id()) {
                return Err(IndexError::DuplicateId(entry.id()));
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[SettingsEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: EntryId) -> Option<&SettingsEntry> {
        self.entries.iter().find(|entry| entry.id() == id)
    }
}

/// Collects entries in display order and numbers them.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    entries: Vec<SettingsEntry>,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: SettingsEntry) -> EntryId {
        let id = self.entries.len() as EntryId;
        self.entries.push(entry.with_id(id));
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn build(self) -> Result<SearchIndex, IndexError> {
        SearchIndex::from_entries(self.entries)
    }
}
