use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub type EntryId = u64;

/// Placeholder summary left behind by preferences that format their value at runtime.
pub const SUMMARY_PLACEHOLDER: &str = "%s";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParentScreen {
    pub title: String,
    pub content_ref: String,
    pub has_preview: bool,
}

impl ParentScreen {
    pub fn new(title: &str, content_ref: &str, has_preview: bool) -> Self {
        Self {
            title: title.to_string(),
            content_ref: content_ref.to_string(),
            has_preview,
        }
    }
}

/// A single searchable setting.
///
/// Two entries are the same item when key, title, summary, breadcrumbs and
/// parent are equal. The numeric id only tracks rows across list updates.
#[derive(Debug, Clone)]
pub struct SettingsEntry {
    id: EntryId,
    key: String,
    title: String,
    summary: Option<String>,
    breadcrumbs: String,
    parent: Option<Arc<ParentScreen>>,
    folded_title: String,
}

impl SettingsEntry {
    pub fn new(id: EntryId, key: &str, title: &str) -> Self {
        Self::from_owned(id, key.to_string(), title.to_string())
    }

    pub fn from_owned(id: EntryId, key: String, title: String) -> Self {
        let folded_title = fold_case(&title);
        Self {
            id,
            key,
            title,
            summary: None,
            breadcrumbs: String::new(),
            parent: None,
            folded_title,
        }
    }

    pub fn with_summary(mut self, summary: Option<String>) -> Self {
        self.summary = summary;
        self
    }

    pub fn with_breadcrumbs(mut self, breadcrumbs: &str) -> Self {
        self.breadcrumbs = breadcrumbs.to_string();
        self
    }

    pub fn with_parent(mut self, parent: Option<Arc<ParentScreen>>) -> Self {
        self.parent = parent;
        self
    }

    pub(crate) fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn breadcrumbs(&self) -> &str {
        &self.breadcrumbs
    }

    pub fn parent(&self) -> Option<&ParentScreen> {
        self.parent.as_deref()
    }

    pub fn folded_title(&self) -> &str {
        &self.folded_title
    }

    /// Summary text worth showing, if any.
    pub fn visible_summary(&self) -> Option<&str> {
        self.summary()
            .filter(|summary| !summary.is_empty() && *summary != SUMMARY_PLACEHOLDER)
    }

    pub fn visible_breadcrumbs(&self) -> Option<&str> {
        if self.breadcrumbs.is_empty() {
            None
        } else {
            Some(&self.breadcrumbs)
        }
    }
}

impl PartialEq for SettingsEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.title == other.title
            && self.summary == other.summary
            && self.breadcrumbs == other.breadcrumbs
            && self.parent == other.parent
    }
}

impl Eq for SettingsEntry {}

impl Hash for SettingsEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
        self.title.hash(state);
        self.summary.hash(state);
        self.breadcrumbs.hash(state);
        self.parent.hash(state);
    }
}

pub fn fold_case(input: &str) -> String {
    input.to_lowercase()
}
