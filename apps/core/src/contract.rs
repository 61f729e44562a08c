use serde::{Deserialize, Serialize};

use crate::diff::EditOp;
use crate::model::SettingsEntry;
use crate::presentation::RowView;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParentContext {
    pub title: String,
    pub content_ref: String,
    pub has_preview: bool,
}

/// Where a tapped row should take the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NavigationRequest {
    pub key: String,
    pub parent: Option<ParentContext>,
}

impl NavigationRequest {
    pub fn for_entry(entry: &SettingsEntry) -> Self {
        Self {
            key: entry.key().to_string(),
            parent: entry.parent().map(|parent| ParentContext {
                title: parent.title.clone(),
                content_ref: parent.content_ref.clone(),
                has_preview: parent.has_preview,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryChangeRequest {
    pub query: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectRequest {
    pub position: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsResponse {
    pub query: String,
    pub changed: bool,
    pub rows: Vec<RowView>,
    pub edits: Vec<EditOp<RowView>>,
    pub results_visible: bool,
    pub no_results_visible: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ScreenRequest {
    QueryChange(QueryChangeRequest),
    Submit(SubmitRequest),
    Select(SelectRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum ScreenResponse {
    Results(ResultsResponse),
    Submitted,
    Navigate(NavigationRequest),
}
