use serde::{Deserialize, Serialize};

use crate::diff::{ApplyError, EditOp, EditScript};
use crate::model::{EntryId, SettingsEntry};

/// What a result row displays. Hidden fields are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowView {
    pub id: EntryId,
    pub title: String,
    pub summary: Option<String>,
    pub breadcrumbs: Option<String>,
}

impl RowView {
    pub fn bind(entry: &SettingsEntry) -> Self {
        Self {
            id: entry.id(),
            title: entry.title().to_string(),
            summary: entry.visible_summary().map(str::to_string),
            breadcrumbs: entry.visible_breadcrumbs().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visibility {
    pub results_visible: bool,
    pub no_results_visible: bool,
}

impl Visibility {
    pub fn for_results(query: &str, matches: &[SettingsEntry]) -> Self {
        Self {
            results_visible: !matches.is_empty() || query.is_empty(),
            no_results_visible: matches.is_empty() && !query.is_empty(),
        }
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::for_results("", &[])
    }
}

/// Renders the result list. Implementations receive every script the
/// screen computes, in order, and must apply it against what they show.
pub trait PresentationSurface {
    fn apply_edits(&mut self, script: &EditScript<SettingsEntry>);
    fn set_visibility(&mut self, visibility: Visibility);
}

/// Headless surface that keeps bound rows in memory.
#[derive(Debug, Default)]
pub struct ListSurface {
    rows: Vec<RowView>,
    visibility: Visibility,
    applied_scripts: usize,
    last_error: Option<ApplyError>,
}

impl ListSurface {
    pub fn rows(&self) -> &[RowView] {
        &self.rows
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn applied_scripts(&self) -> usize {
        self.applied_scripts
    }

    pub fn last_error(&self) -> Option<&ApplyError> {
        self.last_error.as_ref()
    }

    pub fn row_ids(&self) -> Vec<EntryId> {
        self.rows.iter().map(|row| row.id).collect()
    }
}

impl PresentationSurface for ListSurface {
    fn apply_edits(&mut self, script: &EditScript<SettingsEntry>) {
        self.applied_scripts += 1;
        let rows = script.map(RowView::bind);
        if let Err(error) = rows.apply_to(&mut self.rows) {
            crate::logging::error(&format!("list surface rejected edit script: {error}"));
            self.last_error = Some(error);
        }
    }

    fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = visibility;
    }
}

/// Script steps with inserted entries bound to rows, for forwarding over the wire.
pub fn bound_edits(script: &EditScript<SettingsEntry>) -> Vec<EditOp<RowView>> {
    script.map(RowView::bind).into_ops()
}
