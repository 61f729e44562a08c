use std::fmt::{Display, Formatter};

use crate::contract::NavigationRequest;
use crate::diff::{self, EditScript};
use crate::index::SearchIndex;
use crate::model::SettingsEntry;
use crate::presentation::{PresentationSurface, Visibility};
use crate::search;

/// Receives navigation requests produced by row taps.
pub trait Navigator {
    fn navigate(&mut self, request: NavigationRequest);
}

/// Soft keyboard and focus handling of the host window.
pub trait Keyboard {
    type Focus;

    /// The focused element, if the window has one.
    fn current_focus(&self) -> Option<Self::Focus>;
    fn hide_soft_input(&mut self, focus: &Self::Focus);
    fn focus_results(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    SelectionOutOfRange { position: usize, len: usize },
}

impl Display for ScreenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectionOutOfRange { position, len } => {
                write!(f, "selected position {position} outside {len} results")
            }
        }
    }
}

impl std::error::Error for ScreenError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Query equal to the last applied one; nothing was recomputed.
    Unchanged,
    Applied {
        script: EditScript<SettingsEntry>,
        visibility: Visibility,
    },
}

/// Search screen state: the entry index, the last applied query and the list
/// currently shown on the surface.
pub struct SearchScreen<P: PresentationSurface> {
    index: SearchIndex,
    surface: P,
    current_query: String,
    displayed: Vec<SettingsEntry>,
    visibility: Visibility,
}

impl<P: PresentationSurface> SearchScreen<P> {
    pub fn new(index: SearchIndex, mut surface: P) -> Self {
        let visibility = Visibility::default();
        surface.set_visibility(visibility);
        Self {
            index,
            surface,
            current_query: String::new(),
            displayed: Vec::new(),
            visibility,
        }
    }

    pub fn index(&self) -> &SearchIndex {
        &self.index
    }

    pub fn surface(&self) -> &P {
        &self.surface
    }

    pub fn current_query(&self) -> &str {
        &self.current_query
    }

    pub fn displayed(&self) -> &[SettingsEntry] {
        &self.displayed
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    /// Text-change callback. Absent text counts as an empty query.
    pub fn on_query_text_change(&mut self, new_text: Option<&str>) -> bool {
        self.apply_query(new_text.unwrap_or_default());
        true
    }

    /// Submitting does nothing beyond what typing already did.
    pub fn on_query_text_submit(&mut self, _query: &str) -> bool {
        true
    }

    pub fn apply_query(&mut self, query: &str) -> QueryOutcome {
        if query == self.current_query {
            return QueryOutcome::Unchanged;
        }
        self.current_query = query.to_string();

        let matches = search::filter(self.index.entries(), query);
        let visibility = Visibility::for_results(query, &matches);
        let script = diff::diff(&self.displayed, &matches);

        self.surface.apply_edits(&script);
        crate::logging::info(&format!(
            "query applied matches={} inserts={} removes={} moves={}",
            matches.len(),
            script.insert_count(),
            script.remove_count(),
            script.move_count()
        ));
        self.displayed = matches;

        self.visibility = visibility;
        self.surface.set_visibility(visibility);

        QueryOutcome::Applied { script, visibility }
    }

    pub fn select(&self, position: usize) -> Result<NavigationRequest, ScreenError> {
        self.displayed
            .get(position)
            .map(NavigationRequest::for_entry)
            .ok_or(ScreenError::SelectionOutOfRange {
                position,
                len: self.displayed.len(),
            })
    }

    pub fn on_item_selected<N: Navigator>(
        &self,
        position: usize,
        navigator: &mut N,
    ) -> Result<(), ScreenError> {
        let request = self.select(position)?;
        navigator.navigate(request);
        Ok(())
    }

    /// Scrolling the results hides the keyboard. Returns whether it was hidden.
    pub fn on_scrolled<K: Keyboard>(&self, dy: i32, keyboard: &mut K) -> bool {
        if dy == 0 {
            return false;
        }
        dismiss_keyboard(keyboard)
    }
}

pub fn dismiss_keyboard<K: Keyboard>(keyboard: &mut K) -> bool {
    let Some(focus) = keyboard.current_focus() else {
        crate::logging::warn("keyboard dismissal skipped: nothing has focus");
        return false;
    };
    keyboard.hide_soft_input(&focus);
    keyboard.focus_results();
    true
}
