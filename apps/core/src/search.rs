use crate::model::{fold_case, SettingsEntry};

/// Entries whose title contains `query`, ignoring case, in index order.
///
/// An empty query matches nothing. Whitespace in the query is matched literally.
pub fn filter(entries: &[SettingsEntry], query: &str) -> Vec<SettingsEntry> {
    if query.is_empty() || entries.is_empty() {
        return Vec::new();
    }

    let folded_query = fold_case(query);
    entries
        .iter()
        .filter(|entry| title_matches(entry, &folded_query))
        .cloned()
        .collect()
}

fn title_matches(entry: &SettingsEntry, folded_query: &str) -> bool {
    entry.folded_title().contains(folded_query)
}
