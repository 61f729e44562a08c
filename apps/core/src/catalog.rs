use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::index::{IndexBuilder, IndexError, SearchIndex};
use crate::model::{ParentScreen, SettingsEntry};

pub const BREADCRUMB_SEPARATOR: &str = " > ";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub entries: Vec<EntryDef>,
    pub screens: Vec<ScreenDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenDef {
    pub title: String,
    pub content_ref: String,
    pub has_preview: bool,
    pub entries: Vec<EntryDef>,
    pub screens: Vec<ScreenDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryDef {
    pub key: String,
    pub title: String,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json5,
    Json,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Some(Self::Toml),
            "json5" => Some(Self::Json5),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Read { path: PathBuf, message: String },
    Parse { path: PathBuf, message: String },
    UnsupportedFormat(PathBuf),
    InvalidEntry { location: String, reason: String },
    Index(IndexError),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, message } => {
                write!(f, "read failed for '{}': {message}", path.display())
            }
            Self::Parse { path, message } => {
                write!(f, "invalid catalog '{}': {message}", path.display())
            }
            Self::UnsupportedFormat(path) => {
                write!(f, "unsupported catalog format: {}", path.display())
            }
            Self::InvalidEntry { location, reason } => {
                write!(f, "invalid entry at {location}: {reason}")
            }
            Self::Index(error) => write!(f, "index error: {error}"),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<IndexError> for CatalogError {
    fn from(value: IndexError) -> Self {
        Self::Index(value)
    }
}

pub fn parse_catalog(raw: &str, format: CatalogFormat) -> Result<Catalog, String> {
    match format {
        CatalogFormat::Toml => toml::from_str(raw).map_err(|e| e.to_string()),
        CatalogFormat::Json5 => json5::from_str(raw).map_err(|e| e.to_string()),
        CatalogFormat::Json => serde_json::from_str(raw).map_err(|e| e.to_string()),
    }
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let format = CatalogFormat::from_path(path)
        .ok_or_else(|| CatalogError::UnsupportedFormat(path.to_path_buf()))?;
    let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    parse_catalog(&raw, format).map_err(|message| CatalogError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Catalog files under `path`, sorted by name. A file path is returned as is.
pub fn discover_catalog_paths(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }
    if !path.is_dir() {
        crate::logging::warn(&format!("catalog root missing path={}", path.display()));
        return Vec::new();
    }

    WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(error) => {
                crate::logging::warn(&format!(
                    "catalog walk skipped root={} error={error}",
                    path.display()
                ));
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|entry_path| CatalogFormat::from_path(entry_path).is_some())
        .collect()
}

/// Loads and merges every catalog reachable from `roots`, in order.
pub fn load_catalogs(roots: &[PathBuf]) -> Result<Catalog, CatalogError> {
    let mut merged = Catalog::default();
    for root in roots {
        for path in discover_catalog_paths(root) {
            let catalog = load_catalog(&path)?;
            crate::logging::info(&format!(
                "catalog loaded path={} entries={} screens={}",
                path.display(),
                catalog.entries.len(),
                catalog.screens.len()
            ));
            merged.merge(catalog);
        }
    }
    Ok(merged)
}

impl Catalog {
    pub fn merge(&mut self, other: Catalog) {
        self.entries.extend(other.entries);
        self.screens.extend(other.screens);
    }

    /// Flattens the catalog into an index: root entries first, then each
    /// screen's entries followed by its sub-screens, depth first.
    pub fn build_index(&self) -> Result<SearchIndex, CatalogError> {
        let mut builder = IndexBuilder::new();
        for (position, entry) in self.entries.iter().enumerate() {
            let location = format!("entries[{position}]");
            builder.push(entry_from_def(entry, &location, "", None)?);
        }

        let mut trail = Vec::new();
        for (position, screen) in self.screens.iter().enumerate() {
            let location = format!("screens[{position}]");
            append_screen(&mut builder, screen, &location, &mut trail)?;
        }

        Ok(builder.build()?)
    }
}

fn append_screen(
    builder: &mut IndexBuilder,
    screen: &ScreenDef,
    location: &str,
    trail: &mut Vec<String>,
) -> Result<(), CatalogError> {
    let title = screen.title.trim();
    if title.is_empty() {
        return Err(CatalogError::InvalidEntry {
            location: location.to_string(),
            reason: "screen title is required".to_string(),
        });
    }

    let parent = Arc::new(ParentScreen::new(
        title,
        screen.content_ref.trim(),
        screen.has_preview,
    ));
    trail.push(title.to_string());
    let breadcrumbs = trail.join(BREADCRUMB_SEPARATOR);

    for (position, entry) in screen.entries.iter().enumerate() {
        let entry_location = format!("{location}.entries[{position}]");
        builder.push(entry_from_def(
            entry,
            &entry_location,
            &breadcrumbs,
            Some(Arc::clone(&parent)),
        )?);
    }

    for (position, child) in screen.screens.iter().enumerate() {
        let child_location = format!("{location}.screens[{position}]");
        append_screen(builder, child, &child_location, trail)?;
    }

    trail.pop();
    Ok(())
}

fn entry_from_def(
    entry: &EntryDef,
    location: &str,
    breadcrumbs: &str,
    parent: Option<Arc<ParentScreen>>,
) -> Result<SettingsEntry, CatalogError> {
    let key = entry.key.trim();
    let title = entry.title.trim();
    if key.is_empty() {
        return Err(CatalogError::InvalidEntry {
            location: location.to_string(),
            reason: "entry key is required".to_string(),
        });
    }
    if title.is_empty() {
        return Err(CatalogError::InvalidEntry {
            location: location.to_string(),
            reason: format!("entry '{key}' has no title"),
        });
    }

    Ok(SettingsEntry::new(0, key, title)
        .with_summary(entry.summary.clone())
        .with_breadcrumbs(breadcrumbs)
        .with_parent(parent))
}
