use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::config::Config;
use crate::index::{IndexError, SearchIndex};
use crate::model::{EntryId, ParentScreen, SettingsEntry};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS entry (
    position INTEGER PRIMARY KEY,
    id INTEGER NOT NULL UNIQUE,
    key TEXT NOT NULL,
    title TEXT NOT NULL,
    summary TEXT,
    breadcrumbs TEXT NOT NULL,
    parent_title TEXT,
    parent_content_ref TEXT,
    parent_has_preview INTEGER
);
CREATE TABLE IF NOT EXISTS meta (
    name TEXT PRIMARY KEY,
    value TEXT NOT NULL
);";

const CATALOG_ROOTS_KEY: &str = "catalog_roots";

#[derive(Debug)]
pub enum StoreError {
    Sql(rusqlite::Error),
    Io(std::io::Error),
    Index(IndexError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sql(error) => write!(f, "sqlite error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
            Self::Index(error) => write!(f, "stored index is invalid: {error}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<IndexError> for StoreError {
    fn from(value: IndexError) -> Self {
        Self::Index(value)
    }
}

pub fn open_memory() -> Result<Connection, StoreError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

pub fn open_file(path: &Path) -> Result<Connection, StoreError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let conn = Connection::open(path)?;
    conn.execute_batch(SCHEMA)?;
    Ok(conn)
}

pub fn open_from_config(cfg: &Config) -> Result<Connection, StoreError> {
    open_file(&cfg.index_db_path)
}

/// Replaces the stored index with `index`, keeping order and ids, and records
/// the catalog roots it was built from.
pub fn save_index(
    db: &mut Connection,
    index: &SearchIndex,
    catalog_roots: &[PathBuf],
) -> Result<(), StoreError> {
    let tx = db.transaction()?;
    tx.execute("DELETE FROM entry", [])?;
    tx.execute(
        "INSERT INTO meta (name, value) VALUES (?1, ?2)
         ON CONFLICT(name) DO UPDATE SET value=excluded.value",
        params![CATALOG_ROOTS_KEY, catalog_fingerprint(catalog_roots)],
    )?;
    {
        let mut stmt = tx.prepare(
            "INSERT INTO entry (position, id, key, title, summary, breadcrumbs,
                parent_title, parent_content_ref, parent_has_preview)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for (position, entry) in index.entries().iter().enumerate() {
            let parent = entry.parent();
            stmt.execute(params![
                position as i64,
                entry.id() as i64,
                entry.key(),
                entry.title(),
                entry.summary(),
                entry.breadcrumbs(),
                parent.map(|p| p.title.as_str()),
                parent.map(|p| p.content_ref.as_str()),
                parent.map(|p| p.has_preview),
            ])?;
        }
    }
    tx.commit()?;
    Ok(())
}

pub fn load_index(db: &Connection) -> Result<SearchIndex, StoreError> {
    let mut stmt = db.prepare(
        "SELECT id, key, title, summary, breadcrumbs,
                parent_title, parent_content_ref, parent_has_preview
         FROM entry ORDER BY position",
    )?;
    let mut rows = stmt.query([])?;

    let mut parents: HashMap<ParentScreen, Arc<ParentScreen>> = HashMap::new();
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        let parent = read_parent(row)?.map(|screen| {
            Arc::clone(
                parents
                    .entry(screen.clone())
                    .or_insert_with(|| Arc::new(screen)),
            )
        });
        let id: i64 = row.get(0)?;
        let key: String = row.get(1)?;
        let title: String = row.get(2)?;
        let summary: Option<String> = row.get(3)?;
        let breadcrumbs: String = row.get(4)?;
        entries.push(
            SettingsEntry::from_owned(id as EntryId, key, title)
                .with_summary(summary)
                .with_breadcrumbs(&breadcrumbs)
                .with_parent(parent),
        );
    }

    Ok(SearchIndex::from_entries(entries)?)
}

pub fn entry_count(db: &Connection) -> Result<usize, StoreError> {
    let count: i64 = db.query_row("SELECT COUNT(*) FROM entry", [], |row| row.get(0))?;
    Ok(count.max(0) as usize)
}

/// Catalog roots recorded by the last `save_index`, in fingerprint form.
pub fn stored_catalog_fingerprint(db: &Connection) -> Result<Option<String>, StoreError> {
    let value = db
        .query_row(
            "SELECT value FROM meta WHERE name = ?1",
            params![CATALOG_ROOTS_KEY],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn catalog_fingerprint(catalog_roots: &[PathBuf]) -> String {
    catalog_roots
        .iter()
        .map(|root| root.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn read_parent(row: &Row<'_>) -> Result<Option<ParentScreen>, rusqlite::Error> {
    let title: Option<String> = row.get(5)?;
    let Some(title) = title else {
        return Ok(None);
    };
    let content_ref: Option<String> = row.get(6)?;
    let has_preview: Option<bool> = row.get(7)?;
    Ok(Some(ParentScreen {
        title,
        content_ref: content_ref.unwrap_or_default(),
        has_preview: has_preview.unwrap_or(false),
    }))
}
