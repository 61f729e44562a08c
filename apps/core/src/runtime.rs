use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::catalog::{self, CatalogError};
use crate::config::{self, Config, ConfigError};
use crate::index::SearchIndex;
use crate::index_store::{self, StoreError};
use crate::presentation::ListSurface;
use crate::screen::SearchScreen;
use crate::transport;

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    Catalog(CatalogError),
    Store(StoreError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Catalog(error) => write!(f, "catalog error: {error}"),
            Self::Store(error) => write!(f, "index store error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<CatalogError> for RuntimeError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub catalog_paths: Vec<PathBuf>,
    pub rebuild_index: bool,
}

impl RuntimeOptions {
    /// Catalogs named on the command line never reuse a cache built elsewhere.
    pub fn forces_rebuild(&self) -> bool {
        self.rebuild_index || !self.catalog_paths.is_empty()
    }
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--catalog" => {
                let value = iter.next().ok_or("--catalog requires a path")?;
                options.catalog_paths.push(PathBuf::from(value));
            }
            "--rebuild-index" => options.rebuild_index = true,
            other => return Err(format!("unknown argument '{other}'")),
        }
    }
    Ok(options)
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let mut config = config::load(options.config_path.as_deref())?;
    if !options.catalog_paths.is_empty() {
        config.catalog_paths = options.catalog_paths.clone();
    }

    if let Err(error) = crate::logging::init() {
        eprintln!("[settings-search] logging disabled: {error}");
    }
    crate::logging::info(&format!(
        "startup config_path={} index_db_path={} catalogs={}",
        config.config_path.display(),
        config.index_db_path.display(),
        config.catalog_paths.len()
    ));

    let index = load_index(&config, options.forces_rebuild())?;
    crate::logging::info(&format!("startup indexed_entries={}", index.len()));

    let mut screen = SearchScreen::new(index, ListSurface::default());
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    serve_lines(&mut screen, stdin.lock(), &mut stdout)?;
    crate::logging::info("session closed");
    Ok(())
}

/// Index from the cache when allowed, populated and built from the configured
/// catalog roots, otherwise from the catalogs (refreshing the cache afterwards).
pub fn load_index(config: &Config, rebuild: bool) -> Result<SearchIndex, RuntimeError> {
    if !config.use_index_cache {
        return Ok(catalog::load_catalogs(&config.catalog_paths)?.build_index()?);
    }

    let mut db = index_store::open_from_config(config)?;
    if !rebuild && index_store::entry_count(&db)? > 0 {
        let expected = index_store::catalog_fingerprint(&config.catalog_paths);
        let stored = index_store::stored_catalog_fingerprint(&db)?;
        if stored.as_deref() == Some(expected.as_str()) {
            return Ok(index_store::load_index(&db)?);
        }
        crate::logging::info("index cache built from other catalogs, rebuilding");
    }

    let index = catalog::load_catalogs(&config.catalog_paths)?.build_index()?;
    index_store::save_index(&mut db, &index, &config.catalog_paths)?;
    Ok(index)
}

/// One JSON request per input line, one JSON response per output line.
pub fn serve_lines<R: BufRead, W: Write>(
    screen: &mut SearchScreen<ListSurface>,
    input: R,
    output: &mut W,
) -> Result<(), RuntimeError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let response = transport::handle_json(screen, &line);
        writeln!(output, "{response}")?;
        output.flush()?;
    }
    Ok(())
}
