use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use settings_search_core::config::{self, Config, ConfigError};

fn unique_dir(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!(
        "settings-search-{label}-{}-{unique}",
        std::process::id()
    ))
}

#[test]
fn accepts_default_config() {
    let cfg = Config::default();
    assert!(cfg.use_index_cache);
    assert_eq!(cfg.catalog_paths.len(), 1);
    assert!(cfg.index_db_path.to_string_lossy().contains("settings-search"));
    assert!(cfg.config_path.to_string_lossy().contains("settings-search"));
    assert!(config::validate(&cfg).is_ok());
}

#[test]
fn rejects_missing_catalogs() {
    let cfg = Config {
        catalog_paths: Vec::new(),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn rejects_empty_index_path() {
    let cfg = Config {
        index_db_path: PathBuf::new(),
        ..Default::default()
    };
    assert!(config::validate(&cfg).is_err());
}

#[test]
fn missing_file_yields_defaults_at_that_path() {
    let path = unique_dir("missing").join("config.toml");
    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.config_path, path);
    assert_eq!(cfg.catalog_paths, Config::default().catalog_paths);
}

#[test]
fn loads_toml_config() {
    let dir = unique_dir("toml");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(
        &path,
        "catalog_paths = [\"/opt/catalogs\"]\nindex_db_path = \"/tmp/idx.sqlite3\"\nuse_index_cache = false\n",
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.catalog_paths, vec![PathBuf::from("/opt/catalogs")]);
    assert_eq!(cfg.index_db_path, PathBuf::from("/tmp/idx.sqlite3"));
    assert!(!cfg.use_index_cache);
    assert_eq!(cfg.config_path, path);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn loads_json5_config_with_comments() {
    let dir = unique_dir("json5");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.json5");
    std::fs::write(
        &path,
        "{\n  // cache stays on\n  catalog_paths: ['/srv/catalogs'],\n  use_index_cache: true,\n}\n",
    )
    .unwrap();

    let cfg = config::load(Some(&path)).unwrap();
    assert_eq!(cfg.catalog_paths, vec![PathBuf::from("/srv/catalogs")]);
    assert!(cfg.use_index_cache);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn reports_parse_errors() {
    let dir = unique_dir("broken");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "catalog_paths = [").unwrap();

    let result = config::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Parse(_))));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn saved_config_loads_back() {
    let dir = unique_dir("save");
    let cfg = Config {
        catalog_paths: vec![dir.join("catalog")],
        index_db_path: dir.join("index.sqlite3"),
        use_index_cache: false,
        config_path: dir.join("config.toml"),
    };

    config::save(&cfg).unwrap();
    let loaded = config::load(Some(&cfg.config_path)).unwrap();
    assert_eq!(loaded, cfg);

    std::fs::remove_dir_all(&dir).unwrap();
}
