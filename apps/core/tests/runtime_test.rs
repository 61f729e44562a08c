use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use settings_search_core::config::Config;
use settings_search_core::index::SearchIndex;
use settings_search_core::presentation::ListSurface;
use settings_search_core::runtime::{load_index, parse_cli_args, serve_lines, RuntimeOptions};
use settings_search_core::screen::SearchScreen;
use settings_search_core::transport::TransportResponse;

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

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

fn config_in(dir: &Path) -> Config {
    Config {
        catalog_paths: vec![dir.join("catalog")],
        index_db_path: dir.join("index.sqlite3"),
        use_index_cache: true,
        config_path: dir.join("config.toml"),
    }
}

#[test]
fn parses_cli_flags() {
    let options = parse_cli_args(&args(&[
        "--config",
        "/etc/search.toml",
        "--catalog",
        "/a",
        "--catalog",
        "/b",
        "--rebuild-index",
    ]))
    .unwrap();

    assert_eq!(
        options,
        RuntimeOptions {
            config_path: Some(PathBuf::from("/etc/search.toml")),
            catalog_paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            rebuild_index: true,
        }
    );
}

#[test]
fn rejects_unknown_or_incomplete_flags() {
    assert!(parse_cli_args(&args(&["--verbose"])).is_err());
    assert!(parse_cli_args(&args(&["--config"])).is_err());
}

#[test]
fn index_cache_is_filled_then_reused() {
    let dir = unique_dir("runtime-cache");
    let catalog_dir = dir.join("catalog");
    std::fs::create_dir_all(&catalog_dir).unwrap();
    let catalog_file = catalog_dir.join("desktop.toml");
    std::fs::write(
        &catalog_file,
        "[[entries]]\nkey = \"pref_iconPack\"\ntitle = \"Icon Pack\"\n",
    )
    .unwrap();
    let cfg = config_in(&dir);

    let first = load_index(&cfg, false).unwrap();
    assert_eq!(first.len(), 1);

    std::fs::write(
        &catalog_file,
        "[[entries]]\nkey = \"pref_theme\"\ntitle = \"Theme\"\n",
    )
    .unwrap();
    let cached = load_index(&cfg, false).unwrap();
    assert_eq!(cached.entries()[0].key(), "pref_iconPack");

    let rebuilt = load_index(&cfg, true).unwrap();
    assert_eq!(rebuilt.entries()[0].key(), "pref_theme");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn switching_catalog_paths_rebuilds_cache() {
    let dir = unique_dir("runtime-switch");
    let alpha_dir = dir.join("a");
    let beta_dir = dir.join("b");
    std::fs::create_dir_all(&alpha_dir).unwrap();
    std::fs::create_dir_all(&beta_dir).unwrap();
    std::fs::write(
        alpha_dir.join("alpha.toml"),
        "[[entries]]\nkey = \"pref_alpha\"\ntitle = \"Alpha\"\n",
    )
    .unwrap();
    std::fs::write(
        beta_dir.join("beta.toml"),
        "[[entries]]\nkey = \"pref_beta\"\ntitle = \"Beta\"\n",
    )
    .unwrap();

    let mut cfg = config_in(&dir);
    cfg.catalog_paths = vec![alpha_dir];
    let first = load_index(&cfg, false).unwrap();
    assert_eq!(first.entries()[0].title(), "Alpha");

    cfg.catalog_paths = vec![beta_dir];
    let switched = load_index(&cfg, false).unwrap();
    assert_eq!(switched.len(), 1);
    assert_eq!(switched.entries()[0].title(), "Beta");

    let reused = load_index(&cfg, false).unwrap();
    assert_eq!(reused.entries()[0].title(), "Beta");

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn explicit_catalogs_force_rebuild() {
    assert!(!RuntimeOptions::default().forces_rebuild());

    let from_flag = parse_cli_args(&args(&["--rebuild-index"])).unwrap();
    assert!(from_flag.forces_rebuild());

    let from_catalog = parse_cli_args(&args(&["--catalog", "/a"])).unwrap();
    assert!(from_catalog.forces_rebuild());
}

#[test]
fn serves_one_response_per_request_line() {
    let mut screen = SearchScreen::new(SearchIndex::default(), ListSurface::default());
    let input = Cursor::new(
        "{\"kind\":\"query_change\",\"payload\":{\"query\":\"dock\"}}\n\n{broken\n",
    );
    let mut output = Vec::new();

    serve_lines(&mut screen, input, &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(matches!(
        serde_json::from_str::<TransportResponse>(lines[0]).unwrap(),
        TransportResponse::Ok { .. }
    ));
    assert!(matches!(
        serde_json::from_str::<TransportResponse>(lines[1]).unwrap(),
        TransportResponse::Err { .. }
    ));
}
