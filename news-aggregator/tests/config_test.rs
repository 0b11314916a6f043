mod common;

use common::*;
use news_aggregator::config::{self, RECIPIENTS_FILE, SOURCES_FILE};
use news_aggregator::{AppConfig, DEFAULT_SOURCE_WEIGHT};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_sources_accepts_rss_url_and_defaults_weight() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        SOURCES_FILE,
        r#"{"sources": [
            {"name": "MIT Technology Review", "rss_url": "https://www.technologyreview.com/feed/", "weight": 10},
            {"name": "Example", "feed_url": "https://example.com/feed"}
        ]}"#,
    );

    let sources = config::load_sources(&path);
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].feed_url, "https://www.technologyreview.com/feed/");
    assert_eq!(sources[0].weight, 10);
    assert_eq!(sources[1].weight, DEFAULT_SOURCE_WEIGHT);
}

#[test]
fn test_load_sources_skips_malformed_entries() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        SOURCES_FILE,
        r#"{"sources": [
            {"rss_url": "https://nameless.example.com/feed"},
            {"name": "FTP", "rss_url": "ftp://example.com/feed"},
            42,
            {"name": "Good", "rss_url": "https://good.example.com/feed", "weight": 8}
        ]}"#,
    );

    let sources = config::load_sources(&path);
    assert_eq!(sources.len(), 1);
    assert_eq!(sources[0].name, "Good");
}

#[test]
fn test_missing_or_broken_files_give_empty_lists() {
    let dir = TempDir::new().unwrap();
    assert!(config::load_sources(&dir.path().join(SOURCES_FILE)).is_empty());
    assert!(config::load_recipients(&dir.path().join(RECIPIENTS_FILE)).is_empty());

    let broken = write(&dir, SOURCES_FILE, "{not json");
    assert!(config::load_sources(&broken).is_empty());

    let no_key = write(&dir, RECIPIENTS_FILE, "{}");
    assert!(config::load_recipients(&no_key).is_empty());
}

#[test]
fn test_load_recipients_validates_addresses() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        RECIPIENTS_FILE,
        r#"{"recipients": ["reader@example.com", "not-an-email", 42, " padded@example.org "]}"#,
    );

    assert_eq!(
        config::load_recipients(&path),
        ["reader@example.com", "padded@example.org"]
    );
}

#[test]
fn test_app_config_load() {
    let dir = TempDir::new().unwrap();
    write(
        &dir,
        SOURCES_FILE,
        r#"{"sources": [{"name": "A", "rss_url": "https://a.example.com/feed"}]}"#,
    );
    write(&dir, RECIPIENTS_FILE, r#"{"recipients": ["reader@example.com"]}"#);

    let app_config = AppConfig::load(dir.path());
    assert_eq!(app_config.sources.len(), 1);
    assert_eq!(app_config.recipients, ["reader@example.com"]);
}

#[test]
fn test_write_default_config() {
    let dir = TempDir::new().unwrap();
    let config_dir = dir.path().join("config");

    let written = config::write_default_config(&config_dir).unwrap();
    assert_eq!(written.len(), 2);

    let app_config = AppConfig::load(&config_dir);
    assert_eq!(app_config.sources, config::default_sources());
    let weights: Vec<i32> = app_config.sources.iter().map(|s| s.weight).collect();
    assert_eq!(weights, [10, 9, 9]);
    assert_eq!(app_config.recipients, ["your-email@example.com"]);

    // existing files are left alone
    assert!(config::write_default_config(&config_dir).unwrap().is_empty());
}

#[test]
fn test_write_default_config_fills_only_missing_files() {
    let dir = TempDir::new().unwrap();
    write(&dir, SOURCES_FILE, r#"{"sources": []}"#);

    let written = config::write_default_config(dir.path()).unwrap();
    assert_eq!(written, [dir.path().join(RECIPIENTS_FILE)]);
    assert_eq!(
        fs::read_to_string(dir.path().join(SOURCES_FILE)).unwrap(),
        r#"{"sources": []}"#
    );
}

#[test]
fn test_recipients_check_runs_before_any_delivery_setup() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    write(&dir, RECIPIENTS_FILE, r#"{"recipients": []}"#);

    assert!(!AppConfig::load(dir.path()).has_recipients());

    write(&dir, RECIPIENTS_FILE, r#"{"recipients": ["reader@example.com"]}"#);
    assert!(AppConfig::load(dir.path()).has_recipients());
}
