use crate::types::{Result, Source};
use crate::utils;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub const SOURCES_FILE: &str = "sources.json";
pub const RECIPIENTS_FILE: &str = "recipients.json";

#[derive(Debug, Serialize, Deserialize)]
struct SourcesFile<T> {
    #[serde(default = "Vec::new")]
    sources: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize)]
struct RecipientsFile<T> {
    #[serde(default = "Vec::new")]
    recipients: Vec<T>,
}

/// Sources and recipients for one run.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub sources: Vec<Source>,
    pub recipients: Vec<String>,
}

impl AppConfig {
    pub fn load(config_dir: &Path) -> Self {
        let config = Self {
            sources: load_sources(&config_dir.join(SOURCES_FILE)),
            recipients: load_recipients(&config_dir.join(RECIPIENTS_FILE)),
        };
        info!(
            "Loaded {} sources and {} recipients from {}",
            config.sources.len(),
            config.recipients.len(),
            config_dir.display()
        );
        config
    }

    /// False, with an error logged, when there is nobody to send to.
    pub fn has_recipients(&self) -> bool {
        if self.recipients.is_empty() {
            error!("No recipients configured!");
            return false;
        }
        true
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Usable sources from `path`. A missing or unreadable file gives an empty
/// list; individual bad entries are skipped.
pub fn load_sources(path: &Path) -> Vec<Source> {
    let file: SourcesFile<serde_json::Value> = match read_json(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Could not load sources from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    file.sources
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Source>(value) {
            Ok(source) if utils::url::is_http_url(&source.feed_url) => Some(source),
            Ok(source) => {
                warn!(source = %source.name, "Skipping source with invalid feed URL: {}", source.feed_url);
                None
            }
            Err(e) => {
                warn!("Skipping malformed source entry in {}: {}", path.display(), e);
                None
            }
        })
        .collect()
}

/// Valid recipient addresses from `path`, same leniency as `load_sources`.
pub fn load_recipients(path: &Path) -> Vec<String> {
    let file: RecipientsFile<serde_json::Value> = match read_json(path) {
        Ok(file) => file,
        Err(e) => {
            warn!("Could not load recipients from {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    file.recipients
        .into_iter()
        .filter_map(|value| match value.as_str().map(str::trim) {
            Some(address) if utils::email::is_valid_address(address) => Some(address.to_string()),
            _ => {
                warn!("Skipping invalid recipient in {}: {}", path.display(), value);
                None
            }
        })
        .collect()
}

pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "MIT Technology Review",
            "https://www.technologyreview.com/topic/artificial-intelligence/feed/",
            10,
        ),
        Source::new(
            "TechCrunch AI",
            "https://techcrunch.com/category/artificial-intelligence/feed/",
            9,
        ),
        Source::new("VentureBeat AI", "https://venturebeat.com/ai/feed/", 9),
    ]
}

/// Write starter config files that do not exist yet. Returns the paths written.
pub fn write_default_config(config_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(config_dir)?;
    let mut written = Vec::new();

    let sources_path = config_dir.join(SOURCES_FILE);
    if !sources_path.exists() {
        let file = SourcesFile { sources: default_sources() };
        fs::write(&sources_path, serde_json::to_string_pretty(&file)?)?;
        written.push(sources_path);
    }

    let recipients_path = config_dir.join(RECIPIENTS_FILE);
    if !recipients_path.exists() {
        let file = RecipientsFile {
            recipients: vec!["your-email@example.com".to_string()],
        };
        fs::write(&recipients_path, serde_json::to_string_pretty(&file)?)?;
        written.push(recipients_path);
    }

    Ok(written)
}
