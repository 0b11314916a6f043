pub use interfaces::defs::{
    Article, DeliveryReport, FeedFetcher, Notifier, RawEntry, Source, DEFAULT_SOURCE_WEIGHT, UNTITLED,
};

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub follow_redirects: bool,
    pub max_redirects: usize,
    /// Only the first N entries of each feed are considered.
    pub max_entries_per_source: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; AI-News-Aggregator/1.0)".to_string(),
            timeout_seconds: 30,
            max_feed_size_mb: 10,
            follow_redirects: true,
            max_redirects: 5,
            max_entries_per_source: 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub recency_window_hours: i64,
    pub near_duplicate_threshold: f64,
    pub digest_limit: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            recency_window_hours: 48,
            near_duplicate_threshold: 0.7,
            digest_limit: 10,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP {status} when fetching {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("General error: {0}")]
    General(String),
}

/// Why a single feed entry could not be turned into an article.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EntryError {
    #[error("entry has no title, link or body")]
    Empty,
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
