use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SOURCE_WEIGHT: i32 = 5;
pub const UNTITLED: &str = "No Title";

fn default_source_weight() -> i32 {
    DEFAULT_SOURCE_WEIGHT
}

/// A configured feed. Identity is `name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(alias = "rss_url")]
    pub feed_url: String,
    #[serde(default = "default_source_weight")]
    pub weight: i32,
}

impl Source {
    pub fn new(name: impl Into<String>, feed_url: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            feed_url: feed_url.into(),
            weight,
        }
    }
}

/// One entry as a feed delivered it. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub published: Option<DateTime<Utc>>,
    /// Unparsed date string. The feed-rs fetcher never sets it; fetchers
    /// that only see raw date text do.
    pub published_text: Option<String>,
}

impl RawEntry {
    /// Trimmed title, or `UNTITLED` when the feed gave none.
    pub fn title_or_default(&self) -> String {
        match &self.title {
            Some(title) => title.trim().to_string(),
            None => UNTITLED.to_string(),
        }
    }

    pub fn link_or_default(&self) -> String {
        self.link.as_deref().map(str::trim).unwrap_or("").to_string()
    }

    /// Summary when present, else description.
    pub fn body(&self) -> Option<&str> {
        self.summary.as_deref().or(self.description.as_deref())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub summary: String,
    pub source_name: String,
    pub source_weight: i32,
    pub published: Option<DateTime<Utc>>,
    pub published_display: String,
    pub content_fingerprint: String,
    pub score: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecipientOutcome {
    pub recipient: String,
    pub error: Option<String>,
}

impl RecipientOutcome {
    pub fn delivered(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeliveryReport {
    pub outcomes: Vec<RecipientOutcome>,
}

impl DeliveryReport {
    pub fn record_success(&mut self, recipient: &str) {
        self.outcomes.push(RecipientOutcome {
            recipient: recipient.to_string(),
            error: None,
        });
    }

    pub fn record_failure(&mut self, recipient: &str, error: impl ToString) {
        self.outcomes.push(RecipientOutcome {
            recipient: recipient.to_string(),
            error: Some(error.to_string()),
        });
    }

    pub fn delivered_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.delivered()).count()
    }

    /// A digest counts as sent once any recipient got it.
    pub fn succeeded(&self) -> bool {
        self.delivered_count() > 0
    }
}

// Object style note:
// Implementations of these traits run inside a single short-lived digest run.
// They are handed everything they need per call and keep no state between
// runs. Failures are returned, and the caller decides whether to log and skip.

#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Raw entries for one source, in feed order.
    async fn fetch(&self, source: &Source) -> Result<Vec<RawEntry>>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver the ranked articles to each recipient. An `Err` means nothing
    /// could be attempted at all; per-recipient failures go in the report.
    async fn deliver(&self, articles: &[Article], recipients: &[String]) -> Result<DeliveryReport>;
}
