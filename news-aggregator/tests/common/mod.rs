#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use news_aggregator::{fingerprint, Article, DeliveryReport, FeedFetcher, Notifier, RawEntry, Source};
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, Once};

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_test_writer()
            .try_init();
    });
}

/// Fixed "now" so recency maths is deterministic.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 12, 0, 0).unwrap()
}

pub fn hours_ago(hours: i64) -> DateTime<Utc> {
    test_now() - Duration::hours(hours)
}

pub fn raw_entry(title: &str, link: &str, summary: &str, published: Option<DateTime<Utc>>) -> RawEntry {
    RawEntry {
        title: Some(title.to_string()),
        link: Some(link.to_string()),
        summary: Some(summary.to_string()),
        published,
        ..Default::default()
    }
}

pub fn article(title: &str, link: &str) -> Article {
    Article {
        title: title.to_string(),
        link: link.to_string(),
        summary: String::new(),
        source_name: "Test Source".to_string(),
        source_weight: 5,
        published: None,
        published_display: String::new(),
        content_fingerprint: fingerprint(title, link),
        score: None,
    }
}

/// Serves canned entries per source name and records which sources were asked for.
#[derive(Default)]
pub struct StaticFetcher {
    feeds: HashMap<String, Result<Vec<RawEntry>, String>>,
    calls: Mutex<Vec<String>>,
}

impl StaticFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, source_name: &str, entries: Vec<RawEntry>) -> Self {
        self.feeds.insert(source_name.to_string(), Ok(entries));
        self
    }

    pub fn with_failure(mut self, source_name: &str, message: &str) -> Self {
        self.feeds.insert(source_name.to_string(), Err(message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedFetcher for StaticFetcher {
    async fn fetch(&self, source: &Source) -> anyhow::Result<Vec<RawEntry>> {
        self.calls.lock().unwrap().push(source.name.clone());
        match self.feeds.get(&source.name) {
            Some(Ok(entries)) => Ok(entries.clone()),
            Some(Err(message)) => Err(anyhow::anyhow!("{}", message)),
            None => Err(anyhow::anyhow!("no feed registered for {}", source.name)),
        }
    }
}

pub struct Delivery {
    pub articles: Vec<Article>,
    pub recipients: Vec<String>,
}

/// Captures every digest handed over. Recipients in `rejected` fail.
#[derive(Default)]
pub struct RecordingNotifier {
    rejected: HashSet<String>,
    deliveries: Mutex<Vec<Delivery>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(recipients: &[&str]) -> Self {
        Self {
            rejected: recipients.iter().map(|r| r.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn delivery_count(&self) -> usize {
        self.deliveries.lock().unwrap().len()
    }

    pub fn last_articles(&self) -> Vec<Article> {
        self.deliveries
            .lock()
            .unwrap()
            .last()
            .map(|d| d.articles.clone())
            .unwrap_or_default()
    }

    pub fn last_recipients(&self) -> Vec<String> {
        self.deliveries
            .lock()
            .unwrap()
            .last()
            .map(|d| d.recipients.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn deliver(&self, articles: &[Article], recipients: &[String]) -> anyhow::Result<DeliveryReport> {
        self.deliveries.lock().unwrap().push(Delivery {
            articles: articles.to_vec(),
            recipients: recipients.to_vec(),
        });

        let mut report = DeliveryReport::default();
        for recipient in recipients {
            if self.rejected.contains(recipient) {
                report.record_failure(recipient, "550 mailbox unavailable");
            } else {
                report.record_success(recipient);
            }
        }
        Ok(report)
    }
}
