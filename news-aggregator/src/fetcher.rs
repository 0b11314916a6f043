use crate::parser::FeedParser;
use crate::types::{AggregatorError, FeedFetcher, FetchConfig, RawEntry, Result, Source};
use crate::utils;
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Fetches feeds over HTTP and hands back at most
/// `max_entries_per_source` raw entries per source.
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(redirect)
            .build()?;

        Ok(Self { client, config })
    }

    pub async fn fetch_feed_content(&self, url: &str) -> Result<String> {
        let start_time = Instant::now();
        debug!(domain = ?utils::url::extract_domain(url), "Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(AggregatorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if let Some(content_length) = response.content_length() {
            let size_mb = content_length as usize / (1024 * 1024);
            if size_mb > self.config.max_feed_size_mb {
                return Err(AggregatorError::FeedTooLarge { size_mb });
            }
        }

        let content = response.text().await?;
        info!(
            "Fetched feed: {} ({} bytes in {}ms)",
            url,
            content.len(),
            start_time.elapsed().as_millis()
        );
        Ok(content)
    }

    /// Parse feed text and apply the per-source entry cap.
    pub fn entries_from_content(&self, content: &str) -> Result<Vec<RawEntry>> {
        if !FeedParser::is_valid_feed_content(content) {
            return Err(AggregatorError::Parse(
                "Response is not an RSS/Atom document".to_string(),
            ));
        }

        let mut entries = FeedParser::parse_feed(content)?.entries;
        entries.truncate(self.config.max_entries_per_source);
        Ok(entries)
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl FeedFetcher for Fetcher {
    async fn fetch(&self, source: &Source) -> anyhow::Result<Vec<RawEntry>> {
        let content = self.fetch_feed_content(&source.feed_url).await?;
        Ok(self.entries_from_content(&content)?)
    }
}
