use crate::dedup::Deduplicator;
use crate::entry::EntryParser;
use crate::filters::{RecencyFilter, RelevanceFilter};
use crate::ranker::Ranker;
use crate::types::{Article, FeedFetcher, PipelineConfig, Source};
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// fetch → parse/filter → dedupe → rank, one source at a time.
pub struct DigestPipeline<F> {
    fetcher: F,
    parser: EntryParser,
    deduplicator: Deduplicator,
    ranker: Ranker,
    digest_limit: usize,
}

impl<F: FeedFetcher> DigestPipeline<F> {
    pub fn new(fetcher: F, config: &PipelineConfig) -> Self {
        Self {
            fetcher,
            parser: EntryParser::new(
                RelevanceFilter::default(),
                RecencyFilter::new(config.recency_window_hours),
            ),
            deduplicator: Deduplicator::new(config.near_duplicate_threshold),
            ranker: Ranker::default(),
            digest_limit: config.digest_limit,
        }
    }

    pub fn with_entry_parser(mut self, parser: EntryParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn with_ranker(mut self, ranker: Ranker) -> Self {
        self.ranker = ranker;
        self
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Articles from every source in configured order. A source that fails
    /// to fetch contributes nothing.
    pub async fn collect(&self, sources: &[Source], now: DateTime<Utc>) -> Vec<Article> {
        let mut all_articles = Vec::new();

        for source in sources {
            info!(source = %source.name, "Fetching from {}", source.feed_url);

            let entries = match self.fetcher.fetch(source).await {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(source = %source.name, "Failed to fetch feed: {:#}", e);
                    continue;
                }
            };

            let articles = self.parser.parse_all(&entries, source, now);
            info!(
                source = %source.name,
                "Found {} relevant articles in {} entries",
                articles.len(),
                entries.len()
            );
            all_articles.extend(articles);
        }

        all_articles
    }

    /// The ranked digest for `sources`.
    pub async fn run(&self, sources: &[Source], now: DateTime<Utc>) -> Vec<Article> {
        let all_articles = self.collect(sources, now).await;
        info!("Fetched {} articles total", all_articles.len());

        let unique_articles = self.deduplicator.dedupe(all_articles);
        info!("After deduplication: {} unique articles", unique_articles.len());

        let top_articles = self.ranker.rank(unique_articles, now, self.digest_limit);
        info!("Selected top {} articles", top_articles.len());

        top_articles
    }
}
