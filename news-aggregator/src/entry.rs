use crate::filters::{RecencyFilter, RelevanceFilter};
use crate::types::{Article, EntryError, RawEntry, Source};
use crate::utils::{text, time};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

/// What became of one raw entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Accepted(Article),
    Irrelevant,
    Stale,
}

/// MD5 hex digest of `title` followed directly by `link`.
pub fn fingerprint(title: &str, link: &str) -> String {
    format!("{:x}", md5::compute(format!("{}{}", title, link)))
}

pub struct EntryParser {
    relevance: RelevanceFilter,
    recency: RecencyFilter,
}

impl EntryParser {
    pub fn new(relevance: RelevanceFilter, recency: RecencyFilter) -> Self {
        Self { relevance, recency }
    }

    pub fn parse(
        &self,
        raw: &RawEntry,
        source: &Source,
        now: DateTime<Utc>,
    ) -> Result<EntryOutcome, EntryError> {
        if is_blank(&raw.title) && is_blank(&raw.link) && raw.body().map_or(true, |b| b.trim().is_empty()) {
            return Err(EntryError::Empty);
        }

        let title = raw.title_or_default();
        // Kept as given: relative and non-http links pass through.
        let link = raw.link_or_default();

        let summary = text::truncate_with_ellipsis(
            &text::normalize(raw.body().unwrap_or("")),
            text::SUMMARY_MAX_CHARS,
        );

        if !self.relevance.is_relevant(&title, &summary) {
            return Ok(EntryOutcome::Irrelevant);
        }
        if !self.recency.is_recent(raw.published, now) {
            return Ok(EntryOutcome::Stale);
        }

        let published_display = match raw.published {
            Some(published) => time::format_published(published),
            None => raw
                .published_text
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .to_string(),
        };

        Ok(EntryOutcome::Accepted(Article {
            content_fingerprint: fingerprint(&title, &link),
            title,
            link,
            summary,
            source_name: source.name.clone(),
            source_weight: source.weight,
            published: raw.published,
            published_display,
            score: None,
        }))
    }

    /// Parse a source's entries, keeping accepted articles in feed order.
    /// Rejections and malformed entries are logged and dropped.
    pub fn parse_all(&self, entries: &[RawEntry], source: &Source, now: DateTime<Utc>) -> Vec<Article> {
        entries
            .iter()
            .filter_map(|raw| match self.parse(raw, source, now) {
                Ok(EntryOutcome::Accepted(article)) => Some(article),
                Ok(EntryOutcome::Irrelevant) => {
                    debug!(source = %source.name, title = ?raw.title, "Skipping off-topic entry");
                    None
                }
                Ok(EntryOutcome::Stale) => {
                    debug!(source = %source.name, title = ?raw.title, "Skipping stale entry");
                    None
                }
                Err(e) => {
                    warn!(source = %source.name, "Dropping malformed entry: {}", e);
                    None
                }
            })
            .collect()
    }
}

impl Default for EntryParser {
    fn default() -> Self {
        Self::new(RelevanceFilter::default(), RecencyFilter::default())
    }
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |value| value.trim().is_empty())
}
