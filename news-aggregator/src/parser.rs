use crate::types::{AggregatorError, RawEntry, Result};
use feed_rs::parser;
use tracing::debug;

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// Turns RSS/Atom documents into `RawEntry` records.
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<RawEntry> = feed.entries.into_iter().map(Self::to_raw_entry).collect();

        debug!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    // RSS <description> arrives as `summary`, <content:encoded> and Atom
    // <content> as `content`.
    fn to_raw_entry(entry: feed_rs::model::Entry) -> RawEntry {
        RawEntry {
            title: entry.title.map(|t| t.content),
            link: entry.links.into_iter().next().map(|l| l.href),
            summary: entry.summary.map(|s| s.content),
            description: entry.content.and_then(|c| c.body),
            published: entry.published,
            published_text: None,
        }
    }

    pub fn is_valid_feed_content(content: &str) -> bool {
        let content_lower = content.to_lowercase();

        let has_feed_root = content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<rdf:rdf")
            || content_lower.contains("<channel");

        has_feed_root && content.trim_start().starts_with('<')
    }
}
