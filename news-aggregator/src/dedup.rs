use crate::types::Article;
use std::collections::HashSet;
use tracing::{debug, info};

/// Remembers kept titles and answers whether a new title is too close to
/// one of them.
pub trait NearDuplicateIndex {
    fn is_near_duplicate(&self, title: &str) -> bool;
    fn insert(&mut self, title: &str);
}

/// Lowercased whitespace-separated words of a title.
pub fn title_words(title: &str) -> HashSet<String> {
    title.to_lowercase().split_whitespace().map(String::from).collect()
}

/// `|a ∩ b| / max(|a|, |b|)`, or 0 when both sets are empty.
pub fn overlap_ratio(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let denominator = a.len().max(b.len());
    if denominator == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / denominator as f64
}

/// Compares against every kept title. Quadratic, fine for a few hundred.
#[derive(Debug, Clone)]
pub struct WordOverlapIndex {
    threshold: f64,
    kept: Vec<HashSet<String>>,
}

impl WordOverlapIndex {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            kept: Vec::new(),
        }
    }
}

impl NearDuplicateIndex for WordOverlapIndex {
    fn is_near_duplicate(&self, title: &str) -> bool {
        let words = title_words(title);
        self.kept
            .iter()
            .any(|seen| overlap_ratio(&words, seen) > self.threshold)
    }

    fn insert(&mut self, title: &str) {
        self.kept.push(title_words(title));
    }
}

#[derive(Debug, Clone)]
pub struct Deduplicator {
    threshold: f64,
}

impl Deduplicator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn dedupe(&self, articles: Vec<Article>) -> Vec<Article> {
        dedupe_with(articles, WordOverlapIndex::new(self.threshold))
    }
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(0.7)
    }
}

/// Single order-preserving pass: the first article of each exact or
/// near-duplicate group survives.
pub fn dedupe_with<I: NearDuplicateIndex>(articles: Vec<Article>, mut index: I) -> Vec<Article> {
    let total = articles.len();
    let mut seen_fingerprints = HashSet::new();
    let mut unique_articles = Vec::with_capacity(total);

    for article in articles {
        if seen_fingerprints.contains(&article.content_fingerprint) {
            debug!("Removing exact duplicate: {} ({})", article.title, article.link);
            continue;
        }
        if index.is_near_duplicate(&article.title) {
            debug!("Removing near-duplicate title: {}", article.title);
            continue;
        }

        seen_fingerprints.insert(article.content_fingerprint.clone());
        index.insert(&article.title);
        unique_articles.push(article);
    }

    let removed_count = total - unique_articles.len();
    if removed_count > 0 {
        info!("Removed {} duplicate articles", removed_count);
    }

    unique_articles
}
