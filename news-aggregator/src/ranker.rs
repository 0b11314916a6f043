use crate::types::Article;
use crate::utils::time;
use chrono::{DateTime, Utc};

/// Title words that mark an announcement-style story.
pub const HIGH_VALUE_TITLE_WORDS: [&str; 6] =
    ["breakthrough", "launch", "release", "announce", "new", "first"];

pub const DEFAULT_DIGEST_LIMIT: usize = 10;

/// Each component is capped at 5 points before its weight is applied,
/// except source trust which scales with the operator-set weight.
#[derive(Debug, Clone)]
pub struct RankingWeights {
    pub source: f64,
    pub recency: f64,
    pub title_keywords: f64,
    pub summary_length: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            source: 0.4,
            recency: 0.3,
            title_keywords: 0.2,
            summary_length: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ranker {
    weights: RankingWeights,
}

impl Ranker {
    pub fn new(weights: RankingWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, article: &Article, now: DateTime<Utc>) -> f64 {
        let weights = &self.weights;
        let mut score = article.source_weight as f64 * weights.source;

        // Linear decay to zero at 60 hours.
        if let Some(published) = article.published {
            let hours_old = time::hours_between(published, now).max(0.0);
            score += (5.0 - hours_old / 12.0).max(0.0) * weights.recency;
        }

        let title = article.title.to_lowercase();
        let keyword_points = HIGH_VALUE_TITLE_WORDS
            .iter()
            .filter(|word| title.contains(*word))
            .count()
            * 2;
        score += keyword_points.min(5) as f64 * weights.title_keywords;

        let summary_length = article.summary.chars().count() as f64;
        score += (summary_length / 50.0).min(5.0) * weights.summary_length;

        score
    }

    /// Score every article, sort by score descending and keep the first
    /// `limit`. Equal scores keep their input order.
    pub fn rank(&self, mut articles: Vec<Article>, now: DateTime<Utc>, limit: usize) -> Vec<Article> {
        for article in &mut articles {
            article.score = Some(self.score(article, now));
        }

        // `sort_by` is stable.
        articles.sort_by(|a, b| {
            let score_a = a.score.unwrap_or(0.0);
            let score_b = b.score.unwrap_or(0.0);
            score_b.total_cmp(&score_a)
        });

        articles.truncate(limit);
        articles
    }
}
