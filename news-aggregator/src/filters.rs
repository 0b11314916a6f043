use chrono::{DateTime, Duration, Utc};

/// Vocabulary an entry must mention to count as AI news.
pub const AI_KEYWORDS: [&str; 27] = [
    "artificial intelligence",
    "ai",
    "machine learning",
    "ml",
    "deep learning",
    "neural network",
    "chatgpt",
    "openai",
    "anthropic",
    "claude",
    "llm",
    "large language model",
    "generative ai",
    "computer vision",
    "nlp",
    "natural language processing",
    "robotics",
    "automation",
    "algorithm",
    "tensorflow",
    "pytorch",
    "hugging face",
    "transformer",
    "gpt",
    "artificial general intelligence",
    "agi",
    "foundation model",
];

/// Keyword classifier over title and summary.
///
/// Keywords match as plain substrings of the lowercased text, so short
/// keywords like "ai" also hit words such as "again" or "said".
#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    keywords: Vec<String>,
}

impl RelevanceFilter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn is_relevant(&self, title: &str, summary: &str) -> bool {
        let text = format!("{} {}", title, summary).to_lowercase();
        self.keywords.iter().any(|keyword| text.contains(keyword.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(AI_KEYWORDS)
    }
}

/// Admits articles published inside the lookback window, and undated ones.
#[derive(Debug, Clone)]
pub struct RecencyFilter {
    window_hours: i64,
}

impl RecencyFilter {
    pub fn new(window_hours: i64) -> Self {
        Self { window_hours }
    }

    /// Fails open: if the cutoff cannot be computed the article is admitted.
    pub fn is_recent(&self, published: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let Some(published) = published else {
            return true;
        };
        match Duration::try_hours(self.window_hours).and_then(|window| now.checked_sub_signed(window)) {
            Some(cutoff) => published >= cutoff,
            None => true,
        }
    }

    pub fn window_hours(&self) -> i64 {
        self.window_hours
    }
}

impl Default for RecencyFilter {
    fn default() -> Self {
        Self::new(48)
    }
}
