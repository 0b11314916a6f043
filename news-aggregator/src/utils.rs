/// Text cleanup for feed-supplied HTML fragments
pub mod text {
    use regex::Regex;
    use std::sync::OnceLock;

    pub const SUMMARY_MAX_CHARS: usize = 300;
    pub const ELLIPSIS: &str = "...";

    /// Placeholders some feeds append to clipped summaries.
    const FEED_ARTIFACTS: [&str; 2] = ["[…]", "[...]"];

    const ENTITIES: [(&str, &str); 6] = [
        ("&nbsp;", " "),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&apos;", "'"),
    ];

    fn tag_pattern() -> &'static Regex {
        static TAG: OnceLock<Regex> = OnceLock::new();
        TAG.get_or_init(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"))
    }

    /// Strip markup, entities and feed artifacts, then collapse whitespace.
    pub fn normalize(text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut clean = tag_pattern().replace_all(text, " ").into_owned();
        for (entity, replacement) in ENTITIES {
            clean = clean.replace(entity, replacement);
        }
        // Last, so "&amp;lt;" stays a literal "&lt;".
        clean = clean.replace("&amp;", "&");
        for artifact in FEED_ARTIFACTS {
            clean = clean.replace(artifact, " ");
        }

        clean.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Cut to `max_chars` characters and append `ELLIPSIS` if anything was cut.
    pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((byte_index, _)) => format!("{}{}", &text[..byte_index], ELLIPSIS),
            None => text.to_string(),
        }
    }
}

/// URL utilities
pub mod url {
    use url::Url;

    /// Absolute http(s) URL
    pub fn is_http_url(url_str: &str) -> bool {
        match Url::parse(url_str) {
            Ok(url) => url.scheme() == "http" || url.scheme() == "https",
            Err(_) => false,
        }
    }

    pub fn extract_domain(url_str: &str) -> Option<String> {
        Url::parse(url_str).ok()?.domain().map(|d| d.to_string())
    }
}

/// Time utilities
pub mod time {
    use chrono::{DateTime, Utc};

    pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

    /// Fractional hours from `earlier` to `later`; negative if `earlier` is in the future.
    pub fn hours_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
        later.signed_duration_since(earlier).num_milliseconds() as f64 / 3_600_000.0
    }

    pub fn format_published(published: DateTime<Utc>) -> String {
        published.format(DISPLAY_FORMAT).to_string()
    }
}

pub mod email {
    use regex::Regex;
    use std::sync::OnceLock;

    fn address_pattern() -> &'static Regex {
        static ADDRESS: OnceLock<Regex> = OnceLock::new();
        ADDRESS.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
                .expect("address pattern is valid")
        })
    }

    pub fn is_valid_address(address: &str) -> bool {
        address_pattern().is_match(address)
    }
}
