#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use email_digest::SmtpConfig;
use interfaces::defs::Article;
use std::collections::HashMap;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_test_writer()
            .try_init();
    });
}

pub const SENDER: &str = "digest@example.com";

/// 20:00 UTC, already the next day in India.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 20, 0, 0).unwrap()
}

pub fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

pub fn smtp_config() -> SmtpConfig {
    SmtpConfig::from_lookup(lookup_from(&[("SMTP_USERNAME", SENDER), ("SMTP_PASSWORD", "app-password")]))
        .unwrap()
}

pub fn article(title: &str, source_name: &str, published_display: &str) -> Article {
    Article {
        title: title.to_string(),
        link: format!("https://example.com/{}", title.len()),
        summary: format!("Summary for {}", title),
        source_name: source_name.to_string(),
        source_weight: 5,
        published: None,
        published_display: published_display.to_string(),
        content_fingerprint: String::new(),
        score: Some(1.0),
    }
}
