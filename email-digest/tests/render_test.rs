mod common;

use chrono::FixedOffset;
use common::*;
use email_digest::render::escape_html;
use email_digest::{DigestRenderer, SmtpNotifier};

#[test]
fn test_subject_uses_india_date() {
    init_tracing();
    let renderer = DigestRenderer::default();
    assert_eq!(renderer.display_date(test_now()), "October 15, 2026");
    assert_eq!(renderer.subject(test_now()), "Daily AI Insights - October 15, 2026");

    let utc = DigestRenderer::new(FixedOffset::east_opt(0).unwrap());
    assert_eq!(utc.subject(test_now()), "Daily AI Insights - October 14, 2026");
}

#[test]
fn test_plain_text_lists_articles_in_rank_order() {
    let renderer = DigestRenderer::default();
    let articles = vec![
        article("OpenAI launches new model", "Alpha", "2026-10-14 10:00"),
        article("Robotics arm demo", "Beta", ""),
    ];

    let text = renderer.plain_text(&articles, test_now());
    assert!(text.starts_with("DAILY AI INSIGHTS - October 15, 2026"));
    assert!(text.contains("Today's Top 2 AI Developments:"));
    assert!(text.contains("Summary for OpenAI launches new model"));
    assert!(text.contains("Source: Alpha"));
    assert!(text.contains("Link: https://example.com/"));
    assert_eq!(text.matches("Published:").count(), 1);
    assert!(text.contains("Published: 2026-10-14 10:00"));

    let first = text.find("1. OpenAI launches new model").unwrap();
    let second = text.find("2. Robotics arm demo").unwrap();
    assert!(first < second);
}

#[test]
fn test_empty_digest() {
    let renderer = DigestRenderer::default();

    let text = renderer.plain_text(&[], test_now());
    assert!(text.contains("No significant AI developments found today."));
    assert!(!text.contains("Today's Top"));

    let html = renderer.html(&[], test_now());
    assert!(html.contains("Top 0 AI Advancements"));
    assert!(html.contains("No significant AI developments found today."));
}

#[test]
fn test_html_escapes_feed_text() {
    let renderer = DigestRenderer::default().with_feedback_address(SENDER);
    let articles = vec![article("GPT <5> & \"friends\"", "O'Reilly", "2026-10-14 10:00")];

    let html = renderer.html(&articles, test_now());
    assert!(html.contains("Top 1 AI Advancements"));
    assert!(html.contains("GPT &lt;5&gt; &amp; &quot;friends&quot;"));
    assert!(!html.contains("<5>"));
    assert!(html.contains("O&#39;Reilly &bull; 2026-10-14 10:00"));
    assert!(html.contains("mailto:digest@example.com"));

    assert_eq!(escape_html("a < b && c > 'd'"), "a &lt; b &amp;&amp; c &gt; &#39;d&#39;");
}

#[test]
fn test_build_message_headers() {
    let notifier = SmtpNotifier::new(smtp_config());
    let articles = vec![article("OpenAI launches new model", "Alpha", "")];

    let message = notifier
        .build_message("reader@example.com", &articles, test_now())
        .unwrap();
    let formatted = String::from_utf8_lossy(&message.formatted()).to_string();

    assert!(formatted.contains("Subject: Daily AI Insights - October 15, 2026"));
    assert!(formatted.contains("To: reader@example.com"));
    assert!(formatted.contains("Reply-To: digest@example.com"));
    assert!(formatted.contains("AI News Digest"));
    assert!(formatted.contains("multipart/alternative"));
}

#[test]
fn test_build_message_rejects_bad_recipient() {
    let notifier = SmtpNotifier::new(smtp_config());
    assert!(notifier.build_message("not an address", &[], test_now()).is_err());
}
