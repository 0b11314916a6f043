use chrono::{DateTime, FixedOffset, Offset, Utc};
use interfaces::defs::Article;

/// India Standard Time, the digest's home timezone.
pub const DEFAULT_UTC_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

const RULE_WIDTH: usize = 50;

/// Formats the ranked article list as email subject and bodies.
/// Rank numbers are list positions starting at 1.
#[derive(Debug, Clone)]
pub struct DigestRenderer {
    offset: FixedOffset,
    feedback_address: Option<String>,
}

impl DigestRenderer {
    pub fn new(offset: FixedOffset) -> Self {
        Self {
            offset,
            feedback_address: None,
        }
    }

    pub fn with_feedback_address(mut self, address: impl Into<String>) -> Self {
        self.feedback_address = Some(address.into());
        self
    }

    pub fn display_date(&self, now: DateTime<Utc>) -> String {
        now.with_timezone(&self.offset).format("%B %d, %Y").to_string()
    }

    pub fn subject(&self, now: DateTime<Utc>) -> String {
        format!("Daily AI Insights - {}", self.display_date(now))
    }

    pub fn plain_text(&self, articles: &[Article], now: DateTime<Utc>) -> String {
        let mut text = String::new();
        text.push_str(&format!("DAILY AI INSIGHTS - {}\n", self.display_date(now)));
        text.push_str(&"=".repeat(RULE_WIDTH));
        text.push_str("\n\n");

        if articles.is_empty() {
            text.push_str("No significant AI developments found today.\n");
        } else {
            text.push_str(&format!("Today's Top {} AI Developments:\n\n", articles.len()));
        }

        for (i, article) in articles.iter().enumerate() {
            text.push_str(&format!("{}. {}\n\n", i + 1, article.title));
            if !article.summary.is_empty() {
                text.push_str(&format!("   {}\n\n", article.summary));
            }
            text.push_str(&format!("   Source: {}\n", article.source_name));
            text.push_str(&format!("   Link: {}\n", article.link));
            if !article.published_display.is_empty() {
                text.push_str(&format!("   Published: {}\n", article.published_display));
            }
            text.push('\n');
            text.push_str(&"-".repeat(RULE_WIDTH));
            text.push('\n');
        }

        text.push_str("\nThis digest is generated automatically from RSS feeds of trusted AI news sources.\n");
        if let Some(address) = &self.feedback_address {
            text.push_str(&format!("Send feedback: {}\n", address));
        }
        text
    }

    pub fn html(&self, articles: &[Article], now: DateTime<Utc>) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
        html.push_str("<title>Daily AI Insights</title>\n</head>\n");
        html.push_str("<body style=\"font-family: sans-serif; line-height: 1.6; color: #333; max-width: 600px; margin: 0 auto;\">\n");
        html.push_str(&format!(
            "<h1>Daily AI Insights</h1>\n<p>{} | Top {} AI Advancements</p>\n",
            escape_html(&self.display_date(now)),
            articles.len()
        ));

        if articles.is_empty() {
            html.push_str("<p>No significant AI developments found today. Check back tomorrow for the latest updates.</p>\n");
        }

        for (i, article) in articles.iter().enumerate() {
            html.push_str("<div style=\"border: 1px solid #e9ecef; border-radius: 8px; margin: 20px 0; padding: 20px;\">\n");
            html.push_str(&format!(
                "<h3>{}. <a href=\"{}\">{}</a></h3>\n",
                i + 1,
                escape_html(&article.link),
                escape_html(&article.title)
            ));
            if !article.summary.is_empty() {
                html.push_str(&format!("<p>{}</p>\n", escape_html(&article.summary)));
            }
            let mut source_line = escape_html(&article.source_name);
            if !article.published_display.is_empty() {
                source_line.push_str(&format!(" &bull; {}", escape_html(&article.published_display)));
            }
            html.push_str(&format!(
                "<div style=\"color: #868e96; font-size: 12px;\">{}</div>\n</div>\n",
                source_line
            ));
        }

        html.push_str("<p style=\"font-size: 12px; color: #6c757d;\">This digest is generated automatically from RSS feeds of trusted AI news sources.");
        if let Some(address) = &self.feedback_address {
            html.push_str(&format!(
                " <a href=\"mailto:{0}\">Send Feedback</a>",
                escape_html(address)
            ));
        }
        html.push_str("</p>\n</body>\n</html>\n");
        html
    }
}

impl Default for DigestRenderer {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECONDS).unwrap_or_else(|| Utc.fix());
        Self::new(offset)
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
