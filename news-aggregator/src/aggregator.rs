use crate::config::AppConfig;
use crate::pipeline::DigestPipeline;
use crate::types::{Article, DeliveryReport, FeedFetcher, Notifier};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum RunOutcome {
    /// Nothing was fetched or sent.
    NoRecipients,
    /// Sources yielded no articles, so no digest went out.
    NoArticles,
    Delivered {
        articles: Vec<Article>,
        report: DeliveryReport,
    },
}

impl RunOutcome {
    pub fn succeeded(&self) -> bool {
        match self {
            RunOutcome::Delivered { report, .. } => report.succeeded(),
            RunOutcome::NoArticles => true,
            RunOutcome::NoRecipients => false,
        }
    }
}

/// One daily run: collect the digest and hand it to the notifier.
pub struct NewsAggregator<F, N> {
    pipeline: DigestPipeline<F>,
    notifier: N,
}

impl<F: FeedFetcher, N: Notifier> NewsAggregator<F, N> {
    pub fn new(pipeline: DigestPipeline<F>, notifier: N) -> Self {
        Self { pipeline, notifier }
    }

    pub async fn run(&self, config: &AppConfig, now: DateTime<Utc>) -> anyhow::Result<RunOutcome> {
        if !config.has_recipients() {
            return Ok(RunOutcome::NoRecipients);
        }

        info!(
            "Running digest for {} sources and {} recipients",
            config.sources.len(),
            config.recipients.len()
        );

        let articles = self.pipeline.run(&config.sources, now).await;
        if articles.is_empty() {
            warn!("No articles found! Check RSS sources.");
            return Ok(RunOutcome::NoArticles);
        }

        for (i, article) in articles.iter().enumerate() {
            info!("{}. {} - {}", i + 1, article.title, article.source_name);
        }

        let report = self.notifier.deliver(&articles, &config.recipients).await?;
        if report.succeeded() {
            info!("Daily AI news email sent successfully");
        } else {
            error!("Failed to send email to any recipient");
        }

        Ok(RunOutcome::Delivered { articles, report })
    }

    pub fn pipeline(&self) -> &DigestPipeline<F> {
        &self.pipeline
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
