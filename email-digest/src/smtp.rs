use crate::config::{SmtpConfig, TlsMode};
use crate::error::Result;
use crate::render::DigestRenderer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use interfaces::defs::{Article, DeliveryReport, Notifier};
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

/// Sends the digest to each recipient as its own message over one SMTP
/// connection pool.
pub struct SmtpNotifier {
    config: SmtpConfig,
    renderer: DigestRenderer,
}

impl SmtpNotifier {
    pub fn new(config: SmtpConfig) -> Self {
        let renderer = DigestRenderer::default().with_feedback_address(config.username.clone());
        Self { config, renderer }
    }

    pub fn with_renderer(mut self, renderer: DigestRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>> {
        let host = self.config.host.as_str();
        let builder = match self.config.tls {
            TlsMode::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?,
            TlsMode::Wrapper => AsyncSmtpTransport::<Tokio1Executor>::relay(host)?,
            TlsMode::None => AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host),
        };

        let credentials = Credentials::new(self.config.username.clone(), self.config.password.clone());
        Ok(builder.port(self.config.port).credentials(credentials).build())
    }

    pub fn build_message(&self, recipient: &str, articles: &[Article], now: DateTime<Utc>) -> Result<Message> {
        let sender: Address = self.config.username.parse()?;
        let from = Mailbox::new(Some(self.config.from_name.clone()), sender.clone());
        let reply_to = Mailbox::new(None, sender);
        let to: Mailbox = recipient.parse()?;

        let message = Message::builder()
            .from(from)
            .reply_to(reply_to)
            .to(to)
            .subject(self.renderer.subject(now))
            .multipart(MultiPart::alternative_plain_html(
                self.renderer.plain_text(articles, now),
                self.renderer.html(articles, now),
            ))?;

        Ok(message)
    }

    /// Connect and authenticate without sending anything.
    pub async fn test_connection(&self) -> Result<bool> {
        info!("Testing SMTP connection to {}:{}", self.config.host, self.config.port);
        Ok(self.transport()?.test_connection().await?)
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn deliver(&self, articles: &[Article], recipients: &[String]) -> anyhow::Result<DeliveryReport> {
        let transport = self.transport()?;
        let now = Utc::now();
        let mut report = DeliveryReport::default();

        info!("Connecting to {}:{} as {}", self.config.host, self.config.port, self.config.username);

        for recipient in recipients {
            let message = match self.build_message(recipient, articles, now) {
                Ok(message) => message,
                Err(e) => {
                    warn!(recipient = %recipient, "Failed to build digest message: {}", e);
                    report.record_failure(recipient, e);
                    continue;
                }
            };

            match transport.send(message).await {
                Ok(_) => {
                    info!(recipient = %recipient, "Digest sent");
                    report.record_success(recipient);
                }
                Err(e) => {
                    warn!(recipient = %recipient, "Failed to send digest: {}", e);
                    report.record_failure(recipient, e);
                }
            }
        }

        info!(
            "Successfully sent to {}/{} recipients",
            report.delivered_count(),
            recipients.len()
        );
        Ok(report)
    }
}
