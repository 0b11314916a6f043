use anyhow::bail;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use email_digest::{DigestRenderer, SmtpConfig, SmtpNotifier};
use news_aggregator::{
    config, AppConfig, DigestPipeline, FetchConfig, Fetcher, NewsAggregator, PipelineConfig,
    RunOutcome,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ai-news-digest", version, about = "Aggregate AI news feeds and email a daily digest")]
struct Cli {
    /// Directory holding sources.json and recipients.json
    #[arg(long, env = "DIGEST_CONFIG_DIR", default_value = "config", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, rank and send the digest (default)
    Run(RunArgs),
    /// Write starter config files that are missing
    InitConfig,
    /// Check that the SMTP server accepts our credentials
    CheckSmtp,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Print the digest instead of emailing it
    #[arg(long)]
    dry_run: bool,

    /// Number of articles in the digest
    #[arg(long)]
    limit: Option<usize>,

    /// Only articles published within this many hours
    #[arg(long)]
    window_hours: Option<i64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => run(&cli.config_dir, args).await,
        Command::InitConfig => init_config(&cli.config_dir),
        Command::CheckSmtp => check_smtp().await,
    }
}

async fn run(config_dir: &Path, args: RunArgs) -> anyhow::Result<()> {
    info!("Starting AI News Daily Mailer");

    let app_config = AppConfig::load(config_dir);

    let mut pipeline_config = PipelineConfig::default();
    if let Some(limit) = args.limit {
        pipeline_config.digest_limit = limit;
    }
    if let Some(window_hours) = args.window_hours {
        pipeline_config.recency_window_hours = window_hours;
    }

    let fetcher = Fetcher::new(FetchConfig::default())?;
    let pipeline = DigestPipeline::new(fetcher, &pipeline_config);
    let now = Utc::now();

    if args.dry_run {
        let articles = pipeline.run(&app_config.sources, now).await;
        let renderer = DigestRenderer::default();
        println!("{}\n", renderer.subject(now));
        println!("{}", renderer.plain_text(&articles, now));
        return Ok(());
    }

    if !app_config.has_recipients() {
        bail!("no recipients configured in {}", config_dir.display());
    }

    let smtp_config = SmtpConfig::from_env().map_err(|e| {
        error!("SMTP credentials not available: {}", e);
        e
    })?;
    let aggregator = NewsAggregator::new(pipeline, SmtpNotifier::new(smtp_config));

    match aggregator.run(&app_config, now).await? {
        RunOutcome::NoRecipients => bail!("no recipients configured in {}", config_dir.display()),
        RunOutcome::Delivered { report, .. } if !report.succeeded() => {
            bail!("digest could not be delivered to any recipient")
        }
        _ => Ok(()),
    }
}

fn init_config(config_dir: &Path) -> anyhow::Result<()> {
    let written = config::write_default_config(config_dir)?;
    if written.is_empty() {
        info!("Config files already present in {}", config_dir.display());
    }
    for path in &written {
        info!("Created default config: {}", path.display());
    }
    if written.iter().any(|p| p.ends_with(config::RECIPIENTS_FILE)) {
        warn!("Remember to update recipients.json with your actual email addresses!");
    }
    Ok(())
}

async fn check_smtp() -> anyhow::Result<()> {
    let notifier = SmtpNotifier::new(SmtpConfig::from_env()?);
    if notifier.test_connection().await? {
        info!("SMTP connection successful");
        Ok(())
    } else {
        bail!("SMTP server rejected the connection")
    }
}
