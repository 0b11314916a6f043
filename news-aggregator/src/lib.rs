pub mod aggregator;
pub mod config;
pub mod dedup;
pub mod entry;
pub mod fetcher;
pub mod filters;
pub mod parser;
pub mod pipeline;
pub mod ranker;
pub mod types;
pub mod utils;

pub use types::*;
pub use aggregator::{NewsAggregator, RunOutcome};
pub use config::AppConfig;
pub use dedup::{Deduplicator, NearDuplicateIndex, WordOverlapIndex};
pub use entry::{fingerprint, EntryOutcome, EntryParser};
pub use fetcher::Fetcher;
pub use filters::{RecencyFilter, RelevanceFilter};
pub use parser::FeedParser;
pub use pipeline::DigestPipeline;
pub use ranker::Ranker;
