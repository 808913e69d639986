use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comicdex_core::report::write_report;
use comicdex_core::{Catalog, TermPolicy};
use comicdex_crawler::fetch::DEFAULT_USER_AGENT;
use comicdex_crawler::{Collector, CollectorConfig, ComicSource, FailurePolicy, FetchOptions, HttpFetcher, DEFAULT_BASE_URL};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Fetch a range of comics, index their titles and transcripts, and look up terms", long_about = None)]
struct Cli {
    /// Terms to look up; each is searched independently
    terms: Vec<String>,
    /// Base URL of the comic archive
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    /// First comic number to fetch
    #[arg(long, default_value_t = 1)]
    first_id: u32,
    /// Number of consecutive comics to fetch
    #[arg(long, default_value_t = 100)]
    count: u32,
    /// Concurrency (number of fetches in flight)
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string sent with every request
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,
    /// What to do when a comic cannot be fetched or decoded
    #[arg(long, value_enum, default_value_t = Policy::Skip)]
    failure_policy: Policy,
    /// Normalize lookup terms the same way as comic text (so "Dog!" finds "dog")
    #[arg(long, default_value_t = false)]
    normalize_terms: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Skip the comic and keep going
    Skip,
    /// Stop at the first failed comic
    Stop,
}

impl From<Policy> for FailurePolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Skip => FailurePolicy::SkipAndContinue,
            Policy::Stop => FailurePolicy::StopOnFirstError,
        }
    }
}

impl Cli {
    fn fetch_options(&self) -> FetchOptions {
        FetchOptions { timeout: Duration::from_secs(self.timeout_secs), user_agent: self.user_agent.clone() }
    }

    fn collector_config(&self) -> CollectorConfig {
        CollectorConfig {
            first_id: self.first_id,
            count: self.count,
            concurrency: self.concurrency,
            failure_policy: self.failure_policy.into(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    let source = ComicSource::new(&cli.base_url).with_context(|| format!("invalid base url {}", cli.base_url))?;
    let fetcher = HttpFetcher::new(&cli.fetch_options())?;
    let collection = Collector::new(fetcher, source.clone(), cli.collector_config())
        .collect()
        .await
        .context("collection aborted")?;
    let catalog = Catalog::build(collection);

    let policy = if cli.normalize_terms { TermPolicy::Normalized } else { TermPolicy::Verbatim };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for term in &cli.terms {
        match catalog.search(term, policy) {
            Some(hits) => write_report(&mut out, term, &hits, |id| source.permalink(id).to_string())?,
            None => tracing::info!(term = %term, "no match"),
        }
    }
    out.flush()?;
    Ok(())
}
