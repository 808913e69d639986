use anyhow::{Context, Result};
use axum::Router;
use clap::{Parser, ValueEnum};
use comicdex_core::{Catalog, TermPolicy};
use comicdex_crawler::fetch::DEFAULT_USER_AGENT;
use comicdex_crawler::{Collector, CollectorConfig, ComicSource, FailurePolicy, FetchOptions, HttpFetcher, DEFAULT_BASE_URL};
use comicdex_server::{build_app, AppState};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Index a range of comics once and serve term lookups over HTTP")]
struct Args {
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
    /// Normalize lookup terms the same way as comic text
    #[arg(long, default_value_t = false)]
    normalize_terms: bool,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
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

impl Args {
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
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let source = ComicSource::new(&args.base_url).with_context(|| format!("invalid base url {}", args.base_url))?;
    let fetcher = HttpFetcher::new(&args.fetch_options())?;
    let collection = Collector::new(fetcher, source.clone(), args.collector_config())
        .collect()
        .await
        .context("collection aborted")?;

    let term_policy = if args.normalize_terms { TermPolicy::Normalized } else { TermPolicy::Verbatim };
    let state = AppState { catalog: Catalog::build(collection), source, term_policy };
    let app: Router = build_app(Arc::new(state));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
