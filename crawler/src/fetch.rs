use comicdex_core::{DocId, Document};
use reqwest::{Client, Url};
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = "comicdex/0.1 (+https://github.com/comicdex/comicdex)";

/// Retrieves one raw document per locator.
///
/// Implementations must report every failure through [`FetchError`] without retrying; the
/// collector decides which kinds are fatal.
pub trait Fetch: Send + Sync + 'static {
    fn fetch(&self, id: DocId, locator: &Url) -> impl Future<Output = Result<Document, FetchError>> + Send;
}

/// Archive payload. Absent fields default to empty / zero.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ComicPayload {
    num: DocId,
    year: String,
    month: String,
    day: String,
    safe_title: String,
    transcript: String,
}

/// Decode a payload body into a raw document keyed to `locator`. A payload without `num`
/// takes the requested id.
pub fn decode_payload(id: DocId, locator: &Url, body: &[u8]) -> Result<Document, FetchError> {
    let payload: ComicPayload = serde_json::from_slice(body).map_err(|e| FetchError::Decode {
        locator: locator.to_string(),
        reason: e.to_string(),
    })?;
    let num = if payload.num == 0 { id } else { payload.num };
    if num != id {
        tracing::debug!(requested = id, num, %locator, "payload id differs from requested id");
    }
    Ok(Document::new(num, locator.as_str(), payload.safe_title, payload.transcript)
        .with_date(payload.year, payload.month, payload.day))
}

#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(12), user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// [`Fetch`] over HTTP. Every request is bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(options: &FetchOptions) -> reqwest::Result<Self> {
        let client = Client::builder()
            .user_agent(options.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(options.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, id: DocId, locator: &Url) -> Result<Document, FetchError> {
        let resp = self.client.get(locator.clone()).send().await.map_err(|e| FetchError::Transport {
            locator: locator.to_string(),
            reason: e.to_string(),
        })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { locator: locator.to_string(), status: status.as_u16() });
        }
        let bytes = match resp.bytes().await {
            Ok(b) => b,
            Err(e) if e.is_timeout() => {
                return Err(FetchError::Transport { locator: locator.to_string(), reason: e.to_string() })
            }
            Err(e) => return Err(FetchError::Decode { locator: locator.to_string(), reason: e.to_string() }),
        };
        decode_payload(id, locator, &bytes)
    }
}
