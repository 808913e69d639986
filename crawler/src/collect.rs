use comicdex_core::{Collection, DocId, Document};
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::error::{CollectError, FetchError};
use crate::fetch::Fetch;
use crate::source::ComicSource;

/// What the collector does when one document fails with a recoverable error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log the failure, leave the document out and keep going.
    #[default]
    SkipAndContinue,
    /// Stop at the first failure and keep only the documents requested before it.
    StopOnFirstError,
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub first_id: DocId,
    /// Number of consecutive identifiers to request, starting at `first_id`.
    pub count: u32,
    /// Maximum fetches in flight at once.
    pub concurrency: usize,
    pub failure_policy: FailurePolicy,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self { first_id: 1, count: 100, concurrency: 8, failure_policy: FailurePolicy::SkipAndContinue }
    }
}

impl CollectorConfig {
    /// The requested identifiers, or an error when the last one would not fit in a `DocId`.
    fn ids(&self) -> Result<impl Iterator<Item = DocId>, CollectError> {
        let first = self.first_id;
        if self.count > 0 && first.checked_add(self.count - 1).is_none() {
            return Err(CollectError::Range { first_id: first, count: self.count });
        }
        Ok((0..self.count).map(move |offset| first + offset))
    }
}

/// Drives a [`Fetch`] implementation across a fixed identifier range.
pub struct Collector<F> {
    fetcher: Arc<F>,
    source: ComicSource,
    config: CollectorConfig,
}

impl<F: Fetch> Collector<F> {
    pub fn new(fetcher: F, source: ComicSource, config: CollectorConfig) -> Self {
        Self { fetcher: Arc::new(fetcher), source, config }
    }

    pub fn config(&self) -> &CollectorConfig { &self.config }

    /// Fetch every identifier in the configured range.
    ///
    /// Documents come back ordered by id regardless of completion order. Status and decode
    /// failures are handled per [`FailurePolicy`]; a transport failure cancels all
    /// outstanding fetches and is returned instead of a collection.
    pub async fn collect(&self) -> Result<Collection, CollectError> {
        let concurrency = self.config.concurrency.max(1);
        let stop_on_error = self.config.failure_policy == FailurePolicy::StopOnFirstError;
        let mut pending = self.config.ids()?;
        let mut inflight: JoinSet<(DocId, Result<Document, FetchError>)> = JoinSet::new();
        let mut fetched: Vec<(DocId, Document)> = Vec::new();
        let mut first_failure: Option<DocId> = None;
        let mut skipped = 0usize;

        tracing::info!(
            first_id = self.config.first_id,
            count = self.config.count,
            concurrency,
            policy = ?self.config.failure_policy,
            "collecting documents"
        );

        loop {
            while inflight.len() < concurrency && !(stop_on_error && first_failure.is_some()) {
                let Some(id) = pending.next() else { break };
                let fetcher = Arc::clone(&self.fetcher);
                let locator = self.source.locator(id);
                inflight.spawn(async move {
                    let result = fetcher.fetch(id, &locator).await;
                    (id, result)
                });
            }

            let Some(joined) = inflight.join_next().await else { break };
            let (id, result) = match joined {
                Ok(r) => r,
                Err(e) => {
                    inflight.abort_all();
                    return Err(e.into());
                }
            };
            match result {
                Ok(doc) => {
                    tracing::debug!(id, title = %doc.raw_title, "fetched document");
                    fetched.push((id, doc));
                }
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(id, error = %err, "skipping document");
                    skipped += 1;
                    first_failure = Some(first_failure.map_or(id, |f| f.min(id)));
                }
                Err(err) => {
                    tracing::error!(id, error = %err, "aborting collection");
                    inflight.abort_all();
                    return Err(err.into());
                }
            }
        }

        if stop_on_error {
            if let Some(limit) = first_failure {
                fetched.retain(|(id, _)| *id < limit);
            }
        }
        // Completion order is arbitrary; repeated payload ids must resolve by requested id.
        fetched.sort_by_key(|(id, _)| *id);
        let collection = Collection::from_documents(fetched.into_iter().map(|(_, doc)| doc).collect());
        tracing::info!(requested = self.config.count, collected = collection.len(), skipped, "collection finished");
        Ok(collection)
    }
}
