//! Failure kinds of a collection run.

use thiserror::Error;

/// Why one document could not be fetched.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, DNS or timeout failure. Aborts the whole run.
    #[error("transport error fetching {locator}: {reason}")]
    Transport { locator: String, reason: String },

    /// The source answered with a non-success status.
    #[error("HTTP status {status} fetching {locator}")]
    Status { locator: String, status: u16 },

    /// The body could not be read, is not JSON, or does not match the payload schema.
    #[error("could not decode {locator}: {reason}")]
    Decode { locator: String, reason: String },
}

impl FetchError {
    /// Status and decode failures only cost one document; transport failures end the run.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, FetchError::Transport { .. })
    }

    pub fn locator(&self) -> &str {
        match self {
            FetchError::Transport { locator, .. }
            | FetchError::Status { locator, .. }
            | FetchError::Decode { locator, .. } => locator,
        }
    }
}

/// Why a collection run produced no collection at all.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("fetch worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("identifier range starting at {first_id} with {count} ids overflows")]
    Range { first_id: u32, count: u32 },
}
