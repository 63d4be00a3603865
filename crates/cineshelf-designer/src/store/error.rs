use std::io;

use thiserror::Error;

/// Errors raised by a [`KeyValueStore`](super::KeyValueStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read `{key}`: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{key}`: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The backend refused the write because it would exceed its quota.
    #[error("writing `{key}` needs {needed} bytes but the store allows {quota}")]
    QuotaExceeded {
        key: String,
        needed: usize,
        quota: usize,
    },

    #[error("failed to serialize styles: {0}")]
    Serialize(#[from] serde_json::Error),
}
