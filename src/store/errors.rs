//! # Storage Errors

use thiserror::Error;

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures raised by a [`ListingStore`](super::ListingStore)
#[derive(Debug, Error)]
pub enum StoreError {
    /// Hosted backend selected but credentials are missing
    #[error("backend not configured: set SUPABASE_URL and SUPABASE_ANON_KEY")]
    NotConfigured,

    /// Transport-level failure talking to the backend
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// Backend answered with a body we could not decode
    #[error("unexpected backend response: {0}")]
    Decode(#[from] serde_json::Error),
}
