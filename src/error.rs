//! Error types shared across the fetch and normalization pipeline.

use thiserror::Error;

/// Failures a provider can surface while turning a source document into a feed.
///
/// Transport and parse failures are propagated to the caller as-is; there is
/// no retry and no partial recovery beyond the item-level skips the individual
/// providers perform themselves.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The HTTP exchange failed: connection error or a non-success status.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The source document did not match the structure the provider expects.
    #[error("unexpected source structure: {0}")]
    Parse(String),

    /// No provider is registered under the requested id.
    #[error("unsupported source: {0}")]
    UnknownProvider(String),
}

pub type Result<T> = std::result::Result<T, FeedError>;
