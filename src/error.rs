//! Interceptor error types.

use feo_overlay::OverlayError;

/// Errors crossing the interceptor boundary.
///
/// None of these escape [`crate::pipeline::Interceptor::process_request`];
/// every variant degrades to returning the remote body verbatim.
#[derive(Debug, thiserror::Error)]
pub enum InterceptError {
    #[error("overlay error: {0}")]
    Overlay(#[from] OverlayError),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("merge error: {0}")]
    Merge(#[from] MergeError),
}

/// Errors produced by the mergers themselves.
#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("frontend '{frontend}' declares no CDN path")]
    MissingCdnPath { frontend: String },
}
