//! Error types for notification delivery.

use thiserror::Error;

/// Errors that can occur when delivering a notification.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// HTTP request failed (unreachable destination or timeout)
    #[error("webhook request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Destination rejected the payload with a non-2xx status
    #[error("webhook rejected message ({status}): {body}")]
    Rejected {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Channel has no destination configured
    #[error("channel not configured: {0}")]
    NotConfigured(&'static str),
}
