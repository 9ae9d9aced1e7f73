//! Chat notification channels for pipeline failure alerts.
//!
//! Alerts produced by the failure sentinel are delivered through a
//! [`NotifyChannel`]. [`WebhookChannel`] is the webhook-POST implementation
//! used for Slack-style incoming webhooks: the whole message travels as a
//! single `text` field.
//!
//! Delivery is a single attempt with a short timeout. A rejected or
//! unreachable destination surfaces as [`DeliveryError`]; nothing here
//! retries, batches, or confirms delivery beyond the HTTP status.
//!
//! # Usage
//!
//! ```no_run
//! use notify::{NotifyChannel, WebhookChannel};
//!
//! # async fn example() -> Result<(), notify::DeliveryError> {
//! let channel = WebhookChannel::new(Some("https://hooks.example.com/T000/B000".to_string()))?;
//! channel.send("pipeline step failed").await?;
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod webhook;

pub use error::DeliveryError;
pub use webhook::WebhookChannel;

use async_trait::async_trait;

/// Trait for chat notification channels.
#[async_trait]
pub trait NotifyChannel: Send + Sync {
    /// Get the name of this channel.
    fn name(&self) -> &'static str;

    /// Check if this channel has a destination configured.
    fn enabled(&self) -> bool;

    /// Deliver a message to this channel. One attempt, no retry.
    async fn send(&self, text: &str) -> Result<(), DeliveryError>;
}
