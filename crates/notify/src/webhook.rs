//! Webhook-POST notification channel.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::DeliveryError;
use crate::NotifyChannel;

/// Request timeout for webhook deliveries. Shorter than the diagnostic
/// call's timeout so the fallback path stays bounded.
pub const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// The only payload shape the webhook accepts.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
}

/// Chat channel backed by a webhook-style POST endpoint.
pub struct WebhookChannel {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl WebhookChannel {
    /// Create a webhook channel for the given destination URL.
    ///
    /// A `None` destination yields a disabled channel whose sends fail with
    /// [`DeliveryError::NotConfigured`].
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(webhook_url: Option<String>) -> Result<Self, DeliveryError> {
        if webhook_url.is_none() {
            debug!("Webhook channel disabled (no destination URL)");
        }

        let client = reqwest::Client::builder().timeout(NOTIFY_TIMEOUT).build()?;
        Ok(Self {
            webhook_url,
            client,
        })
    }
}

#[async_trait]
impl NotifyChannel for WebhookChannel {
    fn name(&self) -> &'static str {
        "webhook"
    }

    fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }

    async fn send(&self, text: &str) -> Result<(), DeliveryError> {
        let webhook_url = self
            .webhook_url
            .as_deref()
            .ok_or(DeliveryError::NotConfigured("webhook URL"))?;

        debug!(channel = "webhook", "Delivering notification");

        let response = self
            .client
            .post(webhook_url)
            .json(&WebhookPayload { text })
            .send()
            .await?;

        if response.status().is_success() {
            debug!(channel = "webhook", "Notification delivered");
            Ok(())
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            warn!(
                channel = "webhook",
                status = %status,
                body = %body,
                "Webhook request failed"
            );

            Err(DeliveryError::Rejected { status, body })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn sends_single_text_field_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/hook"))
            .and(body_json(json!({ "text": "step failed" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(Some(format!("{}/hook", server.uri()))).unwrap();
        channel.send("step failed").await.unwrap();
    }

    #[tokio::test]
    async fn rejection_surfaces_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404).set_body_string("no_team"))
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(Some(format!("{}/hook", server.uri()))).unwrap();
        let err = channel.send("step failed").await.unwrap_err();
        match err {
            DeliveryError::Rejected { status, body } => {
                assert_eq!(status.as_u16(), 404);
                assert_eq!(body, "no_team");
            }
            other => panic!("expected Rejected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unconfigured_channel_fails_without_sending() {
        let channel = WebhookChannel::new(None).unwrap();
        assert!(!channel.enabled());
        let err = channel.send("step failed").await.unwrap_err();
        assert!(matches!(err, DeliveryError::NotConfigured(_)));
    }
}
