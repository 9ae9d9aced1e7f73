//! Configuration for the failure sentinel.

use std::env;

/// Default diagnostic service endpoint.
const DEFAULT_BRAIN_URL: &str = "http://127.0.0.1:8000/diagnose";

/// Sentinel configuration, read from the environment once at startup and
/// passed into constructors.
#[derive(Debug, Clone)]
pub struct SentinelConfig {
    /// Diagnostic service endpoint for failure analysis.
    pub brain_url: String,
    /// Chat webhook URL for alert delivery.
    pub webhook_url: Option<String>,
}

impl Default for SentinelConfig {
    fn default() -> Self {
        Self {
            brain_url: env::var("BRAIN_API_URL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_BRAIN_URL.to_string()),
            webhook_url: env::var("SLACK_WEBHOOK_URL").ok().filter(|s| !s.is_empty()),
        }
    }
}
