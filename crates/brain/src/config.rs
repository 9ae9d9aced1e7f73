//! Configuration for the diagnostic engine service.

use std::env;

/// Default model used for analysis.
const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";

/// Diagnostic engine configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct BrainConfig {
    /// HTTP port to serve on.
    pub port: u16,
    /// API key for the model backend. The service starts without one, but
    /// `/diagnose` will answer with an error detail.
    pub api_key: Option<String>,
    /// Model name for analysis requests.
    pub model: String,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            port: env::var("BRAIN_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            api_key: env::var("GOOGLE_API_KEY").ok().filter(|s| !s.is_empty()),
            model: env::var("BRAIN_MODEL")
                .ok()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }
}
