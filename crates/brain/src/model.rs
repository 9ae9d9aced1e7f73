//! Client for the generative-model backend.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use diagnosis::strip_code_fence;

/// Gemini REST API base.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout for model calls. Below the diagnostic client's 60s so a
/// slow backend fails inside the engine rather than at the caller.
const MODEL_TIMEOUT: Duration = Duration::from_secs(50);

/// Instructions the model must follow when analyzing a failure log.
const SYSTEM_PROMPT: &str = r#"You are a senior SRE analyzing the failure log of a data pipeline step.
Reply with a single JSON object and nothing else, in exactly this shape:

{
  "root_cause": "one-sentence description of the root cause",
  "failing_function": "the specific function or step that failed",
  "suggested_fix": "an actionable code-level fix, markdown allowed"
}

Rules:
1. No prose before or after the JSON object.
2. Base the analysis strictly on the traceback in the provided log.
3. Keep root_cause concise."#;

/// Errors from the model backend.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Transport failure or undecodable backend response
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-2xx status
    #[error("model backend returned {status}: {detail}")]
    Status {
        status: reqwest::StatusCode,
        detail: String,
    },

    /// The model's reply was not a valid three-field analysis
    #[error("model reply was not a valid analysis: {0}")]
    Parse(#[from] serde_json::Error),

    /// The backend returned no candidate text at all
    #[error("model reply contained no text")]
    EmptyReply,
}

/// The three required analysis fields the diagnostic engine returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Analysis {
    pub root_cause: String,
    pub failing_function: String,
    pub suggested_fix: String,
}

// =============================================================================
// Gemini generateContent wire types (the subset this service uses)
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct ModelClient {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl ModelClient {
    /// Create a model client for the given API key and model name.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(api_key: String, model: String) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder().timeout(MODEL_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key,
            model,
        })
    }

    /// Create a client with a custom API base URL (for testing)
    #[cfg(test)]
    fn with_api_base(
        api_base: impl Into<String>,
        api_key: &str,
        model: &str,
    ) -> Result<Self, ModelError> {
        let mut client = Self::new(api_key.to_string(), model.to_string())?;
        client.api_base = api_base.into();
        Ok(client)
    }

    /// Ask the model for a root-cause analysis of a failure log.
    ///
    /// The model's reply may arrive wrapped in a markdown code fence; the
    /// fence is stripped before parsing. All three analysis fields are
    /// required here.
    ///
    /// # Errors
    /// Returns [`ModelError`] on transport failure, a non-2xx backend
    /// status, an empty reply, or a reply that is not a valid analysis.
    pub async fn analyze(&self, log_content: &str) -> Result<Analysis, ModelError> {
        let prompt = format!("{SYSTEM_PROMPT}\n\nFailure log:\n{log_content}");
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.2,
                max_output_tokens: 2048,
            },
        };

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );

        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ModelError::Status { status, detail });
        }

        let reply: GenerateResponse = response.json().await?;
        let text = reply
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(ModelError::EmptyReply)?;

        debug!(reply = %text, "Raw model reply");

        let analysis: Analysis = serde_json::from_str(strip_code_fence(&text))?;
        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ANALYSIS_JSON: &str = r#"{"root_cause":"Division by zero","failing_function":"transform_data","suggested_fix":"Add a zero check"}"#;

    fn reply_with(text: &str) -> serde_json::Value {
        json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
    }

    async fn client_for(server: &MockServer) -> ModelClient {
        ModelClient::with_api_base(server.uri(), "test-key", "test-model").unwrap()
    }

    #[tokio::test]
    async fn parses_model_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_with(ANALYSIS_JSON)))
            .mount(&server)
            .await;

        let analysis = client_for(&server).await.analyze("trace").await.unwrap();
        assert_eq!(analysis.root_cause, "Division by zero");
        assert_eq!(analysis.failing_function, "transform_data");
        assert_eq!(analysis.suggested_fix, "Add a zero check");
    }

    #[tokio::test]
    async fn strips_fence_from_model_reply() {
        let server = MockServer::start().await;
        let fenced = format!("```json\n{ANALYSIS_JSON}\n```");
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply_with(&fenced)))
            .mount(&server)
            .await;

        let analysis = client_for(&server).await.analyze("trace").await.unwrap();
        assert_eq!(analysis.root_cause, "Division by zero");
    }

    #[tokio::test]
    async fn missing_field_in_reply_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(reply_with(r#"{"root_cause":"Division by zero"}"#)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.analyze("trace").await.unwrap_err();
        assert!(matches!(err, ModelError::Parse(_)));
    }

    #[tokio::test]
    async fn empty_candidates_is_an_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).await.analyze("trace").await.unwrap_err();
        assert!(matches!(err, ModelError::EmptyReply));
    }

    #[tokio::test]
    async fn backend_error_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.analyze("trace").await.unwrap_err();
        match err {
            ModelError::Status { status, detail } => {
                assert_eq!(status.as_u16(), 403);
                assert!(detail.contains("API key not valid"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }
}
