//! HTTP client for the diagnostic endpoint.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ServiceError;
use crate::fence::strip_code_fence;

/// Request timeout for diagnosis calls.
pub const DIAGNOSE_TIMEOUT: Duration = Duration::from_secs(60);

/// Request body for `POST /diagnose`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnoseRequest {
    /// The rendered failure trace to analyze.
    pub log_content: String,
}

/// A structured root-cause analysis returned by the diagnostic service.
///
/// The service is expected to fill in all three fields, but an absent field
/// is not a hard failure: the alert formatter substitutes a placeholder so
/// the alert shape stays complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Short description of the root cause.
    #[serde(default)]
    pub root_cause: Option<String>,

    /// The function or step where the failure originated.
    #[serde(default)]
    pub failing_function: Option<String>,

    /// Actionable fix suggestion.
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

/// Client for the diagnostic service.
#[derive(Debug, Clone)]
pub struct DiagnosisClient {
    client: reqwest::Client,
    endpoint: String,
}

impl DiagnosisClient {
    /// Create a client for the given diagnose endpoint with the standard
    /// 60-second request timeout.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(endpoint, DIAGNOSE_TIMEOUT)
    }

    /// Create a client with an explicit request timeout.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be built.
    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Send a failure trace for analysis. One attempt, no retry.
    ///
    /// The response body may be wrapped in a markdown code fence; it is
    /// stripped before parsing.
    ///
    /// # Errors
    /// Returns [`ServiceError`] when the endpoint is unreachable, the call
    /// times out, the service answers with a non-2xx status, or the body
    /// cannot be parsed as a diagnosis.
    #[instrument(skip(self, log_content), fields(endpoint = %self.endpoint))]
    pub async fn diagnose(&self, log_content: &str) -> Result<Diagnosis, ServiceError> {
        let request = DiagnoseRequest {
            log_content: log_content.to_string(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ServiceError::Status {
                status,
                detail: body,
            });
        }

        let diagnosis: Diagnosis = serde_json::from_str(strip_code_fence(&body))?;
        debug!(root_cause = ?diagnosis.root_cause, "Diagnosis received");
        Ok(diagnosis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn full_diagnosis() -> serde_json::Value {
        json!({
            "root_cause": "Division by zero",
            "failing_function": "transform_data",
            "suggested_fix": "Add a zero check"
        })
    }

    async fn client_for(server: &MockServer) -> DiagnosisClient {
        DiagnosisClient::new(format!("{}/diagnose", server.uri())).unwrap()
    }

    #[tokio::test]
    async fn parses_successful_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/diagnose"))
            .and(body_json(json!({ "log_content": "trace blob" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_diagnosis()))
            .mount(&server)
            .await;

        let diagnosis = client_for(&server).await.diagnose("trace blob").await.unwrap();
        assert_eq!(diagnosis.root_cause.as_deref(), Some("Division by zero"));
        assert_eq!(diagnosis.failing_function.as_deref(), Some("transform_data"));
        assert_eq!(diagnosis.suggested_fix.as_deref(), Some("Add a zero check"));
    }

    #[tokio::test]
    async fn fenced_response_parses_identically() {
        let plain = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(full_diagnosis()))
            .mount(&plain)
            .await;

        let fenced = MockServer::start().await;
        let fenced_body = format!("```json\n{}\n```", full_diagnosis());
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(fenced_body))
            .mount(&fenced)
            .await;

        let from_plain = client_for(&plain).await.diagnose("trace").await.unwrap();
        let from_fenced = client_for(&fenced).await.diagnose("trace").await.unwrap();
        assert_eq!(from_plain, from_fenced);
    }

    #[tokio::test]
    async fn missing_fields_parse_as_absent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "root_cause": "Division by zero" })),
            )
            .mount(&server)
            .await;

        let diagnosis = client_for(&server).await.diagnose("trace").await.unwrap();
        assert_eq!(diagnosis.root_cause.as_deref(), Some("Division by zero"));
        assert!(diagnosis.failing_function.is_none());
        assert!(diagnosis.suggested_fix.is_none());
    }

    #[tokio::test]
    async fn non_2xx_surfaces_status_and_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("analysis failed: model unavailable"),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).await.diagnose("trace").await.unwrap_err();
        match err {
            ServiceError::Status { status, detail } => {
                assert_eq!(status.as_u16(), 500);
                assert!(detail.contains("model unavailable"));
            }
            other => panic!("expected Status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
            .mount(&server)
            .await;

        let err = client_for(&server).await.diagnose("trace").await.unwrap_err();
        assert!(matches!(err, ServiceError::Parse(_)));
    }

    #[tokio::test]
    async fn timeout_surfaces_as_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(full_diagnosis())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = DiagnosisClient::with_timeout(
            format!("{}/diagnose", server.uri()),
            Duration::from_millis(100),
        )
        .unwrap();

        let err = client.diagnose("trace").await.unwrap_err();
        match err {
            ServiceError::Http(e) => assert!(e.is_timeout()),
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
