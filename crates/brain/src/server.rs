//! HTTP server for the diagnostic engine.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tracing::{error, info};

use diagnosis::DiagnoseRequest;

use crate::model::{Analysis, ModelClient};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Model client; absent when no API key was configured.
    pub model: Option<Arc<ModelClient>>,
}

/// Build the HTTP router for the diagnostic engine.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Liveness check for manual probing; the failure hook never calls it
        .route("/", get(health_check))
        .route("/diagnose", post(diagnose))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "diagnostic engine running" }))
}

/// Analyze a failure log and return the three-field diagnosis.
async fn diagnose(
    State(state): State<AppState>,
    Json(request): Json<DiagnoseRequest>,
) -> Result<Json<Analysis>, (StatusCode, Json<Value>)> {
    let Some(model) = &state.model else {
        error!("Model client not configured");
        return Err(error_response(
            "model not initialized; check the API key".to_string(),
        ));
    };

    info!(log_bytes = request.log_content.len(), "Diagnosing failure log");

    match model.analyze(&request.log_content).await {
        Ok(analysis) => {
            info!(root_cause = %analysis.root_cause, "Analysis complete");
            Ok(Json(analysis))
        }
        Err(err) => {
            error!(error = %err, "Analysis failed");
            Err(error_response(format!("analysis failed: {err}")))
        }
    }
}

fn error_response(detail: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "detail": detail })),
    )
}
