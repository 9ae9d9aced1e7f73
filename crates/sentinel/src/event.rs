//! Failure event capture.

use chrono::{DateTime, Utc};

/// A step failure, captured at the moment the step raised.
///
/// One event corresponds to exactly one hook invocation; the event is
/// read-only once built.
#[derive(Debug, Clone)]
pub struct FailureEvent {
    /// Name of the enclosing pipeline.
    pub pipeline: String,
    /// Name of the failing step.
    pub step: String,
    /// The raised error's message.
    pub error: String,
    /// Rendered trace: the error message plus its full cause chain.
    pub trace: String,
    /// When the failure was captured.
    pub occurred_at: DateTime<Utc>,
}

impl FailureEvent {
    /// Capture a failure from a step's error, rendering the cause chain into
    /// the trace blob that is sent for diagnosis.
    #[must_use]
    pub fn capture(pipeline: &str, step: &str, error: &anyhow::Error) -> Self {
        Self {
            pipeline: pipeline.to_string(),
            step: step.to_string(),
            error: error.to_string(),
            trace: format!("{error:?}"),
            occurred_at: Utc::now(),
        }
    }
}
