//! The failure dispatch hook.
//!
//! Two-tier degrade-gracefully cascade: primary path (rich diagnosis) ->
//! fallback path (bare emergency alert) -> give-up with a log line. No tier
//! is retried, and the hook never propagates an error to the pipeline.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info};

use diagnosis::{DiagnosisClient, ServiceError};
use notify::{DeliveryError, NotifyChannel, WebhookChannel};

use crate::config::SentinelConfig;
use crate::event::FailureEvent;
use crate::format;

/// Errors caught inside the primary diagnosis-and-notify path.
///
/// Never escapes the hook; it exists so the fallback message can carry the
/// caught error and so construction failures have a concrete type.
#[derive(Debug, Error)]
pub enum HookError {
    #[error(transparent)]
    Diagnosis(#[from] ServiceError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

/// Terminal outcome of one hook invocation.
///
/// Returned for observability and tests; callers are free to ignore it, and
/// no outcome is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// The full diagnosis alert was delivered.
    DiagnosisSent,
    /// The primary path failed and the bare emergency alert was delivered.
    EmergencySent,
    /// Both tiers failed; the failure was logged and swallowed.
    NothingSent,
}

/// The failure sentinel: diagnoses failed steps and alerts the channel.
pub struct FailureSentinel {
    diagnosis: DiagnosisClient,
    channel: Arc<dyn NotifyChannel>,
}

impl FailureSentinel {
    /// Build a sentinel from configuration, wiring the diagnostic client and
    /// the webhook channel.
    ///
    /// # Errors
    /// Returns error if either HTTP client cannot be built.
    pub fn new(config: &SentinelConfig) -> Result<Self, HookError> {
        let diagnosis = DiagnosisClient::new(config.brain_url.clone())?;
        let channel = WebhookChannel::new(config.webhook_url.clone())?;
        Ok(Self {
            diagnosis,
            channel: Arc::new(channel),
        })
    }

    /// Build a sentinel around an explicit client and channel.
    #[must_use]
    pub fn with_parts(diagnosis: DiagnosisClient, channel: Arc<dyn NotifyChannel>) -> Self {
        Self { diagnosis, channel }
    }

    /// Handle one step failure. Runs the cascade to a terminal outcome and
    /// never raises, whatever the inputs or the network do.
    pub async fn on_step_failure(&self, event: &FailureEvent) -> HookOutcome {
        info!(
            pipeline = %event.pipeline,
            step = %event.step,
            occurred_at = %event.occurred_at,
            "Step failed; starting diagnosis"
        );

        let err = match self.diagnose_and_notify(event).await {
            Ok(()) => {
                info!(step = %event.step, "Diagnosis alert delivered");
                return HookOutcome::DiagnosisSent;
            }
            Err(err) => err,
        };

        error!(
            step = %event.step,
            error = %err,
            "Diagnosis path failed; sending emergency alert"
        );

        let message = format::emergency_alert(&event.step, &err.to_string());
        match self.channel.send(&message).await {
            Ok(()) => HookOutcome::EmergencySent,
            Err(final_err) => {
                error!(
                    step = %event.step,
                    error = %final_err,
                    "Emergency alert failed; giving up"
                );
                HookOutcome::NothingSent
            }
        }
    }

    /// The primary path: one diagnosis call, one notification.
    async fn diagnose_and_notify(&self, event: &FailureEvent) -> Result<(), HookError> {
        let diagnosis = self.diagnosis.diagnose(&event.trace).await?;
        info!(step = %event.step, "Diagnosis complete; sending alert");

        let message = format::diagnosis_alert(&event.pipeline, &event.step, &diagnosis);
        self.channel.send(&message).await?;
        Ok(())
    }
}
