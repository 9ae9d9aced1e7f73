//! Thin pipeline collaborator.
//!
//! Just enough of a sequential step runner to host the failure hook: each
//! step maps the previous step's output to its own. Not a scheduler; there
//! is no retry, no concurrency, and no persistence.

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::event::FailureEvent;
use crate::hook::FailureSentinel;

type StepFn = fn(Value) -> Result<Value>;

struct Step {
    name: &'static str,
    run: StepFn,
}

/// A named, ordered chain of steps.
pub struct Pipeline {
    name: String,
    steps: Vec<Step>,
}

impl Pipeline {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Append a named step.
    #[must_use]
    pub fn step(mut self, name: &'static str, run: StepFn) -> Self {
        self.steps.push(Step { name, run });
        self
    }

    /// Run the steps in order, feeding each step the previous step's output.
    ///
    /// A failing step triggers exactly one sentinel hook invocation, after
    /// which the step's own error propagates to the caller unchanged.
    ///
    /// # Errors
    /// Returns the first failing step's error.
    pub async fn run(&self, sentinel: &FailureSentinel) -> Result<Value> {
        let mut data = Value::Null;

        for step in &self.steps {
            info!(pipeline = %self.name, step = step.name, "Running step");
            match (step.run)(data) {
                Ok(output) => data = output,
                Err(err) => {
                    let event = FailureEvent::capture(&self.name, step.name, &err);
                    sentinel.on_step_failure(&event).await;
                    return Err(err).with_context(|| format!("step '{}' failed", step.name));
                }
            }
        }

        Ok(data)
    }
}
