//! Alert message formatting.
//!
//! Pure functions from a diagnosis (or an error) to chat message text. The
//! full-diagnosis message always has the same shape: a missing field renders
//! as a placeholder instead of dropping its section.

use diagnosis::Diagnosis;

/// Placeholder for diagnosis fields the service did not fill in.
const FIELD_PLACEHOLDER: &str = "N/A";

/// Placeholder for a missing fix suggestion.
const NO_SUGGESTION: &str = "no suggestion available";

/// Render the full diagnosis alert for a failed step.
#[must_use]
pub fn diagnosis_alert(pipeline: &str, step: &str, diagnosis: &Diagnosis) -> String {
    let root_cause = diagnosis.root_cause.as_deref().unwrap_or(FIELD_PLACEHOLDER);
    let failing_function = diagnosis
        .failing_function
        .as_deref()
        .unwrap_or(FIELD_PLACEHOLDER);
    let suggested_fix = diagnosis.suggested_fix.as_deref().unwrap_or(NO_SUGGESTION);

    format!(
        ":rotating_light: *AIOps Sentinel Alert* :rotating_light:\n\
         *Pipeline*: `{pipeline}`\n\
         *Step*: `{step}`\n\
         *Status*: :x: *Failed*\n\
         ---\n\
         *Root Cause*:\n\
         {root_cause}\n\
         *Failing Function*:\n\
         `{failing_function}`\n\
         *Suggested Fix*:\n\
         ```{suggested_fix}```"
    )
}

/// Render the emergency message sent when the diagnosis path itself failed.
#[must_use]
pub fn emergency_alert(step: &str, error: &str) -> String {
    format!(
        ":alert: *Sentinel self-failure* :alert:\n\
         Could not analyze the failure of step '{step}'.\n\
         Error: {error}"
    )
}
