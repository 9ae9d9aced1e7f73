//! Failure sentinel for data pipelines.
//!
//! When a pipeline step fails, the sentinel captures the failure trace, asks
//! the diagnostic service for a root-cause analysis, and posts a formatted
//! alert to the team chat channel. The handling is a two-tier cascade:
//!
//! 1. Primary path: diagnose the trace, format a rich alert, deliver it.
//! 2. Fallback path: on any primary-path error, deliver a bare emergency
//!    message naming the failed step and the error.
//! 3. If the emergency delivery also fails, log and give up.
//!
//! No tier is retried. The hook never raises, and the pipeline's own failure
//! propagation is unaffected by anything the sentinel does.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod event;
pub mod format;
pub mod hook;
pub mod pipeline;

pub use config::SentinelConfig;
pub use event::FailureEvent;
pub use hook::{FailureSentinel, HookError, HookOutcome};
pub use pipeline::Pipeline;
