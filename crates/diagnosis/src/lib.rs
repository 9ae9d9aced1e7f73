//! Client for the AIO diagnostic service.
//!
//! The diagnostic service turns a failure trace into a structured root-cause
//! analysis. This crate provides the wire types and a [`DiagnosisClient`]
//! that performs a single, timeout-bounded `POST /diagnose` call per failure.
//! No retries: resilience is the caller's concern (the failure sentinel
//! degrades to an emergency alert when diagnosis fails).
//!
//! # Usage
//!
//! ```no_run
//! use diagnosis::DiagnosisClient;
//!
//! # async fn example() -> Result<(), diagnosis::ServiceError> {
//! let client = DiagnosisClient::new("http://127.0.0.1:8000/diagnose")?;
//! let diagnosis = client.diagnose("Traceback (most recent call last): ...").await?;
//! println!("{:?}", diagnosis.root_cause);
//! # Ok(())
//! # }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod error;
pub mod fence;

pub use client::{Diagnosis, DiagnoseRequest, DiagnosisClient};
pub use error::ServiceError;
pub use fence::strip_code_fence;
