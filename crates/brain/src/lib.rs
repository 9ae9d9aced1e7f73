//! Diagnostic engine for pipeline failure logs.
//!
//! Receives a failure trace over HTTP (`POST /diagnose`) and returns a
//! structured root-cause analysis produced by a generative-model backend.
//! The analysis contract is strict on this side: the model must return all
//! three fields or the request fails with a detail string.

#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod model;
pub mod server;
