//! State module for per-URL decisions
//!
//! This module provides the values that drive the per-URL state machine.
//!
//! # Components
//!
//! - `Classification`: Result of inspecting a URL's index status
//! - `SubmitOutcome`: Result of asking for a URL to be indexed
//! - `UrlOutcome`: Final resolution of a URL within one run

mod outcome;

pub use outcome::{Classification, SubmitOutcome, UrlOutcome};
