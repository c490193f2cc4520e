//! Request-level entry into the rewriting core.
//!
//! `RewriteOrchestrator` picks the profile for the requested mode, chooses
//! between the paraphrased draft and the original text, runs the pipeline
//! and reports what changed.

/// `RewriteOrchestrator` and `RewriteOutcome`.
pub mod orchestrator;

/// Per-request statistics returned alongside the text.
pub mod statistics;
