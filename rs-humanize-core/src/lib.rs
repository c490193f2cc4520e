//! Text rewriting core for making generated prose read as human-written.
//!
//! This crate provides:
//! - A lossless passage model (sentences of tokens with whitespace metadata)
//! - A memoizing synonym repository over a pluggable lexical resource
//! - A fixed-order, probability-gated transformation pipeline
//!   (structural variation, lexical substitution, filler insertion,
//!   sentence reordering)
//! - A request-level orchestrator selecting the `basic` or `enhanced` profile
//!
//! Paraphrase-model invocation and transport live in the entry points; the
//! core only consumes the paraphrased draft as plain text.

/// Error taxonomy and the crate `Result` alias.
pub mod error;

/// Passage model, part-of-speech heuristics, morphology and casing.
pub mod text;

/// Lexical resources and the cached synonym repository.
pub mod synonym;

/// Profiles, stages and the transformation pipeline.
pub mod pipeline;

/// The rewrite orchestrator and its statistics.
pub mod rewrite;

/// File helpers (sidecar paths, freshness checks).
///
/// Mostly internal; `resolve_path` is used by the server.
pub mod io;

pub use error::{HumanizeError, Result};
pub use pipeline::profile::{ProfileSet, RewriteMode, StageKind, StageSettings, TransformProfile};
pub use pipeline::transformation::TransformationPipeline;
pub use rewrite::orchestrator::{RewriteOrchestrator, RewriteOutcome};
pub use rewrite::statistics::RewriteStatistics;
pub use synonym::lexical_resource::{LexicalResource, SenseGrouping, Thesaurus, UnavailableResource};
pub use synonym::repository::{SynonymCache, SynonymRepository};
pub use text::passage::Passage;
