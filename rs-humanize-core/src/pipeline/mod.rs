//! Staged, probability-gated rewriting of a `Passage`.
//!
//! Stages always run in the fixed order of `StageKind`:
//! structural variation, lexical substitution, filler insertion,
//! sentence reordering. Each stage has its own Bernoulli gate, drawn per
//! sentence for sentence-scoped stages and once per passage otherwise.

/// Stage identifiers, per-stage settings, named profiles and the
/// basic/enhanced `RewriteMode`.
pub mod profile;

/// The `Stage` trait, the gate, and the four built-in stages.
pub mod stages;

/// `TransformationPipeline`: runs a profile's stages over a passage.
pub mod transformation;
