//! Text representation and light-weight linguistics.
//!
//! - `Passage` / `Sentence` / `Token`: lossless surface model
//! - Part-of-speech heuristics for content-word detection
//! - Inflection analysis and re-inflection
//! - Casing transfer helpers

/// Casing detection and transfer between words.
pub mod casing;

/// Inflection analysis (`cars` → `car` + plural) and re-inflection.
pub mod morphology;

/// Passage, sentence and token types, parsing and rendering.
pub mod passage;

/// Closed-class word lists and suffix-based part-of-speech guesses.
pub mod part_of_speech;
