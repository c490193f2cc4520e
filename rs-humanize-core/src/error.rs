use std::io;

/// Result alias used by the loading and configuration APIs.
pub type Result<T> = std::result::Result<T, HumanizeError>;

/// Errors raised inside the rewriting core.
///
/// Only loaders (thesaurus files, profile files) hand these to callers.
/// The rewrite path itself recovers from every variant locally: a
/// `ResourceUnavailable` becomes an empty synonym list, a `StageFailure`
/// skips one stage for one unit, and `MalformedInput` returns the text as-is.
#[derive(Debug, thiserror::Error)]
pub enum HumanizeError {
	/// The lexical resource cannot be reached or has no data for a lemma.
	#[error("Lexical resource unavailable: {0}")]
	ResourceUnavailable(String),

	/// Empty or otherwise unusable input text.
	#[error("Malformed input: {0}")]
	MalformedInput(String),

	/// A stage cannot safely rewrite a given unit.
	#[error("Stage {stage} skipped: {reason}")]
	StageFailure { stage: &'static str, reason: String },

	/// A profile definition failed validation.
	#[error("Invalid profile: {0}")]
	InvalidProfile(String),

	/// A thesaurus line could not be parsed.
	#[error("Parse error at line {line}: {message}")]
	Parse { line: usize, message: String },

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Binary encoding error: {0}")]
	Postcard(#[from] postcard::Error),
}

impl HumanizeError {
	/// Create a stage failure for `stage`.
	pub fn stage(stage: &'static str, reason: impl Into<String>) -> Self {
		HumanizeError::StageFailure { stage, reason: reason.into() }
	}

	/// Create a profile validation error.
	pub fn profile(message: impl Into<String>) -> Self {
		HumanizeError::InvalidProfile(message.into())
	}
}
