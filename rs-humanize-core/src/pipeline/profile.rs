use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HumanizeError, Result};

/// Pipeline stages, declared in execution order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StageKind {
	Structural,
	Lexical,
	Filler,
	Reorder,
}

/// Unit a stage gate is drawn for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageScope {
	Sentence,
	Passage,
}

impl StageKind {
	/// All stages in execution order.
	pub const ORDER: [StageKind; 4] = [StageKind::Structural, StageKind::Lexical, StageKind::Filler, StageKind::Reorder];

	pub fn name(self) -> &'static str {
		match self {
			StageKind::Structural => "structural",
			StageKind::Lexical => "lexical",
			StageKind::Filler => "filler",
			StageKind::Reorder => "reorder",
		}
	}

	pub fn scope(self) -> StageScope {
		match self {
			StageKind::Reorder => StageScope::Passage,
			_ => StageScope::Sentence,
		}
	}
}

/// Default hedges and discourse markers for filler insertion.
pub const DEFAULT_FILLERS: &[&str] = &[
	"Honestly",
	"In fact",
	"To be fair",
	"Admittedly",
	"Generally speaking",
	"As it turns out",
	"Interestingly",
	"Of course",
	"In practice",
	"Frankly",
];

fn default_word_probability() -> f64 {
	1.0
}

/// Gate probability and parameters of one stage.
///
/// Parameters a stage does not use are ignored by it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StageSettings {
	pub kind: StageKind,

	/// Gate probability in [0, 1]: per sentence, or per passage for `reorder`.
	pub probability: f64,

	/// `lexical`: probability that an eligible word is substituted.
	#[serde(default = "default_word_probability")]
	pub word_probability: f64,

	/// `lexical`: cap on substitutions per sentence, 0 for no cap.
	#[serde(default)]
	pub max_substitutions: usize,

	/// `reorder`: number of adjacent block swaps per passage (at least 1).
	#[serde(default)]
	pub max_swaps: usize,

	/// `structural` / `filler`: sentences with fewer words are skipped.
	#[serde(default)]
	pub min_words: usize,

	/// `filler`: phrases to pick from; empty means `DEFAULT_FILLERS`.
	#[serde(default)]
	pub fillers: Vec<String>,
}

impl StageSettings {
	/// Settings with the given gate probability and neutral parameters.
	pub fn new(kind: StageKind, probability: f64) -> Self {
		Self {
			kind,
			probability,
			word_probability: default_word_probability(),
			max_substitutions: 0,
			max_swaps: 1,
			min_words: 0,
			fillers: Vec::new(),
		}
	}

	pub fn with_word_probability(mut self, word_probability: f64) -> Self {
		self.word_probability = word_probability;
		self
	}

	pub fn with_max_substitutions(mut self, max_substitutions: usize) -> Self {
		self.max_substitutions = max_substitutions;
		self
	}

	pub fn with_max_swaps(mut self, max_swaps: usize) -> Self {
		self.max_swaps = max_swaps;
		self
	}

	pub fn with_min_words(mut self, min_words: usize) -> Self {
		self.min_words = min_words;
		self
	}

	pub fn with_fillers<S: Into<String>>(mut self, fillers: impl IntoIterator<Item = S>) -> Self {
		self.fillers = fillers.into_iter().map(Into::into).collect();
		self
	}

	fn validate(&self) -> Result<()> {
		check_probability(self.kind, "probability", self.probability)?;
		check_probability(self.kind, "word_probability", self.word_probability)
	}
}

fn check_probability(kind: StageKind, field: &str, value: f64) -> Result<()> {
	if !(0.0..=1.0).contains(&value) {
		return Err(HumanizeError::profile(format!(
			"{}.{field} must be between 0.0 and 1.0, got {value}",
			kind.name()
		)));
	}
	Ok(())
}

/// Unvalidated profile as found in a configuration file.
#[derive(Deserialize, Debug)]
pub struct ProfileDef {
	pub name: String,
	pub stages: Vec<StageSettings>,
}

/// Named, ordered bundle of stage settings.
///
/// # Invariants
/// - Stages are sorted in `StageKind` order, at most one per kind
/// - Every probability lies in [0, 1]
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(try_from = "ProfileDef")]
pub struct TransformProfile {
	name: String,
	stages: Vec<StageSettings>,
}

impl TryFrom<ProfileDef> for TransformProfile {
	type Error = HumanizeError;

	fn try_from(def: ProfileDef) -> Result<Self> {
		Self::new(def.name, def.stages)
	}
}

impl TransformProfile {
	/// Validates and orders `stages`.
	///
	/// # Errors
	/// Returns an error on duplicate stages or out-of-range probabilities.
	pub fn new(name: impl Into<String>, mut stages: Vec<StageSettings>) -> Result<Self> {
		let name = name.into();
		for settings in &stages {
			settings.validate()?;
		}
		stages.sort_by_key(|s| s.kind);
		if stages.windows(2).any(|w| w[0].kind == w[1].kind) {
			return Err(HumanizeError::profile(format!("profile '{name}' lists a stage twice")));
		}
		Ok(Self { name, stages })
	}

	/// Latency-friendly profile: low probabilities, no filler injection.
	pub fn basic() -> Self {
		Self {
			name: "basic".to_owned(),
			stages: vec![
				StageSettings::new(StageKind::Structural, 0.15).with_min_words(4),
				StageSettings::new(StageKind::Lexical, 0.35).with_word_probability(0.2).with_max_substitutions(2),
				StageSettings::new(StageKind::Reorder, 0.1).with_max_swaps(1),
			],
		}
	}

	/// Full stage set with higher probabilities.
	pub fn enhanced() -> Self {
		Self {
			name: "enhanced".to_owned(),
			stages: vec![
				StageSettings::new(StageKind::Structural, 0.35).with_min_words(4),
				StageSettings::new(StageKind::Lexical, 0.7).with_word_probability(0.35).with_max_substitutions(4),
				StageSettings::new(StageKind::Filler, 0.2).with_min_words(5),
				StageSettings::new(StageKind::Reorder, 0.3).with_max_swaps(2),
			],
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Stage settings in execution order.
	pub fn stages(&self) -> &[StageSettings] {
		&self.stages
	}

	pub fn stage(&self, kind: StageKind) -> Option<&StageSettings> {
		self.stages.iter().find(|s| s.kind == kind)
	}

	/// Sets the gate probability of a stage.
	///
	/// # Errors
	/// Returns an error if the value is outside [0, 1] or the stage is not
	/// part of this profile.
	pub fn set_probability(&mut self, kind: StageKind, probability: f64) -> Result<()> {
		check_probability(kind, "probability", probability)?;
		let settings = self
			.stages
			.iter_mut()
			.find(|s| s.kind == kind)
			.ok_or_else(|| HumanizeError::profile(format!("stage {} not in profile '{}'", kind.name(), self.name)))?;
		settings.probability = probability;
		Ok(())
	}

	/// Sets every stage gate to `probability`.
	pub fn set_all_probabilities(&mut self, probability: f64) -> Result<()> {
		for kind in self.stages.iter().map(|s| s.kind).collect::<Vec<_>>() {
			self.set_probability(kind, probability)?;
		}
		Ok(())
	}
}

/// Requested rewriting intensity.
///
/// `Basic` is the default: the paraphrase step already contributes most of
/// the surface variation, so the cheaper profile is used unless a caller
/// asks for `Enhanced`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RewriteMode {
	#[default]
	Basic,
	Enhanced,
}

impl RewriteMode {
	/// Resolves an optional `enhanced` flag as received at an entry point.
	pub fn from_flag(enhanced: Option<bool>) -> Self {
		match enhanced {
			Some(true) => RewriteMode::Enhanced,
			Some(false) | None => RewriteMode::Basic,
		}
	}

	pub fn is_enhanced(self) -> bool {
		self == RewriteMode::Enhanced
	}
}

/// The two canonical profiles, loaded once at start-up.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfileSet {
	pub basic: TransformProfile,
	pub enhanced: TransformProfile,
}

impl Default for ProfileSet {
	fn default() -> Self {
		Self { basic: TransformProfile::basic(), enhanced: TransformProfile::enhanced() }
	}
}

impl ProfileSet {
	/// Parses a JSON profile set (`{"basic": {...}, "enhanced": {...}}`).
	pub fn from_json_str(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads a JSON profile set from disk.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let json = std::fs::read_to_string(path)?;
		Self::from_json_str(&json)
	}

	pub fn select(&self, mode: RewriteMode) -> &TransformProfile {
		match mode {
			RewriteMode::Basic => &self.basic,
			RewriteMode::Enhanced => &self.enhanced,
		}
	}
}
