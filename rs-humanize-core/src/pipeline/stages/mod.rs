use rand::{Rng, RngCore};

use crate::error::{HumanizeError, Result};
use crate::pipeline::profile::{StageKind, StageSettings};
use crate::synonym::repository::SynonymRepository;
use crate::text::passage::{Passage, Sentence};

/// Clause fronting and connective movement.
pub mod structural;

/// Synonym substitution of content words.
pub mod lexical;

/// Hedge / discourse filler insertion.
pub mod filler;

/// Adjacent swaps of independent sentence blocks.
pub mod reorder;

pub use filler::FillerInsertion;
pub use lexical::LexicalSubstitution;
pub use reorder::SentenceReordering;
pub use structural::StructuralVariation;

/// Per-invocation counters of what the stages changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StageTally {
	pub structural: usize,
	pub substitutions: usize,
	pub fillers: usize,
	pub reorders: usize,
}

/// Everything a stage may consult while rewriting one unit.
///
/// The random source is injected so callers (and tests) control every
/// gate and choice through a seed.
pub struct StageContext<'a> {
	pub rng: &'a mut dyn RngCore,
	pub synonyms: &'a SynonymRepository,
	pub tally: &'a mut StageTally,
}

/// One rewrite stage.
///
/// The pipeline draws the gate; a stage is only called for units whose
/// gate fired. Returning an error means "cannot apply safely here": the
/// pipeline keeps the unit unchanged and moves on.
pub trait Stage: Send + Sync {
	fn kind(&self) -> StageKind;

	/// Rewrites one sentence (sentence-scoped stages).
	fn rewrite_sentence(&self, _sentence: &Sentence, _settings: &StageSettings, _ctx: &mut StageContext<'_>) -> Result<Sentence> {
		Err(HumanizeError::stage(self.kind().name(), "not a sentence stage"))
	}

	/// Rewrites a whole passage (passage-scoped stages).
	fn rewrite_passage(&self, _passage: &Passage, _settings: &StageSettings, _ctx: &mut StageContext<'_>) -> Result<Passage> {
		Err(HumanizeError::stage(self.kind().name(), "not a passage stage"))
	}
}

/// Independent Bernoulli draw against `probability`.
///
/// 0 never fires and 1 always fires, without consuming randomness.
pub fn gate(rng: &mut dyn RngCore, probability: f64) -> bool {
	if probability <= 0.0 {
		return false;
	}
	if probability >= 1.0 {
		return true;
	}
	rng.random_bool(probability)
}

/// Builds the default stage for `kind`.
pub fn default_stage(kind: StageKind) -> Box<dyn Stage> {
	match kind {
		StageKind::Structural => Box::new(StructuralVariation),
		StageKind::Lexical => Box::new(LexicalSubstitution),
		StageKind::Filler => Box::new(FillerInsertion),
		StageKind::Reorder => Box::new(SentenceReordering),
	}
}

/// Subordinating conjunctions that open a movable clause.
pub(crate) const SUBORDINATORS: &[&str] = &[
	"because", "although", "though", "while", "when", "whenever", "if", "unless", "since", "after",
	"before", "once", "whereas",
];

/// Sentence adverbs that can move between the start and end of a sentence.
pub(crate) const MOVABLE_CONNECTIVES: &[&str] = &["however", "nevertheless", "nonetheless"];

/// Connectives that tie a sentence to the one before it.
pub(crate) const LINKING_CONNECTIVES: &[&str] = &[
	"however", "therefore", "thus", "hence", "moreover", "furthermore", "additionally",
	"consequently", "nevertheless", "nonetheless", "accordingly", "meanwhile", "similarly",
	"likewise", "besides", "instead", "otherwise",
];
