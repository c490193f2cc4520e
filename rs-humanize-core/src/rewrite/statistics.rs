use serde::Serialize;

use crate::pipeline::profile::RewriteMode;
use crate::pipeline::stages::StageTally;

/// What one rewrite did, lengths in characters.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct RewriteStatistics {
	pub mode: RewriteMode,
	pub original_length: usize,
	/// Length of the paraphrased draft, when one was used.
	pub paraphrased_length: Option<usize>,
	pub final_length: usize,
	pub sentence_count: usize,
	pub structural_changes: usize,
	pub substitutions: usize,
	pub fillers: usize,
	pub reorders: usize,
}

impl RewriteStatistics {
	pub(crate) fn new(
		mode: RewriteMode,
		original: &str,
		paraphrased: Option<&str>,
		rewritten: &str,
		sentence_count: usize,
		tally: StageTally,
	) -> Self {
		Self {
			mode,
			original_length: original.chars().count(),
			paraphrased_length: paraphrased.map(|p| p.chars().count()),
			final_length: rewritten.chars().count(),
			sentence_count,
			structural_changes: tally.structural,
			substitutions: tally.substitutions,
			fillers: tally.fillers,
			reorders: tally.reorders,
		}
	}

	/// True when no stage changed anything.
	pub fn is_untouched(&self) -> bool {
		self.structural_changes + self.substitutions + self.fillers + self.reorders == 0
	}
}
