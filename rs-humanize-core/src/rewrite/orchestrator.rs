use log::debug;
use rand::RngCore;

use super::statistics::RewriteStatistics;
use crate::error::{HumanizeError, Result};
use crate::pipeline::profile::{ProfileSet, RewriteMode};
use crate::pipeline::stages::StageTally;
use crate::pipeline::transformation::TransformationPipeline;
use crate::text::passage::Passage;

/// Result of one rewrite.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteOutcome {
	pub text: String,
	pub statistics: RewriteStatistics,
}

/// Sequences one request through the pipeline.
///
/// # Responsibilities
/// - Select the `basic` or `enhanced` profile from the mode
/// - Prefer the externally produced paraphrase, fall back to the original
/// - Parse, transform and render the chosen text
///
/// Never fails: malformed (blank) input comes back unchanged, and every
/// stage-level problem only reduces how much gets rewritten.
pub struct RewriteOrchestrator {
	pipeline: TransformationPipeline,
	profiles: ProfileSet,
}

impl RewriteOrchestrator {
	pub fn new(pipeline: TransformationPipeline, profiles: ProfileSet) -> Self {
		Self { pipeline, profiles }
	}

	pub fn profiles(&self) -> &ProfileSet {
		&self.profiles
	}

	pub fn pipeline(&self) -> &TransformationPipeline {
		&self.pipeline
	}

	/// Rejects text with nothing to rewrite.
	pub fn check_input(text: &str) -> Result<()> {
		if text.trim().is_empty() {
			return Err(HumanizeError::MalformedInput("text is blank".to_owned()));
		}
		Ok(())
	}

	/// Rewrites `text` (or `paraphrased`, when present) with thread-local
	/// randomness.
	pub fn rewrite(&self, text: &str, paraphrased: Option<&str>, mode: RewriteMode) -> String {
		self.rewrite_detailed(text, paraphrased, mode).text
	}

	/// Same as `rewrite`, with statistics.
	pub fn rewrite_detailed(&self, text: &str, paraphrased: Option<&str>, mode: RewriteMode) -> RewriteOutcome {
		let mut rng = rand::rng();
		self.rewrite_with_rng(text, paraphrased, mode, &mut rng)
	}

	/// Rewrites with an injected random source, so every gate and choice
	/// is reproducible from a seed.
	pub fn rewrite_with_rng(&self, text: &str, paraphrased: Option<&str>, mode: RewriteMode, rng: &mut dyn RngCore) -> RewriteOutcome {
		let paraphrased = match paraphrased {
			Some(p) if !p.trim().is_empty() => Some(p),
			Some(_) => {
				debug!("Empty paraphrase, rewriting the original text");
				None
			}
			None => None,
		};
		let source = paraphrased.unwrap_or(text);

		if let Err(e) = Self::check_input(source) {
			debug!("{e}; returned unchanged");
			let statistics = RewriteStatistics::new(mode, text, paraphrased, source, 0, StageTally::default());
			return RewriteOutcome { text: source.to_owned(), statistics };
		}

		let profile = self.profiles.select(mode);
		let passage = Passage::parse(source);
		let (rewritten, tally) = self.pipeline.run(&passage, profile, rng);
		let rendered = rewritten.render();

		debug!(
			"Rewrote {} sentences with profile '{}': {:?}",
			passage.len(),
			profile.name(),
			tally
		);
		let statistics = RewriteStatistics::new(mode, text, paraphrased, &rendered, passage.len(), tally);
		RewriteOutcome { text: rendered, statistics }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pipeline::profile::{StageKind, StageSettings, TransformProfile};
	use crate::synonym::lexical_resource::Thesaurus;
	use crate::synonym::repository::{SynonymCache, SynonymRepository};
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::sync::Arc;

	fn orchestrator(profiles: ProfileSet) -> RewriteOrchestrator {
		let thesaurus = Thesaurus::from_lines(&["n\tmodel,framework", "a\tremarkable,notable"], 1).unwrap();
		let repo = Arc::new(SynonymRepository::new(Arc::new(thesaurus), Arc::new(SynonymCache::new())));
		RewriteOrchestrator::new(TransformationPipeline::new(repo), profiles)
	}

	fn silent_basic() -> ProfileSet {
		let mut profiles = ProfileSet::default();
		profiles.basic.set_all_probabilities(0.0).unwrap();
		profiles
	}

	#[test]
	fn prefers_the_paraphrase() {
		let orchestrator = orchestrator(silent_basic());
		let outcome = orchestrator.rewrite_with_rng("Original text.", Some("Paraphrased text."), RewriteMode::Basic, &mut StdRng::seed_from_u64(0));
		assert_eq!(outcome.text, "Paraphrased text.");
		assert_eq!(outcome.statistics.original_length, 14);
		assert_eq!(outcome.statistics.paraphrased_length, Some(17));
		assert!(outcome.statistics.is_untouched());
	}

	#[test]
	fn blank_input_is_returned_unchanged() {
		let orchestrator = orchestrator(ProfileSet::default());
		let outcome = orchestrator.rewrite_with_rng("  ", Some(" "), RewriteMode::Enhanced, &mut StdRng::seed_from_u64(0));
		assert_eq!(outcome.text, "  ");
		assert_eq!(outcome.statistics.paraphrased_length, None);
		assert_eq!(outcome.statistics.sentence_count, 0);
	}

	#[test]
	fn enhanced_mode_uses_the_enhanced_profile() {
		let mut profiles = silent_basic();
		profiles.enhanced = TransformProfile::new("enhanced", vec![StageSettings::new(StageKind::Lexical, 1.0)]).unwrap();
		let orchestrator = orchestrator(profiles);

		let text = "The remarkable model works.";
		assert_eq!(orchestrator.rewrite(text, None, RewriteMode::Basic), text);
		let outcome = orchestrator.rewrite_detailed(text, None, RewriteMode::Enhanced);
		assert_eq!(outcome.text, "The notable framework works.");
		assert_eq!(outcome.statistics.mode, RewriteMode::Enhanced);
		assert_eq!(outcome.statistics.substitutions, 2);
	}
}
