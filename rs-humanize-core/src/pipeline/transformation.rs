use std::sync::Arc;

use log::debug;
use rand::RngCore;

use super::profile::{StageKind, StageScope, TransformProfile};
use super::stages::{default_stage, gate, Stage, StageContext, StageTally};
use crate::synonym::repository::SynonymRepository;
use crate::text::passage::Passage;

/// Runs a profile's stages over a passage in the fixed stage order.
///
/// # Responsibilities
/// - Hold one implementation per `StageKind` (defaults, or injected ones)
/// - Draw every gate independently: per sentence for sentence stages, once
///   per passage for reordering
/// - Contain stage failures: a failing unit is kept as it was
///
/// The input passage is never mutated; each run works on its own copy.
pub struct TransformationPipeline {
	stages: Vec<Box<dyn Stage>>,
	synonyms: Arc<SynonymRepository>,
}

impl TransformationPipeline {
	/// Pipeline with the four built-in stages.
	pub fn new(synonyms: Arc<SynonymRepository>) -> Self {
		Self { stages: StageKind::ORDER.into_iter().map(default_stage).collect(), synonyms }
	}

	/// Replaces the stage of the same kind with `stage`.
	pub fn with_stage(mut self, stage: Box<dyn Stage>) -> Self {
		let kind = stage.kind();
		self.stages.retain(|s| s.kind() != kind);
		self.stages.push(stage);
		self.stages.sort_by_key(|s| s.kind());
		self
	}

	pub fn synonyms(&self) -> &Arc<SynonymRepository> {
		&self.synonyms
	}

	fn stage(&self, kind: StageKind) -> Option<&dyn Stage> {
		self.stages.iter().find(|s| s.kind() == kind).map(|s| s.as_ref())
	}

	/// Applies `profile` to `passage`.
	///
	/// Stages missing from the profile do not run. An empty passage is
	/// returned unchanged.
	pub fn run(&self, passage: &Passage, profile: &TransformProfile, rng: &mut dyn RngCore) -> (Passage, StageTally) {
		let mut tally = StageTally::default();
		let mut working = passage.clone();
		if working.is_empty() {
			return (working, tally);
		}

		for settings in profile.stages() {
			let Some(stage) = self.stage(settings.kind) else {
				continue;
			};
			let mut ctx = StageContext { rng: &mut *rng, synonyms: &self.synonyms, tally: &mut tally };

			match settings.kind.scope() {
				StageScope::Sentence => {
					for sentence in working.sentences.iter_mut() {
						if !gate(ctx.rng, settings.probability) {
							continue;
						}
						match stage.rewrite_sentence(sentence, settings, &mut ctx) {
							Ok(rewritten) => *sentence = rewritten,
							Err(e) => debug!("{e}"),
						}
					}
				}
				StageScope::Passage => {
					if !gate(ctx.rng, settings.probability) {
						continue;
					}
					match stage.rewrite_passage(&working, settings, &mut ctx) {
						Ok(rewritten) => working = rewritten,
						Err(e) => debug!("{e}"),
					}
				}
			}
		}

		(working, tally)
	}
}
