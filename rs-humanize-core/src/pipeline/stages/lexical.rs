use super::{gate, Stage, StageContext};
use crate::error::Result;
use crate::pipeline::profile::{StageKind, StageSettings};
use crate::synonym::repository::SynonymRepository;
use crate::text::casing::Casing;
use crate::text::morphology::{analyze, inflect};
use crate::text::part_of_speech::{tag, PartOfSpeech};
use crate::text::passage::{Sentence, Token};

/// Replaces content words with synonyms from the repository.
///
/// Each eligible word (noun, verb, adjective, adverb; not a proper noun,
/// acronym, contraction or filler) gets its own draw against
/// `word_probability`. The first candidate whose inflected form differs
/// from the original is used, so results are reproducible for a given
/// cache. Casing and regular inflection of the original are carried over.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalSubstitution;

impl Stage for LexicalSubstitution {
	fn kind(&self) -> StageKind {
		StageKind::Lexical
	}

	fn rewrite_sentence(&self, sentence: &Sentence, settings: &StageSettings, ctx: &mut StageContext<'_>) -> Result<Sentence> {
		let mut rewritten = sentence.clone();
		let first_word = sentence.first_source_word();
		let mut previous: Option<String> = None;
		let mut substituted = 0;

		for (i, token) in sentence.tokens.iter().enumerate() {
			if !token.is_word() {
				continue;
			}
			let lower = token.lower();
			let context = previous.replace(lower.clone());

			if settings.max_substitutions > 0 && substituted >= settings.max_substitutions {
				break;
			}
			if !is_eligible(token, Some(i) == first_word) {
				continue;
			}
			let Some(pos) = tag(&lower, context.as_deref()) else {
				continue;
			};
			if !gate(ctx.rng, settings.word_probability) {
				continue;
			}

			if let Some(replacement) = replacement_for(&token.text, &lower, pos, ctx.synonyms) {
				rewritten.tokens[i].text = replacement;
				substituted += 1;
			}
		}

		ctx.tally.substitutions += substituted;
		Ok(rewritten)
	}
}

fn is_eligible(token: &Token, sentence_initial: bool) -> bool {
	if token.is_filler() || token.text.chars().count() < 3 {
		return false;
	}
	if token.text.chars().any(|c| c.is_ascii_digit() || c == '\'' || c == '’') {
		return false;
	}
	match Casing::of(&token.text) {
		Casing::Lower => true,
		Casing::Capitalized => sentence_initial,
		Casing::Upper | Casing::Mixed => false,
	}
}

/// Synonym for `surface`, inflected and cased like it.
///
/// Tries each lemma reading of the word in turn; within a reading the
/// candidates are taken in repository order.
pub fn replacement_for(surface: &str, lower: &str, pos: PartOfSpeech, synonyms: &SynonymRepository) -> Option<String> {
	let casing = Casing::of(surface);
	for (lemma, inflection) in analyze(lower, pos) {
		for candidate in synonyms.lookup(&lemma, pos) {
			let inflected = inflect(&candidate, inflection);
			if inflected.to_lowercase() != lower {
				return Some(casing.apply(&inflected));
			}
		}
	}
	None
}
