use rand::seq::IndexedRandom;

use super::{Stage, StageContext, LINKING_CONNECTIVES, SUBORDINATORS};
use crate::error::{HumanizeError, Result};
use crate::pipeline::profile::{StageKind, StageSettings, DEFAULT_FILLERS};
use crate::text::casing::{capitalize, demote_initial};
use crate::text::passage::{Sentence, Token};

/// Inserts a short hedge ("Honestly", "In fact", ...) into a sentence.
///
/// The filler goes before the main clause: right after a fronted
/// subordinate clause when there is one (`If it rains, in fact, we stay.`),
/// otherwise at the start of the sentence. Inserted tokens are marked as
/// filler so later stages treat them as part of their host sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FillerInsertion;

impl Stage for FillerInsertion {
	fn kind(&self) -> StageKind {
		StageKind::Filler
	}

	fn rewrite_sentence(&self, sentence: &Sentence, settings: &StageSettings, ctx: &mut StageContext<'_>) -> Result<Sentence> {
		if sentence.word_count() < settings.min_words.max(2) {
			return Err(HumanizeError::stage("filler", "sentence too short"));
		}
		if sentence.has_filler() {
			return Err(HumanizeError::stage("filler", "sentence already has a filler"));
		}
		let Some(first) = sentence.tokens.first().filter(|t| t.is_word()) else {
			return Err(HumanizeError::stage("filler", "sentence does not start with a word"));
		};
		let opener = first.lower();
		if LINKING_CONNECTIVES.contains(&opener.as_str()) {
			return Err(HumanizeError::stage("filler", "sentence already opens with a connective"));
		}

		let phrase = if settings.fillers.is_empty() {
			DEFAULT_FILLERS.choose(&mut *ctx.rng).map(|s| (*s).to_owned())
		} else {
			settings.fillers.choose(&mut *ctx.rng).cloned()
		}
		.ok_or_else(|| HumanizeError::stage("filler", "no filler phrases"))?;

		let commas: Vec<usize> = sentence.tokens.iter().enumerate().filter(|(_, t)| t.is_comma()).map(|(i, _)| i).collect();
		let rewritten = match commas.as_slice() {
			[c] if SUBORDINATORS.contains(&opener.as_str()) => insert_after_clause(sentence, *c, &phrase),
			_ => insert_initial(sentence, &phrase)?,
		};

		ctx.tally.fillers += 1;
		Ok(rewritten)
	}
}

fn filler_tokens(phrase: &str, capitalized: bool) -> Vec<Token> {
	phrase
		.split_whitespace()
		.enumerate()
		.map(|(i, word)| {
			let text = match (i, capitalized) {
				(0, true) => capitalize(word),
				(0, false) => demote_initial(word).unwrap_or_else(|| word.to_owned()),
				_ => word.to_owned(),
			};
			Token::word(&text, if i == 0 { "" } else { " " }).into_filler()
		})
		.collect()
}

// "Honestly, the plan worked."
fn insert_initial(sentence: &Sentence, phrase: &str) -> Result<Sentence> {
	let mut rest = sentence.tokens.clone();
	let head = demote_initial(&rest[0].text).ok_or_else(|| HumanizeError::stage("filler", "opening word may be a proper noun"))?;
	rest[0].text = head;
	rest[0].leading = " ".to_owned();

	let mut tokens = filler_tokens(phrase, true);
	tokens.push(Token::punct(",", "").into_filler());
	tokens.extend(rest);
	Ok(Sentence { leading: sentence.leading.clone(), tokens })
}

// "If it rains, honestly, we stay."
fn insert_after_clause(sentence: &Sentence, comma: usize, phrase: &str) -> Sentence {
	let mut tokens: Vec<Token> = sentence.tokens[..=comma].to_vec();
	let mut filler = filler_tokens(phrase, false);
	if let Some(first) = filler.first_mut() {
		first.leading = " ".to_owned();
	}
	tokens.extend(filler);
	tokens.push(Token::punct(",", "").into_filler());
	tokens.extend(sentence.tokens[comma + 1..].iter().cloned());
	Sentence { leading: sentence.leading.clone(), tokens }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::pipeline::stages::StageTally;
	use crate::synonym::lexical_resource::UnavailableResource;
	use crate::synonym::repository::{SynonymCache, SynonymRepository};
	use crate::text::passage::Passage;
	use rand::SeedableRng;
	use rand::rngs::StdRng;
	use std::sync::Arc;

	fn insert(text: &str) -> Result<Sentence> {
		let repo = SynonymRepository::new(Arc::new(UnavailableResource::new("unused")), Arc::new(SynonymCache::new()));
		let mut rng = StdRng::seed_from_u64(5);
		let mut tally = StageTally::default();
		let mut ctx = StageContext { rng: &mut rng, synonyms: &repo, tally: &mut tally };
		let settings = StageSettings::new(StageKind::Filler, 1.0).with_fillers(["In fact"]);
		FillerInsertion.rewrite_sentence(&Passage::parse(text).sentences[0], &settings, &mut ctx)
	}

	#[test]
	fn inserts_at_sentence_start() {
		let sentence = insert("The plan worked well.").unwrap();
		assert_eq!(sentence.text(), "In fact, the plan worked well.");
		assert_eq!(sentence.source_words(), vec!["the", "plan", "worked", "well"]);
	}

	#[test]
	fn inserts_before_main_clause() {
		let sentence = insert("If it rains, we stay home.").unwrap();
		assert_eq!(sentence.text(), "If it rains, in fact, we stay home.");
	}

	#[test]
	fn refuses_unsafe_positions() {
		assert!(insert("Paris was busy today.").is_err());
		assert!(insert("However, we stayed home.").is_err());
		assert!(insert("Short.").is_err());
		let once = insert("The plan worked well.").unwrap();
		let repo = SynonymRepository::new(Arc::new(UnavailableResource::new("unused")), Arc::new(SynonymCache::new()));
		let mut rng = StdRng::seed_from_u64(5);
		let mut tally = StageTally::default();
		let mut ctx = StageContext { rng: &mut rng, synonyms: &repo, tally: &mut tally };
		let settings = StageSettings::new(StageKind::Filler, 1.0);
		assert!(FillerInsertion.rewrite_sentence(&once, &settings, &mut ctx).is_err());
	}
}
