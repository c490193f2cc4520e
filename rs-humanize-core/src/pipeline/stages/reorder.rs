use std::ops::Range;

use log::debug;
use rand::Rng;

use super::{Stage, StageContext, LINKING_CONNECTIVES};
use crate::error::{HumanizeError, Result};
use crate::pipeline::profile::{StageKind, StageSettings};
use crate::text::passage::{Passage, Sentence};

/// Openers that point back at the previous sentence.
const ANAPHORIC_OPENERS: &[&str] = &[
	"it", "its", "this", "that", "these", "those", "he", "she", "they", "them", "his", "her",
	"their", "such", "here", "then", "also", "but", "and", "so", "or", "nor", "yet", "still",
	"another", "both", "neither", "either", "finally", "lastly", "next", "second", "third",
	"later", "again", "as", "former",
];

/// Words that mark a back-reference when they appear early in a sentence.
const EARLY_REFERENCES: &[&str] = &["also", "again", "too", "latter", "former", "aforementioned", "same"];

/// How many leading source words are checked for `EARLY_REFERENCES`.
const EARLY_WINDOW: usize = 4;

/// Swaps adjacent blocks of independent sentences.
///
/// A block is an independent sentence followed by every sentence that
/// refers back to its predecessor, so back-references always keep their
/// antecedent right before them. Swaps stay within a paragraph, and
/// passages of two sentences or fewer are never reordered.
#[derive(Debug, Clone, Copy, Default)]
pub struct SentenceReordering;

impl Stage for SentenceReordering {
	fn kind(&self) -> StageKind {
		StageKind::Reorder
	}

	fn rewrite_passage(&self, passage: &Passage, settings: &StageSettings, ctx: &mut StageContext<'_>) -> Result<Passage> {
		if passage.len() <= 2 {
			return Err(HumanizeError::stage("reorder", "passage too short"));
		}

		let mut paragraphs: Vec<Vec<Vec<usize>>> = paragraphs(passage)
			.into_iter()
			.map(|paragraph| blocks(passage, &paragraph))
			.collect();
		let movable = movable_ranges(passage, &paragraphs);
		let swappable: Vec<usize> = (0..paragraphs.len()).filter(|&p| movable[p].len() >= 2).collect();
		if swappable.is_empty() {
			return Err(HumanizeError::stage("reorder", "no independent sentences to move"));
		}

		for _ in 0..settings.max_swaps.max(1) {
			let p = swappable[ctx.rng.random_range(0..swappable.len())];
			let range = &movable[p];
			let j = ctx.rng.random_range(range.start..range.end - 1);
			paragraphs[p].swap(j, j + 1);
		}

		let order: Vec<usize> = paragraphs.into_iter().flatten().flatten().collect();
		if order.iter().enumerate().all(|(position, &index)| position == index) {
			return Err(HumanizeError::stage("reorder", "swaps cancelled out"));
		}
		debug!("Sentence order after reordering: {order:?}");

		// Separators stay in place: paragraph breaks do not travel with sentences.
		let sentences: Vec<Sentence> = order
			.iter()
			.enumerate()
			.map(|(position, &index)| Sentence {
				leading: passage.sentences[position].leading.clone(),
				tokens: passage.sentences[index].tokens.clone(),
			})
			.collect();

		ctx.tally.reorders += 1;
		Ok(Passage { sentences, trailing: passage.trailing.clone() })
	}
}

/// True when a sentence refers back to the one before it.
///
/// Conservative: pronoun or connective openers, early "also"/"again"
/// style markers, and linking connectives anywhere all count. Filler
/// tokens are ignored, so "Honestly, it also works." is still anchored.
pub fn refers_back(sentence: &Sentence) -> bool {
	let words = sentence.source_words();
	let Some(first) = words.first() else {
		return true;
	};

	ANAPHORIC_OPENERS.contains(&first.as_str())
		|| words.iter().take(EARLY_WINDOW).any(|w| EARLY_REFERENCES.contains(&w.as_str()))
		|| words.iter().any(|w| LINKING_CONNECTIVES.contains(&w.as_str()))
}

// Sentence indices grouped by paragraph; a separator containing a newline
// starts a new paragraph.
fn paragraphs(passage: &Passage) -> Vec<Vec<usize>> {
	let mut paragraphs: Vec<Vec<usize>> = Vec::new();
	for (i, sentence) in passage.sentences.iter().enumerate() {
		match paragraphs.last_mut() {
			Some(current) if !sentence.leading.contains('\n') => current.push(i),
			_ => paragraphs.push(vec![i]),
		}
	}
	paragraphs
}

// Block indices that may move in each paragraph. A paragraph opening with a
// back-reference keeps its first block in place, and the previous paragraph
// keeps its last block, so the antecedent stays right before it.
fn movable_ranges(passage: &Passage, paragraphs: &[Vec<Vec<usize>>]) -> Vec<Range<usize>> {
	let mut ranges: Vec<Range<usize>> = paragraphs.iter().map(|blocks| 0..blocks.len()).collect();
	for p in 1..paragraphs.len() {
		let opener = paragraphs[p].first().and_then(|block| block.first());
		if opener.is_some_and(|&i| refers_back(&passage.sentences[i])) {
			ranges[p].start = ranges[p].start.max(1).min(ranges[p].end);
			ranges[p - 1].end = ranges[p - 1].end.saturating_sub(1).max(ranges[p - 1].start);
		}
	}
	ranges
}

fn blocks(passage: &Passage, paragraph: &[usize]) -> Vec<Vec<usize>> {
	let mut blocks: Vec<Vec<usize>> = Vec::new();
	for &i in paragraph {
		match blocks.last_mut() {
			Some(block) if refers_back(&passage.sentences[i]) => block.push(i),
			_ => blocks.push(vec![i]),
		}
	}
	blocks
}
