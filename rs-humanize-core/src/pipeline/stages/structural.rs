use rand::Rng;

use super::{Stage, StageContext, MOVABLE_CONNECTIVES, SUBORDINATORS};
use crate::error::{HumanizeError, Result};
use crate::pipeline::profile::{StageKind, StageSettings};
use crate::text::casing::{capitalize, demote_initial};
use crate::text::passage::{Sentence, Token, TokenKind};

// Words that bind to a following subordinator ("even if", "as soon as").
const BOUND_BEFORE_SUBORDINATOR: &[&str] = &["even", "only", "just", "right", "long", "soon", "as"];

// Verbs whose object can be an "if"/"when" clause ("I wonder if it works").
// Such clauses are not adverbial and cannot be fronted.
const COMPLEMENT_VERBS: &[&str] = &[
	"ask", "asks", "asked", "asking", "wonder", "wonders", "wondered", "wondering", "know", "knows",
	"knew", "known", "knowing", "see", "sees", "saw", "seen", "seeing", "decide", "decides",
	"decided", "deciding", "check", "checks", "checked", "checking", "tell", "tells", "told",
	"telling", "doubt", "doubts", "doubted", "learn", "learns", "learned", "learnt", "find",
	"finds", "found", "remember", "remembers", "remembered", "forget", "forgets", "forgot",
	"forgotten", "understand", "understands", "understood", "explain", "explains", "explained",
	"show", "shows", "showed", "shown", "say", "says", "said", "guess", "guessed", "determine",
	"determines", "determined", "matter", "matters", "mattered", "care", "cares", "cared",
	"unsure", "sure", "certain", "clear", "idea",
];

// Object pronouns that may sit between the verb and its clause ("asked her when").
const OBJECT_PRONOUNS: &[&str] = &["me", "you", "him", "her", "us", "them", "it"];

/// Rewrites sentence form while keeping its content.
///
/// # Rewrites
/// - `Main because sub.` ↔ `Because sub, main.` (any subordinator)
/// - `However, rest.` ↔ `Rest, however.`
///
/// At most one rewrite per sentence; when several apply, one is picked at
/// random. Sentences with quotes, brackets, colons or dashes are left alone,
/// as are clauses whose first word might be a proper noun.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralVariation;

impl Stage for StructuralVariation {
	fn kind(&self) -> StageKind {
		StageKind::Structural
	}

	fn rewrite_sentence(&self, sentence: &Sentence, settings: &StageSettings, ctx: &mut StageContext<'_>) -> Result<Sentence> {
		if sentence.word_count() < settings.min_words.max(1) {
			return Err(HumanizeError::stage("structural", "sentence too short"));
		}
		let unsafe_punct = sentence
			.tokens
			.iter()
			.any(|t| t.kind == TokenKind::Punct && !t.is_comma() && !t.is_terminal());
		if unsafe_punct {
			return Err(HumanizeError::stage("structural", "unsupported punctuation"));
		}

		let (body, terminal) = sentence.tokens.split_at(sentence.body_end());
		let mut rewrites: Vec<Vec<Token>> = [
			front_subordinate(body),
			back_subordinate(body),
			connective_to_end(body),
			connective_to_front(body),
		]
		.into_iter()
		.flatten()
		.collect();
		if rewrites.is_empty() {
			return Err(HumanizeError::stage("structural", "no movable clause"));
		}

		let pick = ctx.rng.random_range(0..rewrites.len());
		let mut tokens = rewrites.swap_remove(pick);
		tokens.extend_from_slice(terminal);

		let mut rewritten = Sentence { leading: sentence.leading.clone(), tokens };
		rewritten.respace();
		ctx.tally.structural += 1;
		Ok(rewritten)
	}
}

fn word_count(tokens: &[Token]) -> usize {
	tokens.iter().filter(|t| t.is_word()).count()
}

fn is_one_of(token: &Token, words: &[&str]) -> bool {
	token.is_word() && words.contains(&token.lower().as_str())
}

fn with_text(token: &Token, text: String) -> Token {
	Token { text, ..token.clone() }
}

// "We stayed because it rained" -> "Because it rained, we stayed"
fn front_subordinate(body: &[Token]) -> Option<Vec<Token>> {
	if body.iter().any(Token::is_comma) {
		return None;
	}
	let k = (2..body.len()).find(|&i| is_one_of(&body[i], SUBORDINATORS))?;
	if is_one_of(&body[k - 1], BOUND_BEFORE_SUBORDINATOR) || opens_complement_clause(&body[..k]) {
		return None;
	}

	let (main, sub) = body.split_at(k);
	if word_count(main) < 2 || word_count(&sub[1..]) < 2 || !main[0].is_word() {
		return None;
	}
	let head = demote_initial(&main[0].text)?;

	let mut out = Vec::with_capacity(body.len() + 1);
	out.push(with_text(&sub[0], capitalize(&sub[0].lower())));
	out.extend(sub[1..].iter().cloned());
	out.push(Token::punct(",", ""));
	out.push(with_text(&main[0], head));
	out.extend(main[1..].iter().cloned());
	Some(out)
}

// True when the words before a subordinator end in a verb that takes the
// clause as its object, optionally followed by an object pronoun.
fn opens_complement_clause(main: &[Token]) -> bool {
	let mut words = main.iter().rev().filter(|t| t.is_word());
	match (words.next(), words.next()) {
		(Some(last), _) if is_one_of(last, COMPLEMENT_VERBS) => true,
		(Some(last), Some(verb)) => is_one_of(last, OBJECT_PRONOUNS) && is_one_of(verb, COMPLEMENT_VERBS),
		_ => false,
	}
}

// "Because it rained, we stayed" -> "We stayed because it rained"
fn back_subordinate(body: &[Token]) -> Option<Vec<Token>> {
	let first = body.first()?;
	if !is_one_of(first, SUBORDINATORS) {
		return None;
	}
	let commas: Vec<usize> = body.iter().enumerate().filter(|(_, t)| t.is_comma()).map(|(i, _)| i).collect();
	let [c] = commas.as_slice() else {
		return None;
	};

	let (sub, main) = (&body[..*c], &body[*c + 1..]);
	if word_count(sub) < 3 || word_count(main) < 2 || !main.first()?.is_word() {
		return None;
	}

	let mut out = Vec::with_capacity(body.len());
	out.push(with_text(&main[0], capitalize(&main[0].text)));
	out.extend(main[1..].iter().cloned());
	out.push(with_text(&sub[0], sub[0].lower()));
	out.extend(sub[1..].iter().cloned());
	Some(out)
}

// "However, it works" -> "It works, however"
fn connective_to_end(body: &[Token]) -> Option<Vec<Token>> {
	let [connective, comma, rest @ ..] = body else {
		return None;
	};
	if !is_one_of(connective, MOVABLE_CONNECTIVES) || !comma.is_comma() {
		return None;
	}
	if rest.iter().any(Token::is_comma) || word_count(rest) < 3 || !rest.first()?.is_word() {
		return None;
	}

	let mut out = Vec::with_capacity(body.len());
	out.push(with_text(&rest[0], capitalize(&rest[0].text)));
	out.extend(rest[1..].iter().cloned());
	out.push(comma.clone());
	out.push(with_text(connective, connective.lower()));
	Some(out)
}

// "It works, however" -> "However, it works"
fn connective_to_front(body: &[Token]) -> Option<Vec<Token>> {
	let [rest @ .., comma, connective] = body else {
		return None;
	};
	if !is_one_of(connective, MOVABLE_CONNECTIVES) || !comma.is_comma() {
		return None;
	}
	if rest.iter().any(Token::is_comma) || word_count(rest) < 3 || !rest.first()?.is_word() {
		return None;
	}
	let head = demote_initial(&rest[0].text)?;

	let mut out = Vec::with_capacity(body.len());
	out.push(with_text(connective, capitalize(&connective.lower())));
	out.push(comma.clone());
	out.push(with_text(&rest[0], head));
	out.extend(rest[1..].iter().cloned());
	Some(out)
}
