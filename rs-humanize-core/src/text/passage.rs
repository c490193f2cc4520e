use std::fmt;

/// Lexical class of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
	Word,
	Number,
	Punct,
}

/// Where a token comes from.
///
/// Filler tokens belong to their host sentence but are ignored by
/// substitution and by the back-reference check used for reordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenOrigin {
	Source,
	Filler,
}

/// A surface token together with the exact whitespace that preceded it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
	pub text: String,
	pub leading: String,
	pub kind: TokenKind,
	pub origin: TokenOrigin,
}

impl Token {
	/// Creates a source word token.
	pub fn word(text: &str, leading: &str) -> Self {
		Self { text: text.to_owned(), leading: leading.to_owned(), kind: TokenKind::Word, origin: TokenOrigin::Source }
	}

	/// Creates a source punctuation token.
	pub fn punct(text: &str, leading: &str) -> Self {
		Self { text: text.to_owned(), leading: leading.to_owned(), kind: TokenKind::Punct, origin: TokenOrigin::Source }
	}

	/// Marks the token as inserted filler text.
	pub fn into_filler(mut self) -> Self {
		self.origin = TokenOrigin::Filler;
		self
	}

	pub fn is_word(&self) -> bool {
		self.kind == TokenKind::Word
	}

	pub fn is_filler(&self) -> bool {
		self.origin == TokenOrigin::Filler
	}

	/// `.`, `!` or `?`.
	pub fn is_terminal(&self) -> bool {
		self.kind == TokenKind::Punct && matches!(self.text.as_str(), "." | "!" | "?")
	}

	pub fn is_comma(&self) -> bool {
		self.kind == TokenKind::Punct && self.text == ","
	}

	/// Lowercased text.
	pub fn lower(&self) -> String {
		self.text.to_lowercase()
	}
}

/// An ordered run of tokens ending (usually) with terminal punctuation.
///
/// `leading` holds the whitespace separating this sentence from the
/// previous one; the first token's own `leading` is always empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sentence {
	pub leading: String,
	pub tokens: Vec<Token>,
}

impl Sentence {
	/// Builds a sentence from tokens, moving the first token's whitespace
	/// into the sentence separator.
	pub fn new(mut tokens: Vec<Token>) -> Self {
		let leading = tokens.first_mut().map(|t| std::mem::take(&mut t.leading)).unwrap_or_default();
		Self { leading, tokens }
	}

	/// Number of word tokens.
	pub fn word_count(&self) -> usize {
		self.tokens.iter().filter(|t| t.is_word()).count()
	}

	/// Index of the first source word, skipping inserted filler.
	pub fn first_source_word(&self) -> Option<usize> {
		self.tokens.iter().position(|t| t.is_word() && !t.is_filler())
	}

	/// Lowercased source words, in order, without filler.
	pub fn source_words(&self) -> Vec<String> {
		self.tokens.iter().filter(|t| t.is_word() && !t.is_filler()).map(Token::lower).collect()
	}

	/// Index where the trailing terminal punctuation starts.
	///
	/// Closing quotes and brackets after the terminal mark belong to it.
	pub fn body_end(&self) -> usize {
		let mut end = self.tokens.len();
		while end > 0 {
			let token = &self.tokens[end - 1];
			if token.is_terminal() || (token.kind == TokenKind::Punct && is_closing(&token.text)) {
				end -= 1;
			} else {
				break;
			}
		}
		end
	}

	pub fn has_filler(&self) -> bool {
		self.tokens.iter().any(Token::is_filler)
	}

	/// Rebuilds canonical single-space separation between tokens.
	///
	/// Only used after structural edits on sentences with plain punctuation.
	pub fn respace(&mut self) {
		for (i, token) in self.tokens.iter_mut().enumerate() {
			token.leading = if i == 0 || (token.kind == TokenKind::Punct && attaches_left(&token.text)) {
				String::new()
			} else {
				" ".to_owned()
			};
		}
	}

	/// Surface text without the separator.
	pub fn text(&self) -> String {
		let mut out = String::new();
		for token in &self.tokens {
			out.push_str(&token.leading);
			out.push_str(&token.text);
		}
		out
	}
}

/// A parsed text unit: sentences plus trailing whitespace.
///
/// `Passage::parse(text).render() == text` for every input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Passage {
	pub sentences: Vec<Sentence>,
	pub trailing: String,
}

const ABBREVIATIONS: &[&str] = &["mr", "mrs", "ms", "dr", "prof", "st", "vs", "jr", "sr", "fig"];

/// Abbreviations only when a number follows ("No. 5", "Vol. 2").
const NUMBERING_ABBREVIATIONS: &[&str] = &["no", "vol", "p", "pp"];

impl Passage {
	/// Splits `text` into sentences of tokens.
	pub fn parse(text: &str) -> Self {
		let (tokens, trailing) = lex(text);
		let mut sentences = Vec::new();
		let mut current: Vec<Token> = Vec::new();

		let mut iter = tokens.into_iter().peekable();
		while let Some(token) = iter.next() {
			let terminal = token.is_terminal();
			current.push(token);
			if !terminal {
				continue;
			}

			// Absorb "?!", "..." and closing quotes or brackets.
			while let Some(next) = iter.peek() {
				let absorbs = next.leading.is_empty()
					&& next.kind == TokenKind::Punct
					&& (next.is_terminal() || is_closing(&next.text));
				if !absorbs {
					break;
				}
				if let Some(next) = iter.next() {
					current.push(next);
				}
			}

			let at_boundary = match iter.peek() {
				None => true,
				Some(next) => !next.leading.is_empty(),
			};
			if at_boundary && !ends_with_abbreviation(&current, iter.peek()) {
				sentences.push(Sentence::new(std::mem::take(&mut current)));
			}
		}
		if !current.is_empty() {
			sentences.push(Sentence::new(current));
		}

		Self { sentences, trailing }
	}

	/// Reassembles the surface text.
	pub fn render(&self) -> String {
		let mut out = String::new();
		for sentence in &self.sentences {
			out.push_str(&sentence.leading);
			out.push_str(&sentence.text());
		}
		out.push_str(&self.trailing);
		out
	}

	pub fn len(&self) -> usize {
		self.sentences.len()
	}

	pub fn is_empty(&self) -> bool {
		self.sentences.is_empty()
	}
}

impl fmt::Display for Passage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.render())
	}
}

fn is_closing(text: &str) -> bool {
	matches!(text, "\"" | "'" | "”" | "’" | ")" | "]" | "}")
}

fn attaches_left(text: &str) -> bool {
	matches!(text, "," | "." | ";" | ":" | "!" | "?" | ")" | "]" | "}" | "%")
}

fn ends_with_abbreviation(tokens: &[Token], next: Option<&Token>) -> bool {
	let [.., word, dot] = tokens else {
		return false;
	};
	if dot.text != "." || !word.is_word() {
		return false;
	}
	let lower = word.lower();
	// Initials such as "J. R. R."
	let initial = word.text.chars().count() == 1 && word.text.chars().all(char::is_uppercase);
	let numbering = NUMBERING_ABBREVIATIONS.contains(&lower.as_str()) && next.is_some_and(|n| n.kind == TokenKind::Number);
	initial || numbering || ABBREVIATIONS.contains(&lower.as_str())
}

fn is_joiner(c: char) -> bool {
	matches!(c, '\'' | '’' | '-')
}

// Splits text into tokens carrying their leading whitespace; returns the
// whitespace left after the last token separately.
fn lex(text: &str) -> (Vec<Token>, String) {
	let chars: Vec<char> = text.chars().collect();
	let mut tokens = Vec::new();
	let mut leading = String::new();
	let mut i = 0;

	while i < chars.len() {
		let c = chars[i];
		if c.is_whitespace() {
			leading.push(c);
			i += 1;
			continue;
		}

		let start = i;
		let kind = if c.is_alphanumeric() {
			i += 1;
			while i < chars.len() {
				let c = chars[i];
				let next_alnum = chars.get(i + 1).is_some_and(|n| n.is_alphanumeric());
				let between_digits = matches!(c, '.' | ',')
					&& chars[i - 1].is_ascii_digit()
					&& chars.get(i + 1).is_some_and(|n| n.is_ascii_digit());
				if c.is_alphanumeric() {
					i += 1;
				} else if (is_joiner(c) && next_alnum) || between_digits {
					i += 2;
				} else {
					break;
				}
			}
			if chars[start..i].iter().any(|c| c.is_alphabetic()) { TokenKind::Word } else { TokenKind::Number }
		} else {
			i += 1;
			TokenKind::Punct
		};

		tokens.push(Token {
			text: chars[start..i].iter().collect(),
			leading: std::mem::take(&mut leading),
			kind,
			origin: TokenOrigin::Source,
		});
	}

	(tokens, leading)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn render_is_lossless() {
		let samples = [
			"Hello world.",
			"  Leading and trailing whitespace.  \n",
			"Mr. Smith paid $3.50 for it! Did he? \"Yes,\" she said.\n\nNew paragraph here",
			"Tabs\tand   runs of spaces... don't break well-known words.",
			"",
			"   ",
		];
		for sample in samples {
			assert_eq!(Passage::parse(sample).render(), sample);
		}
	}

	#[test]
	fn splits_sentences_on_terminal_punctuation() {
		let passage = Passage::parse("The first one. The second one! Is it the third?");
		assert_eq!(passage.len(), 3);
		assert_eq!(passage.sentences[1].text(), "The second one!");
		assert_eq!(passage.sentences[1].leading, " ");
	}

	#[test]
	fn abbreviations_do_not_split() {
		let passage = Passage::parse("Dr. Jones met J. Smith today. They talked.");
		assert_eq!(passage.len(), 2);
	}

	#[test]
	fn numbering_abbreviation_needs_a_number() {
		assert_eq!(Passage::parse("See entry No. 5 for details. It is short.").len(), 2);
		let passage = Passage::parse("The answer was no. It was final. We left.");
		assert_eq!(passage.len(), 3);
		assert_eq!(passage.sentences[0].text(), "The answer was no.");
	}

	#[test]
	fn closing_quotes_stay_with_their_sentence() {
		let passage = Passage::parse("He said \"stop.\" Then he left.");
		assert_eq!(passage.len(), 2);
		assert_eq!(passage.sentences[0].text(), "He said \"stop.\"");
	}

	#[test]
	fn words_keep_apostrophes_and_hyphens() {
		let passage = Passage::parse("It's a well-known fact.");
		let words: Vec<&str> = passage.sentences[0].tokens.iter().map(|t| t.text.as_str()).collect();
		assert_eq!(words, vec!["It's", "a", "well-known", "fact", "."]);
	}

	#[test]
	fn respace_normalizes_after_edits() {
		let mut sentence = Sentence::new(vec![
			Token::word("because", " "),
			Token::word("it", ""),
			Token::punct(",", " "),
			Token::word("we", ""),
			Token::punct(".", " "),
		]);
		sentence.respace();
		assert_eq!(sentence.text(), "because it, we.");
	}

	#[test]
	fn body_end_skips_terminal_run() {
		let passage = Passage::parse("Really?!");
		assert_eq!(passage.sentences[0].body_end(), 1);
	}
}
