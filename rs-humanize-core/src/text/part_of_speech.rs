use serde::{Deserialize, Serialize};

/// Open word classes the lexical resource is indexed by.
///
/// Codes follow the WordNet convention: `n`, `v`, `a` (`s` accepted as an
/// adjective satellite), `r`.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
	Noun,
	Verb,
	Adjective,
	Adverb,
}

impl PartOfSpeech {
	/// Single-letter code of this part of speech.
	pub fn code(self) -> char {
		match self {
			PartOfSpeech::Noun => 'n',
			PartOfSpeech::Verb => 'v',
			PartOfSpeech::Adjective => 'a',
			PartOfSpeech::Adverb => 'r',
		}
	}

	/// Parses a WordNet-style code.
	pub fn from_code(code: &str) -> Option<Self> {
		match code.trim() {
			"n" => Some(PartOfSpeech::Noun),
			"v" => Some(PartOfSpeech::Verb),
			"a" | "s" => Some(PartOfSpeech::Adjective),
			"r" => Some(PartOfSpeech::Adverb),
			_ => None,
		}
	}
}

/// Closed-class words: never substituted, safe to lowercase at sentence start.
const FUNCTION_WORDS: &[&str] = &[
	"a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
	"are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
	"but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "either",
	"even", "every", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
	"here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
	"is", "it", "its", "itself", "just", "many", "may", "me", "might", "more", "most", "much",
	"must", "my", "myself", "neither", "no", "nor", "not", "now", "of", "off", "on", "once",
	"only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same", "shall",
	"she", "should", "since", "so", "some", "such", "than", "that", "the", "their", "theirs",
	"them", "themselves", "then", "there", "these", "they", "this", "those", "though", "through",
	"to", "too", "under", "unless", "until", "up", "upon", "us", "very", "was", "we", "were",
	"what", "when", "whenever", "where", "whereas", "whether", "which", "while", "who", "whom",
	"whose", "why", "will", "with", "within", "without", "would", "yet", "you", "your", "yours",
	"yourself", "yourselves",
];

/// Words after which the next word is a noun phrase head or its modifier.
const DETERMINERS: &[&str] = &[
	"a", "an", "the", "this", "that", "these", "those", "my", "your", "his", "her", "its", "our",
	"their", "some", "any", "each", "every", "no", "many", "few", "several", "more", "most",
];

/// Words after which the next word is a bare verb.
const VERB_MARKERS: &[&str] = &[
	"to", "will", "would", "can", "could", "should", "shall", "may", "might", "must", "do", "does",
	"did", "not",
];

/// Words ending in `-ly` that are not adverbs.
const LY_NOUNS: &[&str] = &[
	"family", "supply", "reply", "apply", "rely", "ally", "belly", "bully", "jelly", "rally",
	"assembly", "anomaly", "monopoly", "italy", "july", "fly",
];

const ADJECTIVE_SUFFIXES: &[&str] = &[
	"ous", "ful", "ive", "able", "ible", "less", "ish", "ical", "ic", "al", "ant", "ary",
];
const NOUN_SUFFIXES: &[&str] = &[
	"tion", "sion", "ment", "ness", "ity", "ism", "ance", "ence", "ship", "hood", "ist", "er",
	"or", "ure", "age",
];
const VERB_SUFFIXES: &[&str] = &["ize", "ise", "ify", "ate"];

/// Returns true for closed-class words (lowercase input).
pub fn is_function_word(lower: &str) -> bool {
	FUNCTION_WORDS.contains(&lower)
}

/// Guesses the part of speech of a lowercase word from its shape and the
/// word right before it.
///
/// Returns `None` for function words and tokens with digits, which are
/// never substitution targets.
pub fn tag(lower: &str, previous: Option<&str>) -> Option<PartOfSpeech> {
	if lower.is_empty() || is_function_word(lower) || lower.chars().any(|c| c.is_ascii_digit()) {
		return None;
	}

	let previous = previous.unwrap_or_default();
	let past_form = lower.ends_with("ed") && lower.chars().count() > 4;
	let adjectival = ADJECTIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) && !ends_with_noun_suffix(lower);

	if DETERMINERS.contains(&previous) {
		if adjectival || past_form {
			return Some(PartOfSpeech::Adjective);
		}
		return Some(PartOfSpeech::Noun);
	}
	if VERB_MARKERS.contains(&previous) && !lower.ends_with("ly") {
		return Some(PartOfSpeech::Verb);
	}

	if lower.ends_with("ly") && lower.chars().count() > 4 {
		if LY_NOUNS.contains(&lower) {
			return Some(PartOfSpeech::Noun);
		}
		return Some(PartOfSpeech::Adverb);
	}
	if ends_with_noun_suffix(lower) {
		return Some(PartOfSpeech::Noun);
	}
	if lower.ends_with("ing") || past_form || VERB_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
		return Some(PartOfSpeech::Verb);
	}
	if adjectival {
		return Some(PartOfSpeech::Adjective);
	}

	Some(PartOfSpeech::Noun)
}

// `-ment` / `-ence` / `-ance` would otherwise be caught by `-ent` / `-ant`.
fn ends_with_noun_suffix(lower: &str) -> bool {
	lower.chars().count() > 4 && NOUN_SUFFIXES.iter().any(|s| lower.ends_with(s))
}
