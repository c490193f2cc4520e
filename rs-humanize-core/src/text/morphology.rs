use super::part_of_speech::PartOfSpeech;

/// Regular inflection carried by a surface word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Inflection {
	None,
	Plural,
	ThirdPerson,
	Past,
	Gerund,
}

/// Possible `(lemma, inflection)` readings of a lowercase word, most likely
/// first.
///
/// Suffix stripping is ambiguous (`used` → `us` or `use`), so every plausible
/// stem is listed; the surface form itself always comes last.
pub fn analyze(lower: &str, pos: PartOfSpeech) -> Vec<(String, Inflection)> {
	let mut readings: Vec<(String, Inflection)> = Vec::new();
	let len = lower.chars().count();

	match pos {
		PartOfSpeech::Noun => {
			if let Some(stem) = strip_plural(lower) {
				readings.push((stem, Inflection::Plural));
			}
		}
		PartOfSpeech::Verb => {
			if let Some(stem) = lower.strip_suffix("ing").filter(|_| len > 5) {
				push_stems(&mut readings, stem, Inflection::Gerund);
			} else if let Some(stem) = lower.strip_suffix("ied").filter(|_| len > 4) {
				readings.push((format!("{stem}y"), Inflection::Past));
			} else if let Some(stem) = lower.strip_suffix("ed").filter(|_| len > 4) {
				push_stems(&mut readings, stem, Inflection::Past);
			} else if let Some(stem) = strip_plural(lower) {
				readings.push((stem, Inflection::ThirdPerson));
			}
		}
		PartOfSpeech::Adjective | PartOfSpeech::Adverb => {}
	}

	readings.retain(|(lemma, _)| lemma != lower);
	readings.push((lower.to_owned(), Inflection::None));
	readings
}

/// Applies `inflection` to `lemma` using regular English spelling rules.
pub fn inflect(lemma: &str, inflection: Inflection) -> String {
	match inflection {
		Inflection::None => lemma.to_owned(),
		Inflection::Plural | Inflection::ThirdPerson => {
			if ["s", "x", "z", "ch", "sh"].iter().any(|s| lemma.ends_with(s)) {
				format!("{lemma}es")
			} else if let Some(stem) = consonant_y_stem(lemma) {
				format!("{stem}ies")
			} else {
				format!("{lemma}s")
			}
		}
		Inflection::Past => {
			if lemma.ends_with('e') {
				format!("{lemma}d")
			} else if let Some(stem) = consonant_y_stem(lemma) {
				format!("{stem}ied")
			} else if doubles_final_consonant(lemma) {
				format!("{lemma}{}ed", last_char(lemma))
			} else {
				format!("{lemma}ed")
			}
		}
		Inflection::Gerund => {
			if let Some(stem) = lemma.strip_suffix("ie") {
				format!("{stem}ying")
			} else if lemma.ends_with('e') && !["ee", "ye", "oe"].iter().any(|s| lemma.ends_with(s)) {
				format!("{}ing", &lemma[..lemma.len() - 1])
			} else if doubles_final_consonant(lemma) {
				format!("{lemma}{}ing", last_char(lemma))
			} else {
				format!("{lemma}ing")
			}
		}
	}
}

fn strip_plural(lower: &str) -> Option<String> {
	let len = lower.chars().count();
	if len <= 3 {
		return None;
	}
	if let Some(stem) = lower.strip_suffix("ies").filter(|_| len > 4) {
		return Some(format!("{stem}y"));
	}
	for suffix in ["sses", "shes", "ches", "xes", "zes"] {
		if lower.ends_with(suffix) {
			return Some(lower[..lower.len() - 2].to_owned());
		}
	}
	if lower.ends_with('s') && !["ss", "us", "is", "ous"].iter().any(|s| lower.ends_with(s)) {
		return Some(lower[..lower.len() - 1].to_owned());
	}
	None
}

// Adds `stem`, `stem + e` and the de-doubled stem (`stopp` → `stop`).
fn push_stems(readings: &mut Vec<(String, Inflection)>, stem: &str, inflection: Inflection) {
	readings.push((stem.to_owned(), inflection));
	readings.push((format!("{stem}e"), inflection));
	let mut chars = stem.chars().rev();
	if let (Some(a), Some(b)) = (chars.next(), chars.next()) {
		if a == b && !is_vowel(a) && !matches!(a, 'l' | 's' | 'z' | 'f') {
			readings.push((stem[..stem.len() - a.len_utf8()].to_owned(), inflection));
		}
	}
}

fn consonant_y_stem(lemma: &str) -> Option<&str> {
	let stem = lemma.strip_suffix('y')?;
	match stem.chars().last() {
		Some(c) if !is_vowel(c) => Some(stem),
		_ => None,
	}
}

// Short single-vowel CVC words double their final consonant: stop → stopped.
fn doubles_final_consonant(lemma: &str) -> bool {
	let chars: Vec<char> = lemma.chars().collect();
	if chars.len() < 3 || !chars.iter().all(|c| c.is_ascii_lowercase()) {
		return false;
	}
	let vowel_groups = chars
		.windows(2)
		.filter(|w| !is_vowel(w[0]) && is_vowel(w[1]))
		.count()
		+ usize::from(is_vowel(chars[0]));
	let n = chars.len();
	vowel_groups == 1
		&& !is_vowel(chars[n - 3])
		&& is_vowel(chars[n - 2])
		&& !is_vowel(chars[n - 1])
		&& !matches!(chars[n - 1], 'w' | 'x' | 'y')
}

fn last_char(word: &str) -> char {
	word.chars().last().unwrap_or_default()
}

fn is_vowel(c: char) -> bool {
	matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}
