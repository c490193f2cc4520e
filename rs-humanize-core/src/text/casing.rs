use super::part_of_speech::is_function_word;

/// Surface casing of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Casing {
	Lower,
	Capitalized,
	Upper,
	Mixed,
}

impl Casing {
	/// Detects the casing of `word`, looking at alphabetic characters only.
	///
	/// Single uppercase letters ("A", "I") count as capitalized, not upper.
	pub fn of(word: &str) -> Self {
		let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
		let Some(first) = letters.first() else {
			return Casing::Lower;
		};

		if letters.iter().all(|c| c.is_lowercase()) {
			Casing::Lower
		} else if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
			Casing::Upper
		} else if first.is_uppercase() && letters[1..].iter().all(|c| c.is_lowercase()) {
			Casing::Capitalized
		} else {
			Casing::Mixed
		}
	}

	/// Applies this casing to `word`.
	///
	/// `Mixed` cannot be transferred and leaves `word` untouched.
	pub fn apply(self, word: &str) -> String {
		match self {
			Casing::Lower => word.to_lowercase(),
			Casing::Capitalized => capitalize(&word.to_lowercase()),
			Casing::Upper => word.to_uppercase(),
			Casing::Mixed => word.to_owned(),
		}
	}
}

/// Uppercases the first character, leaving the rest as-is.
pub fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// Form a sentence-initial word takes once it is no longer first.
///
/// Returns `None` when the word might be a proper noun: a capitalized word
/// that is not a known function word cannot be lowercased safely.
pub fn demote_initial(word: &str) -> Option<String> {
	if word == "I" || word.starts_with("I'") || word.starts_with("I’") {
		return Some(word.to_owned());
	}
	match Casing::of(word) {
		Casing::Lower | Casing::Upper | Casing::Mixed => Some(word.to_owned()),
		Casing::Capitalized => {
			let lower = word.to_lowercase();
			if is_function_word(&lower) { Some(lower) } else { None }
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn detects_casing() {
		assert_eq!(Casing::of("hello"), Casing::Lower);
		assert_eq!(Casing::of("Hello"), Casing::Capitalized);
		assert_eq!(Casing::of("NASA"), Casing::Upper);
		assert_eq!(Casing::of("iPhone"), Casing::Mixed);
		assert_eq!(Casing::of("I"), Casing::Capitalized);
	}

	#[test]
	fn transfers_casing() {
		assert_eq!(Casing::Capitalized.apply("auto"), "Auto");
		assert_eq!(Casing::Upper.apply("auto"), "AUTO");
		assert_eq!(Casing::Lower.apply("Auto"), "auto");
	}

	#[test]
	fn demotes_only_safe_initials() {
		assert_eq!(demote_initial("The").as_deref(), Some("the"));
		assert_eq!(demote_initial("I").as_deref(), Some("I"));
		assert_eq!(demote_initial("Paris"), None);
	}
}
