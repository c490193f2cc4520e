use std::collections::HashMap;
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{HumanizeError, Result};
use crate::io::{is_fresh, read_lines, resource_name, sidecar_path};
use crate::text::part_of_speech::PartOfSpeech;

/// One sense grouping: words interchangeable in a single meaning.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SenseGrouping {
	pub pos: PartOfSpeech,
	pub members: Vec<String>,
}

/// A dictionary-like source of sense groupings.
///
/// Implementations return the primary sense only: the synonym repository
/// never performs an exhaustive multi-sense search.
pub trait LexicalResource: Send + Sync {
	/// First listed sense grouping of `lemma` under `pos`, if any.
	///
	/// # Errors
	/// `HumanizeError::ResourceUnavailable` when the resource cannot answer.
	fn primary_sense(&self, lemma: &str, pos: PartOfSpeech) -> Result<Option<SenseGrouping>>;
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
struct SenseKey {
	lemma: String,
	pos: PartOfSpeech,
}

/// In-memory thesaurus indexed by `(lemma, part of speech)`.
///
/// # Source format
/// One synset per line, `#` starts a comment:
/// ```text
/// n	car,auto,automobile,motorcar
/// v	show,demonstrate,exhibit
/// ```
/// Members containing `_` are multi-word phrases (kept in the synset, never
/// offered as replacements).
///
/// # Invariants
/// - Sense lists keep file order, so the first entry is the primary sense
/// - Every index entry points into `synsets`
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Thesaurus {
	synsets: Vec<SenseGrouping>,
	senses: HashMap<SenseKey, Vec<usize>>,
	names: Vec<String>,
}

impl Thesaurus {
	/// Loads a thesaurus from a `.dat` source, preferring its binary sidecar.
	///
	/// - Uses `<stem>.bin` when it exists and is not older than the source.
	/// - Otherwise parses the source in parallel and writes the sidecar.
	///
	/// # Errors
	/// I/O failures, parse errors (with line numbers), or a corrupt sidecar.
	pub fn new<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let binary_data_path = sidecar_path(&filepath)?;
		let mut thesaurus: Thesaurus;
		if is_fresh(&filepath, &binary_data_path) {
			let bytes = std::fs::read(&binary_data_path)?;
			thesaurus = postcard::from_bytes(&bytes)?;
			debug!("Loaded thesaurus sidecar {}", binary_data_path.display());
		} else {
			thesaurus = Self::read_database_file(&filepath, &binary_data_path)?;
		}
		thesaurus.names.push(resource_name(&filepath)?);
		info!(
			"Thesaurus {} ready: {} synsets, {} index entries",
			filepath.as_ref().display(),
			thesaurus.synsets.len(),
			thesaurus.senses.len()
		);
		Ok(thesaurus)
	}

	/// Builds a thesaurus from source lines (same format as the `.dat` file).
	///
	/// `first_line` is the 1-based line number of `lines[0]`, used in errors.
	pub fn from_lines<S: AsRef<str>>(lines: &[S], first_line: usize) -> Result<Self> {
		let mut thesaurus = Self::default();
		for (offset, line) in lines.iter().enumerate() {
			if let Some(synset) = Self::parse_line(line.as_ref(), first_line + offset)? {
				thesaurus.add_synset(synset.pos, synset.members);
			}
		}
		Ok(thesaurus)
	}

	/// Parses one source line; blank lines and comments yield `None`.
	fn parse_line(line: &str, line_number: usize) -> Result<Option<SenseGrouping>> {
		let line = line.split('#').next().unwrap_or_default().trim();
		if line.is_empty() {
			return Ok(None);
		}

		let (code, members) = line
			.split_once(char::is_whitespace)
			.ok_or_else(|| HumanizeError::Parse { line: line_number, message: "expected '<pos> <members>'".to_owned() })?;
		let pos = PartOfSpeech::from_code(code).ok_or_else(|| HumanizeError::Parse {
			line: line_number,
			message: format!("unknown part of speech '{code}'"),
		})?;

		let members: Vec<String> = members
			.split(',')
			.map(|m| m.trim().to_lowercase())
			.filter(|m| !m.is_empty())
			.collect();
		if members.len() < 2 {
			return Err(HumanizeError::Parse { line: line_number, message: "a synset needs at least two members".to_owned() });
		}

		Ok(Some(SenseGrouping { pos, members }))
	}

	/// Appends a synset and indexes each of its members.
	pub fn add_synset(&mut self, pos: PartOfSpeech, members: Vec<String>) {
		let id = self.synsets.len();
		for member in &members {
			let key = SenseKey { lemma: member.to_lowercase(), pos };
			let ids = self.senses.entry(key).or_default();
			if !ids.contains(&id) {
				ids.push(id);
			}
		}
		self.synsets.push(SenseGrouping { pos, members });
	}

	/// Parses a source file in parallel chunks, merges the partial thesauri
	/// in file order and writes the binary sidecar.
	///
	/// # Behavior
	/// - Splits lines into chunks (CPU cores * factor).
	/// - Each thread parses one chunk into a partial thesaurus.
	/// - Partial results are re-ordered by chunk index before merging, so the
	///   primary sense of every lemma is the first one in the file.
	fn read_database_file<PF, PB>(filename: PF, binary_data_path: PB) -> Result<Thesaurus>
	where
		PF: AsRef<Path>,
		PB: AsRef<Path>,
	{
		let lines = read_lines(&filename)?;
		if lines.is_empty() {
			return Ok(Thesaurus::default());
		}
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks);

		let (tx, rx) = mpsc::channel();
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			let first_line = index * chunk_size + 1;

			thread::spawn(move || {
				let partial = Thesaurus::from_lines(&chunk, first_line);
				// The receiver only disappears if the loader already bailed out.
				let _ = tx.send((index, partial));
			});
		}
		drop(tx);

		let mut partials: Vec<(usize, Result<Thesaurus>)> = rx.iter().collect();
		partials.sort_by_key(|(index, _)| *index);

		let mut final_thesaurus = Thesaurus::default();
		for (_, partial) in partials {
			final_thesaurus.merge(&partial?);
		}

		// The sidecar only speeds up later loads; failing to write it is not fatal.
		let bytes = postcard::to_stdvec(&final_thesaurus)?;
		if let Err(e) = std::fs::write(&binary_data_path, bytes) {
			warn!("Cannot write thesaurus sidecar {}: {e}", binary_data_path.as_ref().display());
		}

		Ok(final_thesaurus)
	}

	/// Appends every synset of `other` after the ones already loaded.
	///
	/// Sense order is preserved: senses of `self` stay ahead of those of
	/// `other` for the same lemma.
	pub fn merge(&mut self, other: &Self) {
		for synset in &other.synsets {
			self.add_synset(synset.pos, synset.members.clone());
		}
		self.names.extend(other.names.iter().cloned());
	}

	/// Names of the source files merged into this thesaurus.
	pub fn get_names(&self) -> &[String] {
		&self.names
	}

	/// Number of synsets.
	pub fn len(&self) -> usize {
		self.synsets.len()
	}

	pub fn is_empty(&self) -> bool {
		self.synsets.is_empty()
	}
}

impl LexicalResource for Thesaurus {
	fn primary_sense(&self, lemma: &str, pos: PartOfSpeech) -> Result<Option<SenseGrouping>> {
		let key = SenseKey { lemma: lemma.to_lowercase(), pos };
		let sense = self
			.senses
			.get(&key)
			.and_then(|ids| ids.first())
			.and_then(|id| self.synsets.get(*id))
			.cloned();
		Ok(sense)
	}
}

/// Resource standing in for a thesaurus that failed to load.
///
/// Every query reports `ResourceUnavailable`; the repository turns that into
/// cached empty results, so rewriting proceeds without substitution.
#[derive(Debug, Clone)]
pub struct UnavailableResource {
	reason: String,
}

impl UnavailableResource {
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}
}

impl LexicalResource for UnavailableResource {
	fn primary_sense(&self, _lemma: &str, _pos: PartOfSpeech) -> Result<Option<SenseGrouping>> {
		Err(HumanizeError::ResourceUnavailable(self.reason.clone()))
	}
}
