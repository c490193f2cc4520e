use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use log::{debug, warn};

use super::lexical_resource::LexicalResource;
use crate::text::part_of_speech::PartOfSpeech;

/// Cache key: a lowercase lemma under one part of speech.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
	pub lemma: String,
	pub pos: PartOfSpeech,
}

/// Resolved replacements for one lemma.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynonymEntry {
	pub lemma: String,
	pub pos: PartOfSpeech,
	pub candidates: Vec<String>,
}

/// Stored lookup outcome.
///
/// `NoReplacement` is cached like any hit, so unknown lemmas and resource
/// failures are resolved once per key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CacheRecord {
	Found(Arc<SynonymEntry>),
	NoReplacement,
}

impl CacheRecord {
	/// Candidate lemmas of this record (empty for `NoReplacement`).
	pub fn candidates(&self) -> Vec<String> {
		match self {
			CacheRecord::Found(entry) => entry.candidates.clone(),
			CacheRecord::NoReplacement => Vec::new(),
		}
	}
}

/// Thread-safe memo of synonym lookups shared by every rewrite.
///
/// Created once by the entry point and handed around by `Arc`. Concurrent
/// readers never block each other; concurrent population of the same key
/// keeps the first stored value (later writers adopt it).
#[derive(Debug, Default)]
pub struct SynonymCache {
	records: RwLock<HashMap<CacheKey, CacheRecord>>,
}

impl SynonymCache {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn get(&self, key: &CacheKey) -> Option<CacheRecord> {
		let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
		records.get(key).cloned()
	}

	/// Stores `record` unless the key is already populated; returns the
	/// value that ends up in the cache.
	pub fn insert_if_absent(&self, key: CacheKey, record: CacheRecord) -> CacheRecord {
		let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);
		records.entry(key).or_insert(record).clone()
	}

	pub fn len(&self) -> usize {
		self.records.read().unwrap_or_else(PoisonError::into_inner).len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Snapshot of the populated keys.
	pub fn keys(&self) -> Vec<CacheKey> {
		self.records.read().unwrap_or_else(PoisonError::into_inner).keys().cloned().collect()
	}
}

/// Memoizing synonym lookup over a `LexicalResource`.
///
/// # Contract
/// - A hit returns the stored candidates without touching the resource.
/// - A miss queries the primary sense once, filters it and stores the
///   result, even when empty.
/// - Resource failures are logged and stored as `NoReplacement`.
pub struct SynonymRepository {
	resource: Arc<dyn LexicalResource>,
	cache: Arc<SynonymCache>,
	queries: AtomicUsize,
}

impl SynonymRepository {
	pub fn new(resource: Arc<dyn LexicalResource>, cache: Arc<SynonymCache>) -> Self {
		Self { resource, cache, queries: AtomicUsize::new(0) }
	}

	/// Candidate replacements for `lemma` under `pos`, possibly empty.
	///
	/// Candidates never include the lemma itself (case-insensitive),
	/// multi-word phrases, or duplicates after lowercasing.
	pub fn lookup(&self, lemma: &str, pos: PartOfSpeech) -> Vec<String> {
		let lemma = lemma.trim().to_lowercase();
		if lemma.is_empty() {
			return Vec::new();
		}

		let key = CacheKey { lemma, pos };
		if let Some(record) = self.cache.get(&key) {
			return record.candidates();
		}

		self.queries.fetch_add(1, Ordering::Relaxed);
		let record = match self.resource.primary_sense(&key.lemma, pos) {
			Ok(Some(sense)) => {
				let candidates = filter_candidates(&key.lemma, &sense.members);
				if candidates.is_empty() {
					CacheRecord::NoReplacement
				} else {
					CacheRecord::Found(Arc::new(SynonymEntry { lemma: key.lemma.clone(), pos, candidates }))
				}
			}
			Ok(None) => {
				debug!("No sense for '{}' ({})", key.lemma, pos.code());
				CacheRecord::NoReplacement
			}
			Err(e) => {
				warn!("Synonym lookup for '{}' failed: {e}", key.lemma);
				CacheRecord::NoReplacement
			}
		};

		self.cache.insert_if_absent(key, record).candidates()
	}

	/// Number of times the lexical resource has been queried.
	pub fn resource_queries(&self) -> usize {
		self.queries.load(Ordering::Relaxed)
	}

	pub fn cache(&self) -> &Arc<SynonymCache> {
		&self.cache
	}
}

fn filter_candidates(lemma: &str, members: &[String]) -> Vec<String> {
	let mut candidates: Vec<String> = Vec::new();
	for member in members {
		let candidate = member.trim().to_lowercase();
		let multi_word = candidate.contains('_') || candidate.contains(char::is_whitespace);
		if candidate.is_empty() || multi_word || candidate == lemma || candidates.contains(&candidate) {
			continue;
		}
		candidates.push(candidate);
	}
	candidates
}
