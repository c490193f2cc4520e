use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_humanize_core::error::Result;
use rs_humanize_core::pipeline::stages::{Stage, StageContext};
use rs_humanize_core::text::part_of_speech::PartOfSpeech;
use rs_humanize_core::text::passage::{Sentence, TokenKind};
use rs_humanize_core::{
	LexicalResource, Passage, ProfileSet, RewriteMode, RewriteOrchestrator, SenseGrouping, StageKind, StageSettings,
	SynonymCache, SynonymRepository, Thesaurus, TransformProfile, TransformationPipeline,
};

/// Lexical resource that counts how often it is queried.
struct CountingResource {
	senses: HashMap<String, Vec<String>>,
	calls: AtomicUsize,
}

impl CountingResource {
	fn new(synsets: &[&[&str]]) -> Self {
		let mut senses = HashMap::new();
		for members in synsets {
			let members: Vec<String> = members.iter().map(|m| m.to_string()).collect();
			for member in &members {
				senses.entry(member.to_lowercase()).or_insert_with(|| members.clone());
			}
		}
		Self { senses, calls: AtomicUsize::new(0) }
	}

	fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

impl LexicalResource for CountingResource {
	// Ignores the part of speech so tests do not depend on tagging.
	fn primary_sense(&self, lemma: &str, pos: PartOfSpeech) -> Result<Option<SenseGrouping>> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self.senses.get(lemma).map(|members| SenseGrouping { pos, members: members.clone() }))
	}
}

fn repository(resource: Arc<dyn LexicalResource>) -> Arc<SynonymRepository> {
	Arc::new(SynonymRepository::new(resource, Arc::new(SynonymCache::new())))
}

fn only(kind: StageKind, settings: StageSettings) -> TransformProfile {
	assert_eq!(settings.kind, kind);
	TransformProfile::new(kind.name(), vec![settings]).unwrap()
}

#[test]
fn second_lookup_is_identical_and_resource_is_queried_once_per_key() {
	let resource = Arc::new(CountingResource::new(&[&["car", "auto", "automobile"], &["fast", "quick"]]));
	let repo = repository(resource.clone());

	let keys = [
		("car", PartOfSpeech::Noun),
		("car", PartOfSpeech::Verb),
		("fast", PartOfSpeech::Adjective),
		("unknown", PartOfSpeech::Noun),
	];
	for (lemma, pos) in keys {
		let first = repo.lookup(lemma, pos);
		let second = repo.lookup(lemma, pos);
		assert_eq!(first, second);
	}
	assert_eq!(resource.calls(), keys.len());
	assert_eq!(repo.cache().len(), keys.len());
}

#[test]
fn concurrent_population_converges_on_one_value() {
	let resource = Arc::new(CountingResource::new(&[&["car", "auto"], &["house", "home", "dwelling"]]));
	let repo = repository(resource.clone());

	let handles: Vec<_> = (0..8)
		.map(|_| {
			let repo = repo.clone();
			thread::spawn(move || {
				(0..50)
					.map(|_| (repo.lookup("car", PartOfSpeech::Noun), repo.lookup("house", PartOfSpeech::Noun)))
					.collect::<Vec<_>>()
			})
		})
		.collect();

	for handle in handles {
		for (car, house) in handle.join().unwrap() {
			assert_eq!(car, vec!["auto"]);
			assert_eq!(house, vec!["home", "dwelling"]);
		}
	}
	assert_eq!(repo.cache().len(), 2);
	assert!(resource.calls() >= 2 && resource.calls() <= 16);
}

#[test]
fn zero_probability_never_modifies_output() {
	let resource = Arc::new(CountingResource::new(&[&["model", "framework"], &["remarkable", "notable"]]));
	let pipeline = TransformationPipeline::new(repository(resource));
	let mut profile = TransformProfile::enhanced();
	profile.set_all_probabilities(0.0).unwrap();

	let text = "The remarkable model works because it is tuned. However, it is slow. The team also knows it. Users wait.";
	let passage = Passage::parse(text);
	for seed in 0..200 {
		let (out, _) = pipeline.run(&passage, &profile, &mut StdRng::seed_from_u64(seed));
		assert_eq!(out.render(), text);
	}
}

#[test]
fn full_probability_applies_to_every_eligible_unit() {
	let resource = Arc::new(CountingResource::new(&[
		&["model", "framework"],
		&["remarkable", "notable"],
		&["result", "outcome"],
		&["clear", "plain"],
	]));
	let pipeline = TransformationPipeline::new(repository(resource));

	let lexical = only(StageKind::Lexical, StageSettings::new(StageKind::Lexical, 1.0));
	let text = "The remarkable model works. The result is clear.";
	for seed in 0..50 {
		let (out, tally) = pipeline.run(&Passage::parse(text), &lexical, &mut StdRng::seed_from_u64(seed));
		assert_eq!(out.render(), "The notable framework works. The outcome is plain.");
		assert_eq!(tally.substitutions, 4);
	}

	let filler = only(StageKind::Filler, StageSettings::new(StageKind::Filler, 1.0));
	let text = "The model works well. The result is clear. We ship it today.";
	for seed in 0..50 {
		let (out, tally) = pipeline.run(&Passage::parse(text), &filler, &mut StdRng::seed_from_u64(seed));
		assert_eq!(tally.fillers, 3);
		assert!(out.sentences.iter().all(Sentence::has_filler));
	}
}

/// Structural stage that deterministically rewrites "car" into "vehicle".
struct VehicleRewrite;

impl Stage for VehicleRewrite {
	fn kind(&self) -> StageKind {
		StageKind::Structural
	}

	fn rewrite_sentence(&self, sentence: &Sentence, _settings: &StageSettings, ctx: &mut StageContext<'_>) -> Result<Sentence> {
		let mut out = sentence.clone();
		for token in out.tokens.iter_mut().filter(|t| t.lower() == "car") {
			token.text = "vehicle".to_owned();
		}
		ctx.tally.structural += 1;
		Ok(out)
	}
}

#[test]
fn substitution_sees_structural_output() {
	let thesaurus = Thesaurus::from_lines(&["n\tcar,auto", "n\tvehicle,conveyance"], 1).unwrap();
	let pipeline = TransformationPipeline::new(repository(Arc::new(thesaurus))).with_stage(Box::new(VehicleRewrite));
	let profile = TransformProfile::new(
		"ordered",
		vec![StageSettings::new(StageKind::Lexical, 1.0), StageSettings::new(StageKind::Structural, 1.0)],
	)
	.unwrap();

	for seed in 0..20 {
		let (out, tally) = pipeline.run(&Passage::parse("The car stopped."), &profile, &mut StdRng::seed_from_u64(seed));
		assert_eq!(out.render(), "The conveyance stopped.");
		assert_eq!(tally.structural, 1);
	}
}

fn silent_orchestrator() -> RewriteOrchestrator {
	let mut profiles = ProfileSet::default();
	profiles.basic.set_all_probabilities(0.0).unwrap();
	profiles.enhanced.set_all_probabilities(0.0).unwrap();
	let thesaurus = Thesaurus::from_lines(&["n\tworld,globe"], 1).unwrap();
	RewriteOrchestrator::new(TransformationPipeline::new(repository(Arc::new(thesaurus))), profiles)
}

#[test]
fn silent_profiles_return_the_input_exactly() {
	let orchestrator = silent_orchestrator();
	assert_eq!(orchestrator.rewrite("Hello world.", None, RewriteMode::from_flag(Some(false))), "Hello world.");

	let awkward = "  Spaces   everywhere...\n\nAnd \"quotes,\" too!  ";
	assert_eq!(orchestrator.rewrite(awkward, None, RewriteMode::Enhanced), awkward);
	assert_eq!(orchestrator.rewrite("", None, RewriteMode::Basic), "");
}

#[test]
fn substituted_words_never_echo_the_original() {
	let resource = Arc::new(CountingResource::new(&[
		&["car", "Car", "CAR", "cars", "auto"],
		&["stop", "stops", "halt"],
		&["quick", "Quick", "fast"],
		&["house", "houses"],
	]));
	let pipeline = TransformationPipeline::new(repository(resource));
	let profile = only(StageKind::Lexical, StageSettings::new(StageKind::Lexical, 1.0).with_word_probability(0.7));
	let text = "Quick cars stop near the house. The car stops. Houses stop cars.";
	let input = Passage::parse(text);

	for seed in 0..100 {
		let (out, _) = pipeline.run(&input, &profile, &mut StdRng::seed_from_u64(seed));
		for (before, after) in input.sentences.iter().zip(&out.sentences) {
			assert_eq!(before.tokens.len(), after.tokens.len());
			for (a, b) in before.tokens.iter().zip(&after.tokens) {
				if a.kind == TokenKind::Word && a.text != b.text {
					assert_ne!(a.lower(), b.lower(), "seed {seed}");
				}
			}
		}
	}
}

#[test]
fn anaphoric_second_sentence_is_never_moved_ahead() {
	let pipeline = TransformationPipeline::new(repository(Arc::new(Thesaurus::default())));
	let profile = only(StageKind::Reorder, StageSettings::new(StageKind::Reorder, 1.0).with_max_swaps(4));

	let pair = "The battery lasts all day. It also charges quickly.";
	for seed in 0..200 {
		let (out, _) = pipeline.run(&Passage::parse(pair), &profile, &mut StdRng::seed_from_u64(seed));
		assert_eq!(out.render(), pair);
	}

	let longer = "Prices fell in spring. Demand rose sharply. It also stayed high. Analysts were surprised.";
	let mut moved = false;
	for seed in 0..200 {
		let (out, _) = pipeline.run(&Passage::parse(longer), &profile, &mut StdRng::seed_from_u64(seed));
		let rendered = out.render();
		assert!(rendered.contains("Demand rose sharply. It also stayed high."), "{rendered}");
		assert!(!rendered.starts_with("It also"));
		moved |= rendered != longer;
	}
	assert!(moved);
}

#[test]
fn reordering_moves_fillers_with_their_host_sentence() {
	let pipeline = TransformationPipeline::new(repository(Arc::new(Thesaurus::default())));
	let profile = TransformProfile::new(
		"filler-then-reorder",
		vec![
			StageSettings::new(StageKind::Reorder, 1.0).with_max_swaps(3),
			StageSettings::new(StageKind::Filler, 1.0).with_fillers(["In fact"]),
		],
	)
	.unwrap();
	let text = "The phone is light. It also charges fast. The reviews were positive. The sales grew quickly.";

	for seed in 0..100 {
		let (out, tally) = pipeline.run(&Passage::parse(text), &profile, &mut StdRng::seed_from_u64(seed));
		let rendered = out.render();
		assert_eq!(tally.fillers, 4);
		assert_eq!(tally.reorders, 1);
		assert_eq!(out.len(), 4);
		for sentence in &out.sentences {
			assert!(sentence.has_filler());
			assert!(sentence.text().starts_with("In fact, "), "{rendered}");
		}
		assert!(rendered.contains("In fact, the phone is light. In fact, it also charges fast."), "{rendered}");
		assert!(!rendered.starts_with("In fact, it also"));
	}
}

#[test]
fn absent_mode_flag_behaves_like_basic() {
	let resource = Arc::new(CountingResource::new(&[&["model", "framework"], &["remarkable", "notable"], &["tuned", "adjusted"]]));
	let orchestrator = RewriteOrchestrator::new(TransformationPipeline::new(repository(resource)), ProfileSet::default());
	let text = "The remarkable model works because it is tuned. It is slow. The team knows it. Users wait for the model.";
	let paraphrased = "The remarkable model performs because it is tuned. It is slow. The team knows this. Users wait for the model.";

	for seed in 0..50 {
		let absent = orchestrator.rewrite_with_rng(text, Some(paraphrased), RewriteMode::from_flag(None), &mut StdRng::seed_from_u64(seed));
		let basic = orchestrator.rewrite_with_rng(text, Some(paraphrased), RewriteMode::from_flag(Some(false)), &mut StdRng::seed_from_u64(seed));
		assert_eq!(absent, basic);
	}
}

#[test]
fn bundled_thesaurus_loads() {
	let dir = tempfile::tempdir().unwrap();
	let source = dir.path().join("thesaurus.dat");
	std::fs::copy(concat!(env!("CARGO_MANIFEST_DIR"), "/../data/thesaurus.dat"), &source).unwrap();

	let thesaurus = Thesaurus::new(&source).unwrap();
	assert!(thesaurus.len() > 50);
	let repo = repository(Arc::new(thesaurus));
	assert!(!repo.lookup("use", PartOfSpeech::Verb).is_empty());
}
