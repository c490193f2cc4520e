use std::sync::Arc;

use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rs_humanize_core::{
    ProfileSet, RewriteMode, RewriteOrchestrator, StageKind, SynonymCache, SynonymRepository, Thesaurus,
    TransformationPipeline,
};

const SHORT: &str = "The model is remarkable. It is useful for many tasks.";

const MEDIUM: &str = "The research team developed a new approach to the problem. \
Because the old method was slow, they decided to build a simple tool. \
However, the first results were not clear. The team examined the data carefully. \
Several people suggested important changes to the plan.";

const LONG: &str = "Modern technology has changed the way people work. \
Many companies use powerful tools to improve the speed of their work. \
When a job is difficult, a good tool can help. \
The benefit is clear for small groups as well as large firms. \
Nevertheless, some workers believe that the change happened too quickly.\n\n\
Researchers recently examined this trend. \
Although the study was brief, it showed several interesting results. \
The main concern was the size of the effort needed to learn new skills. \
Workers also described the experience as strange at first.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Load the thesaurus from "data" (.dat file)
    // The .bin sidecar is used automatically when it is up to date
    let thesaurus = Thesaurus::new("./data/thesaurus.dat")?;
    info!("Loaded {} synsets from {:?}", thesaurus.len(), thesaurus.get_names());

    // The cache is shared by every request served by this repository
    let synonyms = Arc::new(SynonymRepository::new(Arc::new(thesaurus), Arc::new(SynonymCache::new())));

    // Built-in profiles can be tuned before use
    let mut profiles = ProfileSet::default();
    profiles.enhanced.set_probability(StageKind::Filler, 0.5)?;

    // Invalid probabilities are rejected
    match profiles.basic.set_probability(StageKind::Lexical, 1.5) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    let orchestrator = RewriteOrchestrator::new(TransformationPipeline::new(synonyms.clone()), profiles);

    // A fixed seed makes every run print the same rewrites
    let mut rng = StdRng::seed_from_u64(42);

    for (name, text) in [("short", SHORT), ("medium", MEDIUM), ("long", LONG)] {
        for mode in [RewriteMode::Basic, RewriteMode::Enhanced] {
            let outcome = orchestrator.rewrite_with_rng(text, None, mode, &mut rng);
            println!("--- {name} / {mode:?} ---");
            println!("{}", outcome.text);
            println!("{:?}\n", outcome.statistics);
        }
    }

    // A paraphrased draft replaces the original as the pipeline input
    let paraphrased = "The model is notable. It helps with plenty of tasks.";
    let outcome = orchestrator.rewrite_with_rng(SHORT, Some(paraphrased), RewriteMode::from_flag(None), &mut rng);
    println!("--- paraphrased / default mode ---\n{}\n", outcome.text);

    // Blank input comes back unchanged
    println!("Blank input: {:?}", orchestrator.rewrite("   ", None, RewriteMode::Basic));

    println!(
        "Synonym cache: {} entries, {} thesaurus queries",
        synonyms.cache().len(),
        synonyms.resource_queries()
    );

    Ok(())
}
