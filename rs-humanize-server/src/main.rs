mod config;
mod error;
mod paraphrase;

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{get, post, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;

use rs_humanize_core::{
	LexicalResource, ProfileSet, RewriteMode, RewriteOrchestrator, RewriteStatistics, SynonymCache, SynonymRepository,
	Thesaurus, TransformationPipeline, UnavailableResource,
};

use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::paraphrase::ParaphraseClient;

/// Body of `POST /humanize`.
#[derive(Deserialize)]
struct HumanizeRequest {
	text: String,
	paraphrasing: Option<bool>,
	enhanced: Option<bool>,
}

#[derive(Serialize)]
struct HumanizeResponse {
	humanized_text: String,
	statistics: RewriteStatistics,
}

struct AppState {
	orchestrator: RewriteOrchestrator,
	paraphraser: Option<ParaphraseClient>,
}

#[get("/health")]
async fn get_health() -> impl Responder {
	HttpResponse::Ok().json(json!({ "status": "ok" }))
}

/// HTTP POST endpoint `/humanize`
///
/// Paraphrases the text when asked to and a paraphrase model is configured,
/// then runs the rewriting pipeline. `enhanced` defaults to basic mode and
/// `paraphrasing` defaults to true.
#[post("/humanize")]
async fn post_humanize(data: web::Data<AppState>, body: web::Json<HumanizeRequest>) -> Result<HttpResponse, ServerError> {
	let request = body.into_inner();
	RewriteOrchestrator::check_input(&request.text)?;

	let mode = RewriteMode::from_flag(request.enhanced);
	let paraphrased = match (&data.paraphraser, request.paraphrasing.unwrap_or(true)) {
		(Some(client), true) => client.paraphrase_or_skip(&request.text, mode).await,
		_ => None,
	};

	let outcome = data.orchestrator.rewrite_detailed(&request.text, paraphrased.as_deref(), mode);
	info!(
		"Humanized {} -> {} characters ({:?} mode)",
		outcome.statistics.original_length, outcome.statistics.final_length, mode
	);
	Ok(HttpResponse::Ok().json(HumanizeResponse { humanized_text: outcome.text, statistics: outcome.statistics }))
}

/// Loads the thesaurus and profiles and wires the rewriting core.
///
/// A thesaurus that cannot be loaded is not fatal: lexical substitution
/// is then disabled and every other stage still runs.
fn build_state(config: &ServerConfig) -> Result<AppState, ServerError> {
	let resource: Arc<dyn LexicalResource> = match Thesaurus::new(&config.thesaurus) {
		Ok(thesaurus) => Arc::new(thesaurus),
		Err(e) => {
			warn!("Cannot load thesaurus {}: {e}", config.thesaurus.display());
			Arc::new(UnavailableResource::new(e.to_string()))
		}
	};

	let profiles = match &config.profiles {
		Some(path) => {
			info!("Loading profiles from {}", path.display());
			ProfileSet::from_json_file(path)?
		}
		None => ProfileSet::default(),
	};

	let paraphraser = match &config.paraphrase_url {
		Some(url) => {
			info!("Paraphrase model at {url}");
			Some(ParaphraseClient::new(url.as_str(), config.paraphrase_timeout)?)
		}
		None => None,
	};

	let synonyms = Arc::new(SynonymRepository::new(resource, Arc::new(SynonymCache::new())));
	let orchestrator = RewriteOrchestrator::new(TransformationPipeline::new(synonyms), profiles);
	Ok(AppState { orchestrator, paraphraser })
}

/// Main entry point for the server.
///
/// Reads the configuration from the environment, loads the rewriting
/// core once and shares it between workers. The synonym cache lives as
/// long as the process.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env().map_err(io::Error::other)?;
	let state = web::Data::new(build_state(&config).map_err(io::Error::other)?);

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(state.clone())
			.service(get_health)
			.service(post_humanize)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn state() -> web::Data<AppState> {
		let thesaurus = Thesaurus::from_lines(&["n\tmodel,framework"], 1).unwrap();
		let synonyms = Arc::new(SynonymRepository::new(Arc::new(thesaurus), Arc::new(SynonymCache::new())));
		let mut profiles = ProfileSet::default();
		profiles.basic.set_all_probabilities(0.0).unwrap();
		let orchestrator = RewriteOrchestrator::new(TransformationPipeline::new(synonyms), profiles);
		web::Data::new(AppState { orchestrator, paraphraser: None })
	}

	#[actix_web::test]
	async fn health_reports_ok() {
		let app = test::init_service(App::new().service(get_health)).await;
		let body: serde_json::Value = test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request()).await;
		assert_eq!(body, json!({ "status": "ok" }));
	}

	#[actix_web::test]
	async fn humanize_returns_text_and_statistics() {
		let app = test::init_service(App::new().app_data(state()).service(post_humanize)).await;
		let request = test::TestRequest::post()
			.uri("/humanize")
			.set_json(json!({ "text": "The model works well." }))
			.to_request();
		let body: serde_json::Value = test::call_and_read_body_json(&app, request).await;
		assert_eq!(body["humanized_text"], "The model works well.");
		assert_eq!(body["statistics"]["mode"], "basic");
		assert_eq!(body["statistics"]["sentence_count"], 1);
	}

	#[actix_web::test]
	async fn empty_text_is_a_bad_request() {
		let app = test::init_service(App::new().app_data(state()).service(post_humanize)).await;
		let request = test::TestRequest::post().uri("/humanize").set_json(json!({ "text": "   " })).to_request();
		let response = test::call_service(&app, request).await;
		assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	}
}
