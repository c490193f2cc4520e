use std::time::Duration;

use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use rs_humanize_core::RewriteMode;

use crate::error::ServerError;

#[derive(Serialize)]
struct ParaphraseRequest<'a> {
	text: &'a str,
	enhanced: bool,
}

#[derive(Deserialize)]
struct ParaphraseResponse {
	text: String,
}

/// HTTP client for the external paraphrase model.
///
/// The model is reached with `POST <url>` and a `{ "text", "enhanced" }`
/// body; it answers with `{ "text" }`.
pub struct ParaphraseClient {
	client: Client,
	url: String,
}

impl ParaphraseClient {
	pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServerError> {
		let client = Client::builder().timeout(timeout).build()?;
		Ok(Self { client, url: url.into() })
	}

	/// Sends `text` to the paraphrase model.
	pub async fn paraphrase(&self, text: &str, mode: RewriteMode) -> Result<String, ServerError> {
		let response = self
			.client
			.post(&self.url)
			.json(&ParaphraseRequest { text, enhanced: mode.is_enhanced() })
			.send()
			.await?
			.error_for_status()?;

		Ok(response.json::<ParaphraseResponse>().await?.text)
	}

	/// Paraphrased text, or `None` when the model fails or times out.
	pub async fn paraphrase_or_skip(&self, text: &str, mode: RewriteMode) -> Option<String> {
		match self.paraphrase(text, mode).await {
			Ok(paraphrased) => {
				debug!("Paraphrase model returned {} characters", paraphrased.chars().count());
				Some(paraphrased)
			}
			Err(e) => {
				warn!("{e}; rewriting the original text instead");
				None
			}
		}
	}
}
