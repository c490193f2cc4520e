use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

use rs_humanize_core::HumanizeError;

/// Errors raised by the HTTP service.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	#[error("Invalid value '{value}' for {name}")]
	InvalidSetting { name: &'static str, value: String },

	#[error("Paraphrase request failed: {0}")]
	Paraphrase(#[from] reqwest::Error),

	#[error(transparent)]
	Humanize(#[from] HumanizeError),
}

impl ResponseError for ServerError {
	fn status_code(&self) -> StatusCode {
		match self {
			ServerError::Humanize(HumanizeError::MalformedInput(_)) => StatusCode::BAD_REQUEST,
			_ => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
	}
}
