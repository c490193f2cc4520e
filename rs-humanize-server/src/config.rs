use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rs_humanize_core::io::resolve_path;

use crate::error::ServerError;

/// Service settings, read from `HUMANIZER_*` environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	pub thesaurus: PathBuf,
	pub profiles: Option<PathBuf>,
	pub paraphrase_url: Option<String>,
	pub paraphrase_timeout: Duration,
}

impl ServerConfig {
	pub fn from_env() -> Result<Self, ServerError> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	/// Builds the configuration from an arbitrary variable source.
	///
	/// Unset or blank variables take their default; set but unparsable
	/// ones are an error.
	pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Result<Self, ServerError> {
		let get = |name: &str| lookup(name).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

		Ok(Self {
			host: get("HUMANIZER_HOST").unwrap_or_else(|| "127.0.0.1".to_owned()),
			port: parse(get("HUMANIZER_PORT"), "HUMANIZER_PORT", 5000)?,
			thesaurus: resolve_path(&get("HUMANIZER_THESAURUS").unwrap_or_else(|| "./data/thesaurus.dat".to_owned())),
			profiles: get("HUMANIZER_PROFILES").map(|p| resolve_path(&p)),
			paraphrase_url: get("HUMANIZER_PARAPHRASE_URL"),
			paraphrase_timeout: Duration::from_secs(parse(
				get("HUMANIZER_PARAPHRASE_TIMEOUT_SECS"),
				"HUMANIZER_PARAPHRASE_TIMEOUT_SECS",
				30,
			)?),
		})
	}
}

fn parse<T: FromStr>(value: Option<String>, name: &'static str, default: T) -> Result<T, ServerError> {
	match value {
		None => Ok(default),
		Some(v) => v.parse().map_err(|_| ServerError::InvalidSetting { name, value: v }),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ServerError> {
		let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
		ServerConfig::from_lookup(|name| vars.get(name).cloned())
	}

	#[test]
	fn defaults_apply_when_unset() {
		let config = config(&[]).unwrap();
		assert_eq!(config.host, "127.0.0.1");
		assert_eq!(config.port, 5000);
		assert!(config.thesaurus.ends_with("data/thesaurus.dat"));
		assert_eq!(config.profiles, None);
		assert_eq!(config.paraphrase_url, None);
		assert_eq!(config.paraphrase_timeout, Duration::from_secs(30));
	}

	#[test]
	fn overrides_are_read() {
		let config = config(&[
			("HUMANIZER_HOST", "0.0.0.0"),
			("HUMANIZER_PORT", "8080"),
			("HUMANIZER_PARAPHRASE_URL", "http://localhost:9000/paraphrase"),
			("HUMANIZER_PARAPHRASE_TIMEOUT_SECS", " 5 "),
			("HUMANIZER_PROFILES", "  "),
		])
		.unwrap();
		assert_eq!(config.host, "0.0.0.0");
		assert_eq!(config.port, 8080);
		assert_eq!(config.paraphrase_url.as_deref(), Some("http://localhost:9000/paraphrase"));
		assert_eq!(config.paraphrase_timeout, Duration::from_secs(5));
		assert_eq!(config.profiles, None);
	}

	#[test]
	fn bad_port_is_rejected() {
		assert!(matches!(
			config(&[("HUMANIZER_PORT", "eighty")]),
			Err(ServerError::InvalidSetting { name: "HUMANIZER_PORT", .. })
		));
	}
}
