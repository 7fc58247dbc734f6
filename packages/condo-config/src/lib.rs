mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Logging, Paths, Places, Report, Retry, Search};

use std::{env, fs, path::Path};

pub const API_KEY_ENV: &str = "GOOGLE_PLACES_API_KEY";

const PLACEHOLDER_API_KEYS: [&str; 2] = ["SUA_CHAVE_API_AQUI", "YOUR_API_KEY_HERE"];
/// Largest search radius the text search accepts.
pub const MAX_RADIUS_M: u32 = 50_000;

pub fn load(path: &Path) -> Result<Config> {
	load_with_api_key(path, env::var(API_KEY_ENV).ok())
}

/// Same as [`load`], with the environment lookup for the API key made explicit.
pub fn load_with_api_key(path: &Path, api_key_override: Option<String>) -> Result<Config> {
	let cfg = read_with_api_key(path, api_key_override)?;

	validate(&cfg)?;

	Ok(cfg)
}

/// Parses and normalizes without validating, so callers can set up logging first.
pub fn read(path: &Path) -> Result<Config> {
	read_with_api_key(path, env::var(API_KEY_ENV).ok())
}

pub fn read_with_api_key(path: &Path, api_key_override: Option<String>) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	if let Some(key) = api_key_override
		&& !key.trim().is_empty()
	{
		cfg.places.api_key = key;
	}

	normalize(&mut cfg);

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	let key = cfg.places.api_key.as_str();

	if key.is_empty() || PLACEHOLDER_API_KEYS.contains(&key) {
		return Err(Error::MissingApiKey { env: API_KEY_ENV });
	}
	if cfg.places.api_base.is_empty() {
		return Err(Error::Validation { message: "places.api_base must be non-empty.".to_string() });
	}
	if cfg.places.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "places.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if cfg.places.max_calls == Some(0) {
		return Err(Error::Validation {
			message: "places.max_calls must be greater than zero when set.".to_string(),
		});
	}
	if cfg.places.retry.max_attempts == 0 {
		return Err(Error::Validation {
			message: "places.retry.max_attempts must be at least 1.".to_string(),
		});
	}
	if cfg.places.retry.base_backoff_ms > cfg.places.retry.max_backoff_ms {
		return Err(Error::Validation {
			message: "places.retry.base_backoff_ms must not exceed places.retry.max_backoff_ms."
				.to_string(),
		});
	}
	if cfg.search.default_radius_m == 0 || cfg.search.default_radius_m > MAX_RADIUS_M {
		return Err(Error::Validation {
			message: format!("search.default_radius_m must be in the range 1-{MAX_RADIUS_M}."),
		});
	}
	if cfg.search.keywords.is_empty() {
		return Err(Error::Validation {
			message: "search.keywords must contain at least one non-blank keyword.".to_string(),
		});
	}
	if cfg.search.max_pages_per_keyword == 0 {
		return Err(Error::Validation {
			message: "search.max_pages_per_keyword must be greater than zero.".to_string(),
		});
	}
	if cfg.paths.input_column.is_empty() {
		return Err(Error::Validation {
			message: "paths.input_column must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.places.api_key = cfg.places.api_key.trim().to_string();
	cfg.places.api_base = cfg.places.api_base.trim().trim_end_matches('/').to_string();
	cfg.search.locality = cfg.search.locality.trim().to_string();
	cfg.paths.input_column = cfg.paths.input_column.trim().to_string();

	let mut keywords: Vec<String> = Vec::with_capacity(cfg.search.keywords.len());

	for keyword in &cfg.search.keywords {
		let keyword = keyword.trim().to_lowercase();

		if !keyword.is_empty() && !keywords.contains(&keyword) {
			keywords.push(keyword);
		}
	}

	cfg.search.keywords = keywords;
}
