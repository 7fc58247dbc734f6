use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {path:?}.")]
	ReadConfig { path: PathBuf, source: std::io::Error },
	#[error("Failed to parse config file at {path:?}.")]
	ParseConfig { path: PathBuf, source: toml::de::Error },
	#[error(
		"Places API key is not configured. Set places.api_key or the {env} environment variable."
	)]
	MissingApiKey { env: &'static str },
	#[error("{message}")]
	Validation { message: String },
}
