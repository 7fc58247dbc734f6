use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
	#[serde(default)]
	pub logging: Logging,
	#[serde(default)]
	pub places: Places,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub paths: Paths,
	#[serde(default)]
	pub report: Report,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Logging {
	/// An `EnvFilter` directive, e.g. "info" or "condo_service=debug,info".
	pub level: String,
}
impl Default for Logging {
	fn default() -> Self {
		Self { level: "info".to_string() }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Places {
	/// Overridden by `GOOGLE_PLACES_API_KEY` when that variable is set.
	pub api_key: String,
	pub api_base: String,
	pub timeout_ms: u64,
	/// Upper bound on HTTP attempts for a whole run. Unlimited when absent.
	pub max_calls: Option<u64>,
	pub retry: Retry,
}
impl Default for Places {
	fn default() -> Self {
		Self {
			api_key: String::new(),
			api_base: "https://maps.googleapis.com/maps/api/place".to_string(),
			timeout_ms: 10_000,
			max_calls: None,
			retry: Retry::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Retry {
	/// Attempts per call, including the first one. 1 disables retries.
	pub max_attempts: u32,
	pub base_backoff_ms: u64,
	pub max_backoff_ms: u64,
}
impl Default for Retry {
	fn default() -> Self {
		Self { max_attempts: 1, base_backoff_ms: 500, max_backoff_ms: 30_000 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	pub default_radius_m: u32,
	/// Used both as text-search queries and as the neighbor name filter.
	pub keywords: Vec<String>,
	/// Appended to every client name before the find-place lookup.
	pub locality: String,
	pub page_delay_ms: u64,
	pub max_pages_per_keyword: u32,
	pub reuse_resolutions: bool,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			default_radius_m: 500,
			keywords: ["condomínio", "residencial", "apartamento", "edifício", "conjunto", "complexo"]
				.into_iter()
				.map(str::to_string)
				.collect(),
			locality: "Aracaju, Sergipe".to_string(),
			page_delay_ms: 2_000,
			max_pages_per_keyword: 10,
			reuse_resolutions: false,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Paths {
	pub input_dir: PathBuf,
	pub output_dir: PathBuf,
	pub log_dir: PathBuf,
	pub input_column: String,
}
impl Default for Paths {
	fn default() -> Self {
		Self {
			input_dir: PathBuf::from("data/input"),
			output_dir: PathBuf::from("data/output"),
			log_dir: PathBuf::from("data/logs"),
			input_column: "Nome".to_string(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Report {
	pub client_label: String,
	pub not_found: String,
	pub neighbors_header: String,
	pub none_found: String,
	pub separator: String,
}
impl Default for Report {
	fn default() -> Self {
		Self {
			client_label: "Cliente".to_string(),
			not_found: "NÃO ENCONTRADO NO MAPS".to_string(),
			neighbors_header: "Condomínios próximos:".to_string(),
			none_found: "Nenhum encontrado nos critérios.".to_string(),
			separator: "---".to_string(),
		}
	}
}
