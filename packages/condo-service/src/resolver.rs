use std::{
	collections::HashMap,
	sync::{Arc, Mutex},
};

use condo_places::{Candidate, Error, PlaceId};

use crate::PlaceLookup;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPlace {
	pub latitude: f64,
	pub longitude: f64,
	pub display_name: String,
	pub place_id: PlaceId,
}
impl From<Candidate> for ResolvedPlace {
	fn from(candidate: Candidate) -> Self {
		Self {
			latitude: candidate.latitude,
			longitude: candidate.longitude,
			display_name: candidate.name,
			place_id: candidate.place_id,
		}
	}
}

/// Why a name did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Miss {
	NoMatch,
	Transport,
	Upstream,
	Malformed,
	BudgetExhausted,
}
impl From<&Error> for Miss {
	fn from(err: &Error) -> Self {
		match err {
			Error::Transport(_) => Self::Transport,
			Error::Http { .. } | Error::Status { .. } | Error::Client(_) => Self::Upstream,
			Error::Decode(_) | Error::MissingField { .. } => Self::Malformed,
			Error::BudgetExhausted { .. } => Self::BudgetExhausted,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
	Found(ResolvedPlace),
	NotFound(Miss),
}
impl Resolution {
	pub fn place(&self) -> Option<&ResolvedPlace> {
		match self {
			Self::Found(place) => Some(place),
			Self::NotFound(_) => None,
		}
	}
}

/// Resolves free-text client names to a single place, first candidate wins.
pub struct PlaceResolver {
	lookup: Arc<dyn PlaceLookup>,
	locality: String,
	cache: Option<Mutex<HashMap<String, ResolvedPlace>>>,
}
impl PlaceResolver {
	pub fn new(lookup: Arc<dyn PlaceLookup>, locality: String, reuse_resolutions: bool) -> Self {
		let cache = reuse_resolutions.then(|| Mutex::new(HashMap::new()));

		Self { lookup, locality, cache }
	}

	pub fn query_text(&self, name: &str) -> String {
		let name = name.trim();

		if self.locality.is_empty() { name.to_string() } else { format!("{name}, {}", self.locality) }
	}

	/// Never fails: every lookup error is logged and reported as [`Resolution::NotFound`].
	pub async fn resolve(&self, name: &str) -> Resolution {
		let key = name.trim();

		if let Some(place) = self.cached(key) {
			tracing::debug!(name = key, place_id = %place.place_id, "Reusing earlier resolution.");

			return Resolution::Found(place);
		}

		let query = self.query_text(name);

		tracing::info!(name = key, query = %query, "Resolving client.");

		match self.lookup.find_place(&query).await {
			Ok(Some(candidate)) => {
				let place = ResolvedPlace::from(candidate);

				tracing::info!(
					name = key,
					found = %place.display_name,
					place_id = %place.place_id,
					"Client resolved."
				);

				if let Some(cache) = &self.cache {
					cache
						.lock()
						.unwrap_or_else(|err| err.into_inner())
						.insert(key.to_string(), place.clone());
				}

				Resolution::Found(place)
			},
			Ok(None) => {
				tracing::warn!(name = key, query = %query, "No place matches the client name.");

				Resolution::NotFound(Miss::NoMatch)
			},
			Err(err) => {
				let miss = Miss::from(&err);

				match miss {
					Miss::Transport => {
						tracing::error!(name = key, error = %err, "Find place connection failed.")
					},
					Miss::Malformed => tracing::error!(
						name = key,
						error = %err,
						"Find place response had an unexpected shape."
					),
					_ => tracing::error!(name = key, error = %err, "Find place request failed."),
				}

				Resolution::NotFound(miss)
			},
		}
	}

	fn cached(&self, key: &str) -> Option<ResolvedPlace> {
		let cache = self.cache.as_ref()?;

		cache.lock().unwrap_or_else(|err| err.into_inner()).get(key).cloned()
	}
}
