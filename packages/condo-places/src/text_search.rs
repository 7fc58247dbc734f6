use serde::Deserialize;

use crate::{Error, PlaceId, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TextSearchRequest {
	/// First page: the keyword is the whole query, biased to a circle.
	Query { query: String, latitude: f64, longitude: f64, radius_m: u32 },
	/// Follow-up page. The token carries the original query context.
	Continue { page_token: String },
}
impl TextSearchRequest {
	pub(crate) fn query_params(&self) -> Vec<(&'static str, String)> {
		match self {
			Self::Query { query, latitude, longitude, radius_m } => vec![
				("query", query.clone()),
				("location", format!("{latitude},{longitude}")),
				("radius", radius_m.to_string()),
			],
			Self::Continue { page_token } => vec![("pagetoken", page_token.clone())],
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
	pub place_id: Option<PlaceId>,
	pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextSearchPage {
	pub hits: Vec<SearchHit>,
	pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
	status: String,
	#[serde(default)]
	results: Vec<RawResult>,
	next_page_token: Option<String>,
	error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
	place_id: Option<PlaceId>,
	name: Option<String>,
}

pub(crate) fn parse_response(res: TextSearchResponse) -> Result<TextSearchPage> {
	match res.status.as_str() {
		"OK" | "ZERO_RESULTS" => {},
		_ => return Err(Error::Status { status: res.status, message: res.error_message }),
	}

	// A nameless result can never pass the keyword filter.
	let hits = res
		.results
		.into_iter()
		.filter_map(|raw| Some(SearchHit { place_id: raw.place_id, name: raw.name? }))
		.collect();
	let next_page_token = res.next_page_token.filter(|token| !token.is_empty());

	Ok(TextSearchPage { hits, next_page_token })
}
