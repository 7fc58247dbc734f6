pub mod find_place;
pub mod text_search;

mod error;

pub use error::{Error, Result};
pub use find_place::Candidate;
pub use text_search::{SearchHit, TextSearchPage, TextSearchRequest};

use std::{fmt, time::Duration};

use reqwest::{Client, Response};
use serde::{Deserialize, de::DeserializeOwned};

/// Opaque identifier the Places service assigns to a physical place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct PlaceId(String);
impl PlaceId {
	pub fn new(raw: impl Into<String>) -> Self {
		Self(raw.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl fmt::Display for PlaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Thin client over the Places JSON web service.
#[derive(Clone)]
pub struct PlacesClient {
	http: Client,
	api_base: String,
	api_key: String,
}
impl PlacesClient {
	pub fn new(cfg: &condo_config::Places) -> Result<Self> {
		let http = Client::builder()
			.timeout(Duration::from_millis(cfg.timeout_ms))
			.build()
			.map_err(Error::Client)?;

		Ok(Self { http, api_base: cfg.api_base.clone(), api_key: cfg.api_key.clone() })
	}

	/// Looks up `input` with the "find place from text" operation.
	pub async fn find_place(&self, input: &str) -> Result<Option<Candidate>> {
		let url = format!("{}/findplacefromtext/json", self.api_base);
		let res = self
			.http
			.get(url)
			.query(&[
				("input", input),
				("inputtype", "textquery"),
				("fields", find_place::FIELDS),
				("key", self.api_key.as_str()),
			])
			.send()
			.await
			.map_err(Error::Transport)?;

		find_place::parse_response(decode(res).await?)
	}

	/// Fetches one page of a text search, either a fresh query or a continuation.
	pub async fn text_search(&self, request: &TextSearchRequest) -> Result<TextSearchPage> {
		let url = format!("{}/textsearch/json", self.api_base);
		let mut params = request.query_params();

		params.push(("key", self.api_key.clone()));

		let res = self.http.get(url).query(&params).send().await.map_err(Error::Transport)?;

		text_search::parse_response(decode(res).await?)
	}
}
impl fmt::Debug for PlacesClient {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("PlacesClient").field("api_base", &self.api_base).finish_non_exhaustive()
	}
}

async fn decode<T>(res: Response) -> Result<T>
where
	T: DeserializeOwned,
{
	let status = res.status();

	if !status.is_success() {
		return Err(Error::Http { status: status.as_u16() });
	}

	let body = res.bytes().await.map_err(Error::Transport)?;

	Ok(serde_json::from_slice(&body)?)
}
