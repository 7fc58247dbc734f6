use std::{sync::Arc, time::Duration};

use condo_places::{SearchHit, TextSearchRequest};

use crate::{PageDelay, PlaceLookup};

/// Runs one paginated text search per keyword around a point.
pub struct NeighborSearcher {
	lookup: Arc<dyn PlaceLookup>,
	delay: Arc<dyn PageDelay>,
	page_delay: Duration,
	max_pages: u32,
}
impl NeighborSearcher {
	pub fn new(
		lookup: Arc<dyn PlaceLookup>,
		delay: Arc<dyn PageDelay>,
		page_delay: Duration,
		max_pages: u32,
	) -> Self {
		Self { lookup, delay, page_delay, max_pages: max_pages.max(1) }
	}

	/// Raw hits of every keyword, concatenated in keyword order and not deduplicated.
	pub async fn search(
		&self,
		latitude: f64,
		longitude: f64,
		radius_m: u32,
		keywords: &[String],
	) -> Vec<SearchHit> {
		let mut hits = Vec::new();

		for keyword in keywords {
			let request = TextSearchRequest::Query {
				query: keyword.clone(),
				latitude,
				longitude,
				radius_m,
			};

			hits.extend(self.search_keyword(keyword, request).await);
		}

		tracing::info!(raw_hits = hits.len(), "Text search finished.");

		hits
	}

	async fn search_keyword(&self, keyword: &str, first: TextSearchRequest) -> Vec<SearchHit> {
		let mut hits = Vec::new();
		let mut request = first;
		let mut page = 1;

		tracing::info!(keyword, "Searching keyword.");

		loop {
			let result = match self.lookup.text_search(&request).await {
				Ok(result) => result,
				Err(err) if err.is_transport() => {
					tracing::error!(keyword, page, error = %err, "Text search connection failed.");

					break;
				},
				Err(err) => {
					tracing::error!(keyword, page, error = %err, "Text search page failed.");

					break;
				},
			};

			hits.extend(result.hits);

			let Some(page_token) = result.next_page_token else {
				break;
			};

			if page >= self.max_pages {
				tracing::warn!(keyword, pages = page, "Page limit reached; dropping the rest.");

				break;
			}

			tracing::debug!(keyword, page, "More pages available.");

			// Tokens are rejected until the service activates them.
			self.delay.wait(self.page_delay).await;

			request = TextSearchRequest::Continue { page_token };
			page += 1;
		}

		hits
	}
}
