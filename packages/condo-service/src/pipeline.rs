use std::collections::BTreeSet;

use tracing::Instrument;

use condo_places::SearchHit;

use crate::{Outcome, PortfolioIdSet, RadarService, Report, ReportEntry, Resolution};

/// Drops portfolio members, keeps names containing a keyword, dedupes by name.
///
/// `keywords` must already be lowercase.
pub fn select_neighbors(
	hits: Vec<SearchHit>,
	portfolio: &PortfolioIdSet,
	keywords: &[String],
) -> BTreeSet<String> {
	hits.into_iter()
		.filter(|hit| !hit.place_id.as_ref().is_some_and(|id| portfolio.contains(id)))
		.filter(|hit| {
			let name = hit.name.to_lowercase();

			keywords.iter().any(|keyword| name.contains(keyword.as_str()))
		})
		.map(|hit| hit.name)
		.collect()
}

impl RadarService {
	/// Main pass. `portfolio` must be complete before this starts.
	pub async fn run_report(
		&self,
		names: &[String],
		radius_m: u32,
		portfolio: &PortfolioIdSet,
	) -> Report {
		let mut report = Report::default();

		for name in names.iter().filter(|name| !crate::is_blank(name)) {
			let client = name.trim();
			let span = tracing::info_span!("client", name = client);
			let outcome = self.process_client(client, radius_m, portfolio).instrument(span).await;

			report.entries.push(ReportEntry { client: client.to_string(), outcome });
		}

		let stats = report.stats();

		tracing::info!(
			processed = stats.processed,
			not_found = stats.not_found,
			with_neighbors = stats.with_neighbors,
			"Report pass finished."
		);

		report
	}

	async fn process_client(
		&self,
		client: &str,
		radius_m: u32,
		portfolio: &PortfolioIdSet,
	) -> Outcome {
		let place = match self.resolver.resolve(client).await {
			Resolution::Found(place) => place,
			Resolution::NotFound(_) => return Outcome::NotFound,
		};
		let hits = self
			.searcher
			.search(place.latitude, place.longitude, radius_m, &self.keywords)
			.await;
		let neighbors = select_neighbors(hits, portfolio, &self.keywords);

		if neighbors.is_empty() {
			tracing::info!("No neighbors matched the filters.");
		} else {
			tracing::info!(neighbors = neighbors.len(), "Neighbors selected.");
		}

		Outcome::Neighbors(neighbors)
	}
}
