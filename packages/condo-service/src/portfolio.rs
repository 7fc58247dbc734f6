use std::collections::HashSet;

use condo_places::PlaceId;

use crate::{RadarService, Resolution};

/// Place ids of every client in the batch. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioIdSet {
	ids: HashSet<PlaceId>,
}
impl PortfolioIdSet {
	pub fn contains(&self, place_id: &PlaceId) -> bool {
		self.ids.contains(place_id)
	}

	pub fn len(&self) -> usize {
		self.ids.len()
	}

	pub fn is_empty(&self) -> bool {
		self.ids.is_empty()
	}
}
impl FromIterator<PlaceId> for PortfolioIdSet {
	fn from_iter<I: IntoIterator<Item = PlaceId>>(iter: I) -> Self {
		Self { ids: iter.into_iter().collect() }
	}
}

impl RadarService {
	/// Resolves every non-blank name once and collects the ids that resolved.
	pub async fn build_portfolio(&self, names: &[String]) -> PortfolioIdSet {
		let mut ids = HashSet::new();

		for name in names.iter().filter(|name| !crate::is_blank(name)) {
			match self.resolver.resolve(name).await {
				Resolution::Found(place) => {
					ids.insert(place.place_id);
				},
				Resolution::NotFound(miss) => tracing::warn!(
					name = name.trim(),
					?miss,
					"Client not resolved; it is still processed but never excluded."
				),
			}
		}

		tracing::info!(unique_ids = ids.len(), "Portfolio index built.");

		PortfolioIdSet { ids }
	}
}
