pub mod delay;
pub mod guard;
pub mod pipeline;
pub mod portfolio;
pub mod report;
pub mod resolver;
pub mod searcher;

use std::{future::Future, pin::Pin, sync::Arc, time::Duration};

use condo_config::Config;
use condo_places::{Candidate, PlacesClient, TextSearchPage, TextSearchRequest};

pub use condo_places::{PlaceId, SearchHit};
pub use delay::{NoDelay, PageDelay, TokioDelay};
pub use guard::{CallBudget, GuardedLookup, RetryPolicy};
pub use pipeline::select_neighbors;
pub use portfolio::PortfolioIdSet;
pub use report::{Outcome, Report, ReportDisplay, ReportEntry, RunStats};
pub use resolver::{Miss, PlaceResolver, Resolution, ResolvedPlace};
pub use searcher::NeighborSearcher;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// The two Places operations the pipeline depends on.
pub trait PlaceLookup
where
	Self: Send + Sync,
{
	fn find_place<'a>(
		&'a self,
		input: &'a str,
	) -> BoxFuture<'a, condo_places::Result<Option<Candidate>>>;

	fn text_search<'a>(
		&'a self,
		request: &'a TextSearchRequest,
	) -> BoxFuture<'a, condo_places::Result<TextSearchPage>>;
}

impl PlaceLookup for PlacesClient {
	fn find_place<'a>(
		&'a self,
		input: &'a str,
	) -> BoxFuture<'a, condo_places::Result<Option<Candidate>>> {
		Box::pin(PlacesClient::find_place(self, input))
	}

	fn text_search<'a>(
		&'a self,
		request: &'a TextSearchRequest,
	) -> BoxFuture<'a, condo_places::Result<TextSearchPage>> {
		Box::pin(PlacesClient::text_search(self, request))
	}
}

pub struct RadarService {
	pub resolver: PlaceResolver,
	pub searcher: NeighborSearcher,
	/// Lowercase; doubles as search queries and the neighbor name filter.
	pub keywords: Vec<String>,
	budget: Arc<CallBudget>,
}
impl RadarService {
	pub fn new(cfg: &Config) -> condo_places::Result<Self> {
		let client = PlacesClient::new(&cfg.places)?;

		Ok(Self::with_lookup(cfg, Arc::new(client), Arc::new(TokioDelay)))
	}

	/// Wires the service over any lookup. Retry and budget guards from `cfg` still apply.
	pub fn with_lookup(
		cfg: &Config,
		lookup: Arc<dyn PlaceLookup>,
		delay: Arc<dyn PageDelay>,
	) -> Self {
		let budget = Arc::new(CallBudget::new(cfg.places.max_calls));
		let guarded: Arc<dyn PlaceLookup> = Arc::new(GuardedLookup::new(
			lookup,
			RetryPolicy::from(&cfg.places.retry),
			budget.clone(),
			delay.clone(),
		));
		let resolver = PlaceResolver::new(
			guarded.clone(),
			cfg.search.locality.clone(),
			cfg.search.reuse_resolutions,
		);
		let searcher = NeighborSearcher::new(
			guarded,
			delay,
			Duration::from_millis(cfg.search.page_delay_ms),
			cfg.search.max_pages_per_keyword,
		);
		let keywords = cfg.search.keywords.iter().map(|keyword| keyword.to_lowercase()).collect();

		Self { resolver, searcher, keywords, budget }
	}

	/// HTTP attempts made so far, including rejected over-budget ones.
	pub fn calls_made(&self) -> u64 {
		self.budget.used()
	}
}

pub(crate) fn is_blank(name: &str) -> bool {
	name.trim().is_empty()
}
