use std::{
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
	time::Duration,
};

use condo_places::{Candidate, Error, Result, TextSearchPage, TextSearchRequest};

use crate::{BoxFuture, PageDelay, PlaceLookup};

const MAX_BACKOFF_EXPONENT: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
	pub max_attempts: u32,
	pub base_backoff: Duration,
	pub max_backoff: Duration,
}
impl RetryPolicy {
	/// Delay before attempt `attempt + 1`, doubling from the base and capped.
	pub fn backoff(&self, attempt: u32) -> Duration {
		let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);

		self.base_backoff.saturating_mul(1 << exponent).min(self.max_backoff)
	}
}
impl From<&condo_config::Retry> for RetryPolicy {
	fn from(cfg: &condo_config::Retry) -> Self {
		Self {
			max_attempts: cfg.max_attempts.max(1),
			base_backoff: Duration::from_millis(cfg.base_backoff_ms),
			max_backoff: Duration::from_millis(cfg.max_backoff_ms),
		}
	}
}

/// Run-wide cap on HTTP attempts.
#[derive(Debug, Default)]
pub struct CallBudget {
	limit: Option<u64>,
	used: AtomicU64,
}
impl CallBudget {
	pub fn new(limit: Option<u64>) -> Self {
		Self { limit, used: AtomicU64::new(0) }
	}

	pub fn take(&self) -> Result<()> {
		let used = self.used.fetch_add(1, Ordering::SeqCst);

		match self.limit {
			Some(limit) if used >= limit => Err(Error::BudgetExhausted { limit }),
			_ => Ok(()),
		}
	}

	pub fn used(&self) -> u64 {
		self.used.load(Ordering::SeqCst)
	}
}

/// Applies the call budget and retries throttled calls with exponential backoff.
pub struct GuardedLookup {
	inner: Arc<dyn PlaceLookup>,
	retry: RetryPolicy,
	budget: Arc<CallBudget>,
	delay: Arc<dyn PageDelay>,
}
impl GuardedLookup {
	pub fn new(
		inner: Arc<dyn PlaceLookup>,
		retry: RetryPolicy,
		budget: Arc<CallBudget>,
		delay: Arc<dyn PageDelay>,
	) -> Self {
		Self { inner, retry, budget, delay }
	}

	async fn guarded<'a, T>(
		&'a self,
		operation: &'static str,
		call: impl Fn() -> BoxFuture<'a, Result<T>>,
	) -> Result<T> {
		let mut attempt = 1;

		loop {
			self.budget.take()?;

			match call().await {
				Err(err) if err.is_throttled() && attempt < self.retry.max_attempts => {
					let backoff = self.retry.backoff(attempt);

					tracing::warn!(
						operation,
						attempt,
						backoff_ms = backoff.as_millis() as u64,
						error = %err,
						"Places call throttled; retrying."
					);

					self.delay.wait(backoff).await;

					attempt += 1;
				},
				result => return result,
			}
		}
	}
}
impl PlaceLookup for GuardedLookup {
	fn find_place<'a>(&'a self, input: &'a str) -> BoxFuture<'a, Result<Option<Candidate>>> {
		Box::pin(self.guarded("find_place", move || self.inner.find_place(input)))
	}

	fn text_search<'a>(
		&'a self,
		request: &'a TextSearchRequest,
	) -> BoxFuture<'a, Result<TextSearchPage>> {
		Box::pin(self.guarded("text_search", move || self.inner.text_search(request)))
	}
}
