use std::time::Duration;

use crate::BoxFuture;

/// Suspension used between result pages and before retries.
pub trait PageDelay
where
	Self: Send + Sync,
{
	fn wait(&self, duration: Duration) -> BoxFuture<'_, ()>;
}

/// Sleeps on the tokio timer.
pub struct TokioDelay;
impl PageDelay for TokioDelay {
	fn wait(&self, duration: Duration) -> BoxFuture<'_, ()> {
		Box::pin(tokio::time::sleep(duration))
	}
}

/// Returns immediately.
pub struct NoDelay;
impl PageDelay for NoDelay {
	fn wait(&self, _duration: Duration) -> BoxFuture<'_, ()> {
		Box::pin(async {})
	}
}
