use std::{
	sync::{Arc, atomic::Ordering},
	time::Duration,
};

use condo_service::{Miss, Resolution};

use super::{FakePlaces, RecordingDelay, service, test_config};

#[tokio::test]
async fn throttled_lookup_is_retried_with_backoff() {
	let fake = Arc::new(FakePlaces::default().with_place("Cliente", "c", 0.0, 0.0));

	fake.throttled_finds.store(2, Ordering::SeqCst);

	let delay = Arc::new(RecordingDelay::default());
	let mut cfg = test_config(&["residencial"]);

	cfg.places.retry.max_attempts = 3;
	cfg.places.retry.base_backoff_ms = 100;
	cfg.places.retry.max_backoff_ms = 1_000;

	let radar = service(&cfg, fake.clone(), delay.clone());
	let resolution = radar.resolver.resolve("Cliente").await;

	assert!(matches!(resolution, Resolution::Found(_)));
	assert_eq!(fake.find_count(), 3);
	assert_eq!(delay.recorded(), vec![Duration::from_millis(100), Duration::from_millis(200)]);
}

#[tokio::test]
async fn default_policy_does_not_retry() {
	let fake = Arc::new(FakePlaces::default().with_place("Cliente", "c", 0.0, 0.0));

	fake.throttled_finds.store(1, Ordering::SeqCst);

	let delay = Arc::new(RecordingDelay::default());
	let cfg = test_config(&["residencial"]);
	let radar = service(&cfg, fake.clone(), delay.clone());

	assert_eq!(radar.resolver.resolve("Cliente").await, Resolution::NotFound(Miss::Upstream));
	assert_eq!(fake.find_count(), 1);
	assert!(delay.recorded().is_empty());

	// The next call is not affected by the earlier failure.
	assert!(matches!(radar.resolver.resolve("Cliente").await, Resolution::Found(_)));
}

#[tokio::test]
async fn retries_give_up_after_max_attempts() {
	let fake = Arc::new(FakePlaces::default().with_place("Cliente", "c", 0.0, 0.0));

	fake.throttled_finds.store(10, Ordering::SeqCst);

	let mut cfg = test_config(&["residencial"]);

	cfg.places.retry.max_attempts = 2;

	let radar = service(&cfg, fake.clone(), Arc::new(RecordingDelay::default()));

	assert_eq!(radar.resolver.resolve("Cliente").await, Resolution::NotFound(Miss::Upstream));
	assert_eq!(fake.find_count(), 2);
}
