//! End-to-end tests for the intended composition: cache outside, retry
//! inside. A fresh invocation checks the cache first; only a miss falls
//! through to the retry loop and the underlying producer.

#![cfg(feature = "async")]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use breakwater::prelude::*;
use breakwater::testing::{CollectingSink, Flaky};
use tokio::time::sleep;

#[tokio::test]
async fn three_call_scenario_hits_inside_the_window_and_refreshes_after() {
    let producer = Flaky::new(0, "V");
    let probe = producer.clone();
    let cache_events = Arc::new(CollectingSink::new());

    let resilient = producer
        .retry(RetryPolicy::new(3, Duration::from_millis(20)))
        .cached_with_events(
            CachePolicy::new(Duration::from_millis(120)),
            cache_events.clone(),
        );

    // Call 1: empty slot, one underlying invocation.
    assert_eq!(resilient.call(&()).await.unwrap(), "V");
    assert_eq!(probe.calls(), 1);

    // Call 2, inside the window: zero underlying invocations.
    assert_eq!(resilient.call(&()).await.unwrap(), "V");
    assert_eq!(probe.calls(), 1);

    // Call 3, after expiry: exactly one new underlying invocation.
    sleep(Duration::from_millis(150)).await;
    assert_eq!(resilient.call(&()).await.unwrap(), "V");
    assert_eq!(probe.calls(), 2);

    assert_eq!(
        cache_events.events(),
        vec![Event::CacheMiss, Event::CacheHit, Event::CacheMiss]
    );
}

#[tokio::test]
async fn a_miss_pays_for_retries_and_the_recovery_is_cached() {
    let producer = Flaky::new(2, "recovered");
    let probe = producer.clone();
    let retry_events = Arc::new(CollectingSink::new());

    let resilient = producer
        .retry_with_events(
            RetryPolicy::new(3, Duration::from_millis(20)),
            retry_events.clone(),
        )
        .cached(CachePolicy::new(Duration::from_secs(5)));

    let start = Instant::now();
    let value = resilient.call(&()).await.unwrap();
    let elapsed = start.elapsed();

    // Attempts 1 and 2 failed, attempt 3 succeeded: 20ms + 40ms of backoff.
    assert_eq!(value, "recovered");
    assert_eq!(probe.calls(), 3);
    assert!(
        elapsed >= Duration::from_millis(55),
        "expected two backoffs, got {elapsed:?}"
    );
    assert_eq!(
        retry_events.events(),
        vec![
            Event::RetryAttempt {
                attempt: 1,
                delay: Duration::from_millis(20),
            },
            Event::RetryAttempt {
                attempt: 2,
                delay: Duration::from_millis(40),
            },
        ]
    );

    // The recovered value is in the slot now: no further attempts.
    assert_eq!(resilient.call(&()).await.unwrap(), "recovered");
    assert_eq!(probe.calls(), 3);
}

#[tokio::test]
async fn exhaustion_passes_through_the_cache_unchanged() {
    let producer = Flaky::new(u32::MAX, ());
    let probe = producer.clone();
    let cache_events = Arc::new(CollectingSink::new());

    let resilient = producer
        .retry(RetryPolicy::new(2, Duration::from_millis(1)))
        .cached_with_events(CachePolicy::new(Duration::from_secs(5)), cache_events.clone());

    let err = resilient.call(&()).await.unwrap_err();
    assert_eq!(err.attempts, 2);
    assert!(err.to_string().contains("2 attempts"));

    // The failure never populated the slot, so the next call misses again
    // and pays for a full retry sequence of its own.
    let err = resilient.call(&()).await.unwrap_err();
    assert_eq!(err.attempts, 2);
    assert_eq!(probe.calls(), 4);
    assert_eq!(
        cache_events.events(),
        vec![Event::CacheMiss, Event::CacheMiss]
    );
}

#[tokio::test]
async fn a_cache_hit_incurs_zero_retry_delay() {
    let producer = Flaky::new(0, 42);
    let probe = producer.clone();

    // A backoff this long would blow the assertion below if a hit ever
    // reached the retry layer.
    let resilient = producer
        .retry(RetryPolicy::new(3, Duration::from_secs(10)))
        .cached(CachePolicy::new(Duration::from_secs(5)));

    let start = Instant::now();
    assert_eq!(resilient.call(&()).await.unwrap(), 42);
    assert_eq!(resilient.call(&()).await.unwrap(), 42);

    assert_eq!(probe.calls(), 1);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn a_composed_stack_is_storable_once_boxed() {
    struct WeatherService {
        forecast: BoxedProducer<String, String, RetryExhausted<String>>,
    }

    let fetch = from_async(|city: &String| {
        let city = city.clone();
        async move { Ok::<_, String>(format!("sunny in {city}")) }
    });

    let service = WeatherService {
        forecast: fetch
            .retry(RetryPolicy::default())
            .cached(CachePolicy::default())
            .boxed(),
    };

    let city = "Porto".to_string();
    assert_eq!(
        service.forecast.call(&city).await.unwrap(),
        "sunny in Porto"
    );
}

#[tokio::test]
async fn a_synchronous_producer_runs_through_the_full_stack() {
    let calls = Arc::new(AtomicU32::new(0));
    let producer = from_fn({
        let calls = calls.clone();
        move |threshold: &u32| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < *threshold {
                Err(format!("not ready at call {n}"))
            } else {
                Ok(n)
            }
        }
    });

    let resilient = producer
        .retry(RetryPolicy::new(4, Duration::from_millis(1)))
        .cached(CachePolicy::new(Duration::from_secs(5)));

    // Fails twice, succeeds on the third attempt, all within one budget.
    assert_eq!(resilient.call(&2).await.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);

    // Served from the slot afterwards.
    assert_eq!(resilient.call(&2).await.unwrap(), 2);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn reversed_stacking_is_possible_but_retries_exhaustion_differently() {
    // The documented order is cache outside, retry inside. The wrappers are
    // orthogonal producers, so the reverse composes too - this pins that it
    // builds and that the cache then sits *inside* the attempt loop.
    let producer = Flaky::new(1, "eventually");
    let probe = producer.clone();

    let inverted = producer
        .cached(CachePolicy::new(Duration::from_secs(5)))
        .retry(RetryPolicy::new(3, Duration::from_millis(1)));

    assert_eq!(inverted.call(&()).await.unwrap(), "eventually");
    assert_eq!(probe.calls(), 2);
}
