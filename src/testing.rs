//! Testing utilities for code built on breakwater.
//!
//! Wrapper behavior is about *how often* and *when* the underlying producer
//! runs, so tests keep reaching for the same two instruments: a producer
//! whose failures are scripted and whose invocations are counted, and a sink
//! that records what the wrappers emit. Both live here rather than being
//! re-derived in every test module.
//!
//! # Example
//!
//! ```rust
//! use breakwater::prelude::*;
//! use breakwater::testing::{CollectingSink, Flaky};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let producer = Flaky::new(1, "recovered");
//! let probe = producer.clone(); // clones share the call counter
//! let sink = Arc::new(CollectingSink::new());
//!
//! let wrapped = producer.retry_with_events(
//!     RetryPolicy::new(3, Duration::ZERO),
//!     sink.clone(),
//! );
//!
//! assert_eq!(wrapped.call(&()).await.unwrap(), "recovered");
//! assert_eq!(probe.calls(), 2);
//! assert_eq!(sink.events().len(), 1);
//! # });
//! ```

use std::future::{ready, Future};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::event::{Event, EventSink};
use crate::producer::Producer;

/// A producer that fails its first `fail_first` invocations, then succeeds
/// with a fixed value - and counts every invocation.
///
/// Failures carry the message `transient failure N` (N is the 1-indexed
/// invocation). Use `u32::MAX` for a producer that never succeeds. Clones
/// share the call counter, so keep a clone aside when the original is
/// consumed by a wrapper.
#[derive(Debug, Clone)]
pub struct Flaky<T> {
    fail_first: u32,
    value: T,
    calls: Arc<AtomicU32>,
}

impl<T> Flaky<T> {
    /// A producer failing its first `fail_first` calls before yielding
    /// `value`.
    pub fn new(fail_first: u32, value: T) -> Self {
        Self {
            fail_first,
            value,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    /// How many times this producer (counting all clones) has been invoked.
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl<T> Producer for Flaky<T>
where
    T: Clone + Send + Sync,
{
    type Args = ();
    type Output = T;
    type Error = String;

    fn call(&self, _args: &()) -> impl Future<Output = Result<T, String>> + Send {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        ready(if n < self.fail_first {
            Err(format!("transient failure {}", n + 1))
        } else {
            Ok(self.value.clone())
        })
    }
}

/// An [`EventSink`] that records every event it receives.
///
/// Share it with a wrapper through an `Arc` and assert on
/// [`events`](CollectingSink::events) afterwards.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Event>>,
}

impl CollectingSink {
    /// An empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far, in emission order.
    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventSink for CollectingSink {
    fn notify(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn flaky_follows_its_script() {
        let producer = Flaky::new(2, "done");

        assert_eq!(
            producer.call(&()).await,
            Err("transient failure 1".to_string())
        );
        assert_eq!(
            producer.call(&()).await,
            Err("transient failure 2".to_string())
        );
        assert_eq!(producer.call(&()).await, Ok("done"));
        assert_eq!(producer.calls(), 3);
    }

    #[tokio::test]
    async fn flaky_clones_share_the_counter() {
        let producer = Flaky::new(0, 1u8);
        let probe = producer.clone();

        let _ = producer.call(&()).await;
        let _ = probe.call(&()).await;

        assert_eq!(producer.calls(), 2);
        assert_eq!(probe.calls(), 2);
    }

    #[test]
    fn collecting_sink_keeps_emission_order() {
        let sink = CollectingSink::new();

        sink.notify(Event::CacheMiss);
        sink.notify(Event::CacheHit);

        assert_eq!(sink.events(), vec![Event::CacheMiss, Event::CacheHit]);
    }
}
