//! Extension trait providing the wrapping methods for all producers.
//!
//! `ProducerExt` is where composition happens. The intended stacking order
//! is cache outside, retry inside:
//!
//! ```text
//! caller -> Cached -> Retry -> base producer
//! ```
//!
//! so a fresh invocation checks cache freshness before any retry attempt is
//! made, and a cache hit costs zero underlying calls and zero backoff delay.
//! Read bottom-up, that is `base.retry(..).cached(..)`.

use crate::cache::{CachePolicy, Cached};
use crate::event::EventSink;
use crate::producer::boxed::BoxedProducer;
use crate::producer::trait_def::Producer;
#[cfg(feature = "async")]
use crate::retry::{Retry, RetryPolicy};

/// Wrapping methods, automatically implemented for every [`Producer`].
///
/// # Example
///
/// ```rust
/// use breakwater::prelude::*;
/// use std::time::Duration;
///
/// # #[cfg(feature = "async")]
/// # tokio_test::block_on(async {
/// let fetch = from_fn(|n: &u32| Ok::<_, String>(n + 1));
///
/// let resilient = fetch
///     .retry(RetryPolicy::new(3, Duration::from_millis(300)))
///     .cached(CachePolicy::new(Duration::from_secs(5)));
///
/// assert_eq!(resilient.call(&41).await.unwrap(), 42);
/// # });
/// ```
pub trait ProducerExt: Producer {
    /// Wrap this producer with bounded, exponentially backed-off retries.
    ///
    /// The wrapped producer makes up to `policy.max_attempts()` sequential
    /// attempts per invocation and fails with
    /// [`RetryExhausted`](crate::retry::RetryExhausted) once the budget is
    /// spent.
    #[cfg(feature = "async")]
    fn retry(self, policy: RetryPolicy) -> Retry<Self>
    where
        Self: Sized,
    {
        Retry::new(self, policy)
    }

    /// Like [`retry`](ProducerExt::retry), with an [`EventSink`] receiving a
    /// [`RetryAttempt`](crate::event::Event::RetryAttempt) before each backoff
    /// sleep.
    #[cfg(feature = "async")]
    fn retry_with_events<S>(self, policy: RetryPolicy, sink: S) -> Retry<Self, S>
    where
        Self: Sized,
        S: EventSink,
    {
        Retry::with_events(self, policy, sink)
    }

    /// Wrap this producer with a single-slot, time-windowed cache.
    ///
    /// While the most recent successful result is younger than
    /// `policy.ttl()`, invocations return it without calling the underlying
    /// producer. The slot is not keyed by arguments; see
    /// [`Cached`](crate::cache::Cached) for the implications.
    fn cached(self, policy: CachePolicy) -> Cached<Self>
    where
        Self: Sized,
        Self::Output: Clone,
    {
        Cached::new(self, policy)
    }

    /// Like [`cached`](ProducerExt::cached), with an [`EventSink`] receiving
    /// [`CacheHit`](crate::event::Event::CacheHit) /
    /// [`CacheMiss`](crate::event::Event::CacheMiss) on every invocation.
    fn cached_with_events<S>(self, policy: CachePolicy, sink: S) -> Cached<Self, S>
    where
        Self: Sized,
        Self::Output: Clone,
        S: EventSink,
    {
        Cached::with_events(self, policy, sink)
    }

    /// Erase this producer's concrete type.
    ///
    /// Use when the fully composed stack needs to live in a struct field or a
    /// collection. See [`BoxedProducer`].
    fn boxed(self) -> BoxedProducer<Self::Args, Self::Output, Self::Error>
    where
        Self: Sized + 'static,
        Self::Args: 'static,
        Self::Output: 'static,
        Self::Error: 'static,
    {
        BoxedProducer::new(self)
    }
}

impl<P: Producer> ProducerExt for P {}
