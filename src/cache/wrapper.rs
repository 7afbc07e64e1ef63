//! The cache wrapper.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::cache::CachePolicy;
use crate::event::{Event, EventSink, NoopSink};
use crate::producer::Producer;

/// The occupied state of the slot: a value and the instant it was captured.
struct CacheEntry<T> {
    value: T,
    stored_at: Instant,
}

/// A producer wrapped with a single-slot, time-windowed cache.
///
/// The wrapper remembers the most recent successful result and the instant
/// it was captured. While that entry is younger than the policy's TTL,
/// invocations return a clone of it without calling the underlying producer.
/// Once it is stale (or on the first call, when the slot is empty), the
/// underlying producer runs; a success overwrites the slot, a failure
/// propagates unchanged and leaves the slot exactly as it was.
///
/// # The slot is not keyed by arguments
///
/// There is exactly one slot per wrapper instance. This is intended for
/// no-argument or argument-invariant producers: invoking the same wrapper
/// with *different* arguments inside one freshness window will serve a value
/// computed from the earlier arguments. Build one wrapper per distinct
/// argument value if that matters.
///
/// # Concurrency
///
/// The slot sits behind a mutex, so the freshness check and the overwrite
/// are each atomic on multi-threaded runtimes. The lock is *not* held while
/// the underlying producer runs: two tasks that both find the slot stale
/// will both invoke the producer, last write wins. Collapsing such
/// concurrent misses into one in-flight call (single-flight) is deliberately
/// not provided.
///
/// Construct through
/// [`ProducerExt::cached`](crate::producer::ProducerExt::cached) or
/// [`Cached::new`].
///
/// # Examples
///
/// ```rust
/// use breakwater::prelude::*;
/// use breakwater::testing::Flaky;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// let producer = Flaky::new(0, "fresh");
/// let probe = producer.clone();
/// let cached = producer.cached(CachePolicy::new(Duration::from_secs(5)));
///
/// assert_eq!(cached.call(&()).await.unwrap(), "fresh");
/// assert_eq!(cached.call(&()).await.unwrap(), "fresh");
/// // The second call was served from the slot.
/// assert_eq!(probe.calls(), 1);
/// # });
/// ```
pub struct Cached<P: Producer, S = NoopSink> {
    inner: P,
    policy: CachePolicy,
    slot: Mutex<Option<CacheEntry<P::Output>>>,
    sink: S,
}

impl<P: Producer> Cached<P> {
    /// Wrap `inner` with the given policy and no event sink.
    pub fn new(inner: P, policy: CachePolicy) -> Self {
        Self {
            inner,
            policy,
            slot: Mutex::new(None),
            sink: NoopSink,
        }
    }
}

impl<P: Producer, S: EventSink> Cached<P, S> {
    /// Wrap `inner` with the given policy, reporting every hit and miss to
    /// `sink`.
    pub fn with_events(inner: P, policy: CachePolicy, sink: S) -> Self {
        Self {
            inner,
            policy,
            slot: Mutex::new(None),
            sink,
        }
    }

    /// The policy this wrapper was built with.
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Drop the stored entry, if any.
    ///
    /// The next invocation will miss and refresh regardless of the TTL.
    pub fn invalidate(&self) {
        *self.lock_slot() = None;
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<CacheEntry<P::Output>>> {
        // The slot holds plain data, so a poisoned lock cannot be torn.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: Producer, S: EventSink> Cached<P, S>
where
    P::Output: Clone,
{
    /// A clone of the stored value, if the entry exists and is fresh at
    /// `now`.
    fn fresh_value(&self, now: Instant) -> Option<P::Output> {
        let slot = self.lock_slot();
        let entry = slot.as_ref()?;
        if now.duration_since(entry.stored_at) < self.policy.ttl() {
            Some(entry.value.clone())
        } else {
            None
        }
    }
}

impl<P: Producer, S> fmt::Debug for Cached<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<P, S> Producer for Cached<P, S>
where
    P: Producer,
    P::Output: Clone,
    S: EventSink,
{
    type Args = P::Args;
    type Output = P::Output;
    type Error = P::Error;

    async fn call(&self, args: &Self::Args) -> Result<Self::Output, Self::Error> {
        let now = Instant::now();

        if let Some(value) = self.fresh_value(now) {
            self.sink.notify(Event::CacheHit);
            return Ok(value);
        }

        self.sink.notify(Event::CacheMiss);
        let value = self.inner.call(args).await?;
        *self.lock_slot() = Some(CacheEntry {
            value: value.clone(),
            stored_at: now,
        });
        Ok(value)
    }
}
