//! Observable events emitted by the retry and cache wrappers.
//!
//! The wrappers never print or log on their own. Anything worth observing -
//! a scheduled retry, a cache hit, a cache miss - is reported as an [`Event`]
//! to an injected [`EventSink`]. Console output, metrics, and log records all
//! belong to the caller; the default [`NoopSink`] discards everything.
//!
//! # Quick Start
//!
//! ```rust
//! use breakwater::event::{sink_fn, Event, EventSink};
//! use std::time::Duration;
//!
//! let sink = sink_fn(|event| {
//!     if let Event::RetryAttempt { attempt, delay } = event {
//!         eprintln!("attempt {attempt} failed, retrying in {delay:?}");
//!     }
//! });
//!
//! sink.notify(Event::RetryAttempt {
//!     attempt: 1,
//!     delay: Duration::from_millis(300),
//! });
//! ```
//!
//! With the `tracing` feature enabled, [`TracingSink`] forwards events to
//! structured `tracing` records instead.

use std::sync::Arc;
use std::time::Duration;

/// A notification from a wrapper about something it just did.
///
/// Events are plain data. They are emitted synchronously at the point where
/// the wrapper's behavior diverges from a plain call; a terminal failure is
/// not an event - it is the returned error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An attempt failed and a retry has been scheduled.
    RetryAttempt {
        /// The attempt that just failed (1-indexed).
        attempt: u32,
        /// The computed backoff before the next attempt.
        delay: Duration,
    },
    /// A fresh cached value was served; the underlying producer was not called.
    CacheHit,
    /// The slot was empty or stale; the underlying producer is about to run.
    CacheMiss,
}

/// Receiver for wrapper [`Event`]s.
///
/// Implementations must be cheap and non-blocking; `notify` runs inline on
/// the calling task, between a failed attempt and its backoff sleep.
pub trait EventSink: Send + Sync {
    /// Record one event.
    fn notify(&self, event: Event);
}

/// The default sink. Discards every event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn notify(&self, _event: Event) {}
}

/// A sink backed by a closure.
///
/// Created by [`sink_fn`].
pub struct SinkFn<F> {
    f: F,
}

impl<F> std::fmt::Debug for SinkFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkFn").field("f", &"<function>").finish()
    }
}

/// Adapt a closure into an [`EventSink`].
///
/// # Example
///
/// ```rust
/// use breakwater::event::{sink_fn, Event, EventSink};
///
/// let sink = sink_fn(|event| println!("{event:?}"));
/// sink.notify(Event::CacheHit);
/// ```
pub fn sink_fn<F>(f: F) -> SinkFn<F>
where
    F: Fn(Event) + Send + Sync,
{
    SinkFn { f }
}

impl<F> EventSink for SinkFn<F>
where
    F: Fn(Event) + Send + Sync,
{
    fn notify(&self, event: Event) {
        (self.f)(event)
    }
}

/// Sharing a sink between wrappers (or keeping a handle for assertions in
/// tests) is just an `Arc` away.
impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn notify(&self, event: Event) {
        (**self).notify(event)
    }
}

/// A sink that forwards events to `tracing`.
///
/// Retries are recorded at `warn` level - a retry means an operation failed -
/// and cache traffic at `debug` level.
#[cfg(feature = "tracing")]
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

#[cfg(feature = "tracing")]
impl EventSink for TracingSink {
    fn notify(&self, event: Event) {
        match event {
            Event::RetryAttempt { attempt, delay } => {
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "attempt failed, retrying"
                );
            }
            Event::CacheHit => tracing::debug!("cache hit"),
            Event::CacheMiss => tracing::debug!("cache miss"),
        }
    }
}
