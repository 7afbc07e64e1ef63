//! # Breakwater
//!
//! > *A breakwater shelters what's behind it from rough water.*
//!
//! A small resilience layer for flaky asynchronous operations: wrap a
//! producer once and call it as if it were cheap and reliable, without
//! touching the operation itself.
//!
//! Two orthogonal, stackable wrappers:
//!
//! - **Retry** - on failure, retry up to a bounded attempt count with
//!   exponentially increasing delay; on exhaustion, fail with a single
//!   terminal [`RetryExhausted`] error.
//! - **Cache** - remember the most recent successful result and serve it,
//!   without invoking the wrapped producer, until it is older than the TTL.
//!
//! The intended stacking order is **cache outside, retry inside**: a fresh
//! invocation checks cache freshness first, and only a miss falls through to
//! the retry loop. A cache hit therefore costs zero underlying calls and
//! zero backoff delay. Reading bottom-up, that is
//! `base.retry(..).cached(..)`.
//!
//! ## Quick Example
//!
//! ```rust
//! use breakwater::prelude::*;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! // A producer that would normally hit the network.
//! let fetch = from_async(|city: &String| {
//!     let city = city.clone();
//!     async move { Ok::<_, String>(format!("forecast for {city}")) }
//! });
//!
//! // Up to 3 attempts with 300ms/600ms backoff, behind a 5s cache window.
//! let forecast = fetch
//!     .retry(RetryPolicy::new(3, Duration::from_millis(300)))
//!     .cached(CachePolicy::new(Duration::from_secs(5)));
//!
//! let args = "Lisbon".to_string();
//! let first = forecast.call(&args).await.unwrap();
//! let second = forecast.call(&args).await.unwrap(); // served from the slot
//! assert_eq!(first, second);
//! # });
//! ```
//!
//! ## Scope
//!
//! Deliberately small: one in-memory slot per cache wrapper (not keyed by
//! arguments, not persistent, not shared across processes), one linear
//! attempt sequence per retry invocation. Concurrent invocations that both
//! find the slot stale both run the underlying producer - there is no
//! single-flight de-duplication. In-flight attempts are cancelled by
//! dropping the future; no other cancellation mechanism exists.
//!
//! ## Features
//!
//! - `async` *(default)* - the [`Retry`](retry::Retry) wrapper and its
//!   `tokio`-backed backoff sleep.
//! - `tracing` - [`TracingSink`](event::TracingSink), forwarding wrapper
//!   events to structured `tracing` records.
//! - `serde` - `Serialize`/`Deserialize` for the policy types.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod cache;
pub mod event;
pub mod producer;
pub mod retry;
pub mod testing;

// Re-exports
pub use cache::{CachePolicy, Cached};
pub use event::{Event, EventSink, NoopSink};
pub use producer::{from_async, from_fn, BoxedProducer, Producer, ProducerExt};
#[cfg(feature = "async")]
pub use retry::Retry;
pub use retry::{RetryExhausted, RetryPolicy};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::{CachePolicy, Cached};
    pub use crate::event::{Event, EventSink, NoopSink};
    #[cfg(feature = "tracing")]
    pub use crate::event::TracingSink;
    pub use crate::producer::{from_async, from_fn, BoxedProducer, Producer, ProducerExt};
    #[cfg(feature = "async")]
    pub use crate::retry::Retry;
    pub use crate::retry::{RetryExhausted, RetryPolicy};
}
