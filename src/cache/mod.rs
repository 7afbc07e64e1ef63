//! Time-windowed result caching.
//!
//! Wraps a [`Producer`](crate::producer::Producer) with a single-slot cache:
//! the most recent successful result is remembered with its timestamp and
//! served, without invoking the wrapped producer, until it is older than the
//! policy's TTL. `now - stored_at < ttl` is the sole freshness predicate.
//!
//! - [`CachePolicy`] is pure data: the freshness window.
//! - [`Cached`] owns the slot and runs the read-check-write sequence.
//! - Hits and misses are reported to the injected
//!   [`EventSink`](crate::event::EventSink).
//!
//! Failures never touch the slot: a failed refresh propagates the error
//! unchanged, and the next invocation tries the refresh again.
//!
//! # Quick Start
//!
//! ```rust
//! use breakwater::prelude::*;
//! use breakwater::testing::Flaky;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let producer = Flaky::new(0, 42);
//! let probe = producer.clone();
//! let cached = producer.cached(CachePolicy::default());
//!
//! assert_eq!(cached.call(&()).await.unwrap(), 42);
//! assert_eq!(cached.call(&()).await.unwrap(), 42);
//! assert_eq!(probe.calls(), 1);
//! # });
//! ```

mod policy;
mod wrapper;

pub use policy::CachePolicy;
pub use wrapper::Cached;
