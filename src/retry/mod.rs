//! Automatic retry with exponential backoff.
//!
//! Wraps a [`Producer`](crate::producer::Producer); on failure, retries up to
//! a bounded attempt count with exponentially increasing delay; on
//! exhaustion, fails with [`RetryExhausted`].
//!
//! - [`RetryPolicy`] is pure data: the attempt budget and the backoff base.
//! - [`Retry`] runs the attempt loop (requires the `async` feature for its
//!   `tokio`-backed backoff sleep).
//! - Each scheduled retry is reported to the injected
//!   [`EventSink`](crate::event::EventSink); nothing is printed or logged by
//!   the loop itself.
//!
//! # Quick Start
//!
//! ```rust
//! use breakwater::prelude::*;
//! use breakwater::testing::Flaky;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let producer = Flaky::new(1, 42).retry(RetryPolicy::default());
//!
//! // First attempt fails, the retry succeeds.
//! assert_eq!(producer.call(&()).await.unwrap(), 42);
//! # });
//! ```

mod error;
mod policy;
#[cfg(feature = "async")]
mod wrapper;

pub use error::RetryExhausted;
pub use policy::RetryPolicy;
#[cfg(feature = "async")]
pub use wrapper::Retry;
