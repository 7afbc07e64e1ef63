//! The retry wrapper.

use std::fmt;

use crate::event::{Event, EventSink, NoopSink};
use crate::producer::Producer;
use crate::retry::{RetryExhausted, RetryPolicy};

/// A producer wrapped with bounded, exponentially backed-off retries.
///
/// Attempt state is per-invocation, never instance-level: each call starts a
/// fresh attempt sequence, and a success on any attempt returns immediately
/// with no effect on later calls. Attempts are strictly sequential - there is
/// no hedging or parallel attempt execution.
///
/// Construct through [`ProducerExt::retry`](crate::producer::ProducerExt::retry)
/// or [`Retry::new`].
///
/// # Examples
///
/// ```rust
/// use breakwater::prelude::*;
/// use breakwater::testing::Flaky;
/// use std::time::Duration;
///
/// # tokio_test::block_on(async {
/// // Fails twice, then succeeds: three attempts fit the default budget.
/// let wobbly = Flaky::new(2, "recovered").retry(RetryPolicy::new(3, Duration::ZERO));
///
/// assert_eq!(wobbly.call(&()).await.unwrap(), "recovered");
/// # });
/// ```
pub struct Retry<P, S = NoopSink> {
    inner: P,
    policy: RetryPolicy,
    sink: S,
}

impl<P: Producer> Retry<P> {
    /// Wrap `inner` with the given policy and no event sink.
    pub fn new(inner: P, policy: RetryPolicy) -> Self {
        Self {
            inner,
            policy,
            sink: NoopSink,
        }
    }
}

impl<P: Producer, S: EventSink> Retry<P, S> {
    /// Wrap `inner` with the given policy, reporting each scheduled retry to
    /// `sink` as an [`Event::RetryAttempt`].
    pub fn with_events(inner: P, policy: RetryPolicy, sink: S) -> Self {
        Self {
            inner,
            policy,
            sink,
        }
    }

    /// The policy this wrapper was built with.
    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Unwrap, returning the inner producer.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P, S> fmt::Debug for Retry<P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Retry")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<P, S> Producer for Retry<P, S>
where
    P: Producer,
    S: EventSink,
{
    type Args = P::Args;
    type Output = P::Output;
    type Error = RetryExhausted<P::Error>;

    async fn call(&self, args: &Self::Args) -> Result<Self::Output, Self::Error> {
        let mut attempt = 0u32;
        loop {
            match self.inner.call(args).await {
                Ok(value) => return Ok(value),
                Err(error) => match self.policy.backoff_after(attempt) {
                    Some(delay) => {
                        self.sink.notify(Event::RetryAttempt {
                            attempt: attempt + 1,
                            delay,
                        });
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => return Err(RetryExhausted::new(error, attempt + 1)),
                },
            }
        }
    }
}
