//! Opt-in type erasure for producers.
//!
//! Wrapper composition builds nested concrete types such as
//! `Cached<Retry<FromAsync<..>>>` - zero-cost, but unwieldy to name in struct
//! fields or to store alongside other producers. `BoxedProducer` erases the
//! concrete type behind an `Arc`, at the cost of one allocation per call for
//! the boxed future.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;

use crate::producer::trait_def::Producer;

/// Object-safe shim over [`Producer`].
trait ErasedProducer<A, T, E>: Send + Sync {
    fn call_erased<'a>(&'a self, args: &'a A) -> BoxFuture<'a, Result<T, E>>;
}

impl<P> ErasedProducer<P::Args, P::Output, P::Error> for P
where
    P: Producer,
{
    fn call_erased<'a>(&'a self, args: &'a P::Args) -> BoxFuture<'a, Result<P::Output, P::Error>> {
        Box::pin(self.call(args))
    }
}

/// A type-erased, cheaply cloneable producer.
///
/// Created by [`ProducerExt::boxed`](crate::producer::ProducerExt::boxed).
/// Clones share the erased producer - and therefore share its cache slot if
/// the boxed stack contains a [`Cached`](crate::cache::Cached) layer.
///
/// # Example
///
/// ```rust
/// use breakwater::prelude::*;
///
/// fn build() -> BoxedProducer<String, usize, String> {
///     from_fn(|s: &String| Ok::<_, String>(s.len())).boxed()
/// }
///
/// # tokio_test::block_on(async {
/// let measure = build();
/// assert_eq!(measure.call(&"five!".to_string()).await, Ok(5));
/// # });
/// ```
pub struct BoxedProducer<A, T, E> {
    inner: Arc<dyn ErasedProducer<A, T, E>>,
}

impl<A, T, E> BoxedProducer<A, T, E>
where
    A: Send + Sync + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    /// Erase a concrete producer.
    pub fn new<P>(producer: P) -> Self
    where
        P: Producer<Args = A, Output = T, Error = E> + 'static,
    {
        Self {
            inner: Arc::new(producer),
        }
    }
}

impl<A, T, E> Clone for BoxedProducer<A, T, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A, T, E> fmt::Debug for BoxedProducer<A, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedProducer").finish_non_exhaustive()
    }
}

impl<A, T, E> Producer for BoxedProducer<A, T, E>
where
    A: Send + Sync,
    T: Send,
    E: Send,
{
    type Args = A;
    type Output = T;
    type Error = E;

    fn call(&self, args: &A) -> impl Future<Output = Result<T, E>> + Send {
        async move { self.inner.call_erased(args).await }
    }
}
