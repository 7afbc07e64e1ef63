//! Producer trait definition - the contract every wrapper consumes and fulfils.

use std::future::Future;

/// An asynchronous operation that, given some arguments, eventually yields a
/// value or fails.
///
/// This is the sole extension point of the crate: anything satisfying this
/// contract can be wrapped, and every wrapper is itself a `Producer`, so
/// wrappers stack.
///
/// # Design notes
///
/// * `call` takes `&self` because wrappers invoke the same producer
///   repeatedly - the retry loop re-calls it within one invocation, the cache
///   re-calls it across freshness windows. Producers therefore keep any
///   internal state behind interior mutability.
/// * The argument list is a single `Args` type fixed when the producer is
///   built (use a tuple for several arguments). Arguments are passed by
///   reference so re-invocation does not require `Clone`.
///
/// # Example
///
/// ```rust
/// use breakwater::producer::Producer;
/// use std::future::{ready, Future};
///
/// struct Doubler;
///
/// impl Producer for Doubler {
///     type Args = i32;
///     type Output = i32;
///     type Error = String;
///
///     fn call(&self, args: &i32) -> impl Future<Output = Result<i32, String>> + Send {
///         ready(Ok(args * 2))
///     }
/// }
///
/// # tokio_test::block_on(async {
/// assert_eq!(Doubler.call(&21).await, Ok(42));
/// # });
/// ```
pub trait Producer: Send + Sync {
    /// The argument type this producer is invoked with.
    type Args: Send + Sync;

    /// The success type this producer eventually yields.
    type Output: Send;

    /// The error type a failed invocation produces.
    type Error: Send;

    /// Invoke the producer with the given arguments.
    ///
    /// Returns a future resolving to `Ok(output)` on success or `Err(error)`
    /// on failure. Dropping the future cancels the invocation at its next
    /// suspension point; no other cancellation mechanism is provided.
    fn call(
        &self,
        args: &Self::Args,
    ) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send;
}

/// Sharing one producer between several wrappers (or keeping a handle to it
/// after wrapping) is just an `Arc` away.
impl<P: Producer> Producer for std::sync::Arc<P> {
    type Args = P::Args;
    type Output = P::Output;
    type Error = P::Error;

    fn call(
        &self,
        args: &Self::Args,
    ) -> impl Future<Output = Result<Self::Output, Self::Error>> + Send {
        (**self).call(args)
    }
}
