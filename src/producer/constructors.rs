//! Constructor functions for building producers from plain functions.

use std::future::{ready, Future, Ready};
use std::marker::PhantomData;

use crate::producer::trait_def::Producer;

/// Producer backed by an async function.
///
/// Created by [`from_async`]. The function is stored directly in the struct
/// and invoked on every `call`.
pub struct FromAsync<F, A> {
    pub(crate) f: F,
    pub(crate) _phantom: PhantomData<A>,
}

impl<F, A> std::fmt::Debug for FromAsync<F, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromAsync")
            .field("f", &"<function>")
            .finish()
    }
}

/// Create a producer from an async function.
///
/// The function receives a reference to the arguments and returns a future.
/// Because the future cannot borrow from the arguments, clone what the async
/// body needs before entering it - the same discipline an owned request type
/// would impose.
///
/// # Example
///
/// ```rust
/// use breakwater::producer::{from_async, Producer};
///
/// let fetch = from_async(|name: &String| {
///     let name = name.clone();
///     async move { Ok::<_, String>(format!("hello, {name}")) }
/// });
///
/// # tokio_test::block_on(async {
/// let greeting = fetch.call(&"breakwater".to_string()).await.unwrap();
/// assert_eq!(greeting, "hello, breakwater");
/// # });
/// ```
pub fn from_async<A, T, E, F, Fut>(f: F) -> FromAsync<F, A>
where
    F: Fn(&A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    A: Send + Sync,
    T: Send,
    E: Send,
{
    FromAsync {
        f,
        _phantom: PhantomData,
    }
}

impl<A, T, E, F, Fut> Producer for FromAsync<F, A>
where
    F: Fn(&A) -> Fut + Send + Sync,
    Fut: Future<Output = Result<T, E>> + Send,
    A: Send + Sync,
    T: Send,
    E: Send,
{
    type Args = A;
    type Output = T;
    type Error = E;

    fn call(&self, args: &A) -> impl Future<Output = Result<T, E>> + Send {
        (self.f)(args)
    }
}

/// Producer backed by a synchronous function.
///
/// Created by [`from_fn`].
pub struct FromFn<F, A> {
    pub(crate) f: F,
    pub(crate) _phantom: PhantomData<A>,
}

impl<F, A> std::fmt::Debug for FromFn<F, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

/// Create a producer from a synchronous, fallible function.
///
/// The returned producer resolves immediately. Useful in tests and for
/// operations that are cheap but flaky.
///
/// # Example
///
/// ```rust
/// use breakwater::producer::{from_fn, Producer};
///
/// let parse = from_fn(|input: &String| input.parse::<u32>().map_err(|e| e.to_string()));
///
/// # tokio_test::block_on(async {
/// assert_eq!(parse.call(&"42".to_string()).await, Ok(42));
/// assert!(parse.call(&"nope".to_string()).await.is_err());
/// # });
/// ```
pub fn from_fn<A, T, E, F>(f: F) -> FromFn<F, A>
where
    F: Fn(&A) -> Result<T, E> + Send + Sync,
    A: Send + Sync,
    T: Send,
    E: Send,
{
    FromFn {
        f,
        _phantom: PhantomData,
    }
}

impl<A, T, E, F> Producer for FromFn<F, A>
where
    F: Fn(&A) -> Result<T, E> + Send + Sync,
    A: Send + Sync,
    T: Send,
    E: Send,
{
    type Args = A;
    type Output = T;
    type Error = E;

    fn call(&self, args: &A) -> Ready<Result<T, E>> {
        ready((self.f)(args))
    }
}
