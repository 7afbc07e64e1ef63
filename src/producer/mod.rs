//! The producer abstraction: an async operation that yields a value or fails.
//!
//! Everything in this crate consumes and fulfils one contract, [`Producer`]:
//! "invoke with a given argument; eventually produce a value or fail with an
//! error". The wrappers in [`retry`](crate::retry) and [`cache`](crate::cache)
//! implement `Producer` themselves, which is what makes them stack.
//!
//! * [`from_async`] / [`from_fn`] adapt plain functions into producers.
//! * [`ProducerExt`] adds the wrapping methods (`.retry(..)`, `.cached(..)`).
//! * [`BoxedProducer`] is opt-in type erasure for storing composed stacks.

mod boxed;
mod constructors;
mod ext;
mod trait_def;

pub use boxed::BoxedProducer;
pub use constructors::{from_async, from_fn, FromAsync, FromFn};
pub use ext::ProducerExt;
pub use trait_def::Producer;
