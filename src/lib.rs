//! The `asyncoro` crate is an engine for pull-based asynchronous iteration.
//!
//! A *producer* knows how to make its next element, and making it may take
//! time: waiting on a socket, a timer, another task. The engine wraps a
//! producer in a *handle* that owns everything else about a traversal:
//! lifecycle state, validity of the current element, cancellation, and
//! teardown. Operators like `map()` and `filter()` are producers that wrap
//! other producers, so they share one lifecycle and one cancellation protocol
//! instead of each reimplementing them.
//!
//! In this crate, the core producer trait looks like:
//!
//! ```rust
//! # use tokio_util::sync::CancellationToken;
//! pub enum Step<T> {
//!     Yield(T),
//!     Done,
//! }
//!
//! #[async_trait::async_trait]
//! pub trait Producer: Send {
//!     type Item: Send;
//!     type Error: Send;
//!     async fn step(
//!         &mut self,
//!         cancel: &CancellationToken,
//!     ) -> Result<Step<Self::Item>, Self::Error>;
//! }
//! ```
//!
//! and a traversal looks like:
//!
//! ```rust
//! use asyncoro::{IterError, Iterable, from_iter};
//! use tokio_util::sync::CancellationToken;
//!
//! # futures::executor::block_on(async {
//! let ambient = CancellationToken::new();
//! let mut handle = Iterable::new(from_iter([1, 2, 3])).into_handle();
//! while handle.advance(&ambient).await? {
//!     println!("{}", handle.current()?);
//! }
//! assert_eq!(handle.current(), Err(IterError::InvalidState));
//! # Ok::<(), IterError<std::convert::Infallible>>(())
//! # }).unwrap();
//! ```
//!
//! # Lifecycle
//!
//! A handle moves through `New`, `Allocated`, `Iterating` and `Disposed`, in
//! that order, never backwards. Any state can jump straight to `Disposed`.
//! Once disposed, `advance()` returns `Ok(false)` forever without invoking the
//! producer, and `current()` fails with `InvalidState`.
//!
//! `current()` is valid exactly when the last `advance()` returned
//! `Ok(true)` and nothing has happened since.
//!
//! # Templates and handles
//!
//! An `Iterable` is a template: a producer in its initial state. Consuming it
//! with `into_handle()` promotes it into the one handle that traverses it,
//! without a copy. Borrowing it with `acquire()` clones the producer, so the
//! same template can be traversed repeatedly and concurrently; clones share no
//! mutable state.
//!
//! # Cancellation
//!
//! Every handle owns a cancellation token, created when it is armed and
//! cancelled once when it is disposed. Every `advance()` also takes the
//! caller's *ambient* token. The two are merged into a *linked* token for the
//! duration of the step; the producer receives it, and if either side fires,
//! the step is abandoned, the handle is disposed, and `advance()` fails with
//! `IterError::Cancelled`. If the ambient token has already fired, the
//! producer is not invoked at all.
//!
//! There is no built-in timer. For a timeout, cancel the ambient token from a
//! timer task.
//!
//! # Errors
//!
//! A producer failure is passed to the caller unchanged as
//! `IterError::Producer`. Like cancellation, it disposes the handle. The
//! engine never retries; after the first error the handle is simply empty.

mod cancel;
mod config;
mod contract;
mod either;
mod error;
mod filter;
mod from_fn;
mod from_iter;
mod handle;
mod handle_assertions;
mod iterable;
mod map;
mod producer;
mod state;
mod step;

pub use config::{ExhaustionPolicy, IterConfig};
pub use contract::{AsyncEnumerable, AsyncEnumerator, collect};
pub use error::{IterError, IterResult};
pub use filter::Filter;
pub use from_fn::{FromFn, from_fn};
pub use from_iter::{FromIter, from_iter};
pub use handle::{Acquisition, Handle};
pub use handle_assertions::HandleAssertions;
pub use iterable::Iterable;
pub use map::Map;
pub use producer::Producer;
pub use state::IterState;
pub use step::Step;

/// `Yield` and `Done` are imported into the crate root namespace because
/// they are used so often.
pub use Step::{Done, Yield};
