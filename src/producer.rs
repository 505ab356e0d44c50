use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::filter::Filter;
use crate::map::Map;
use crate::step::Step;

/// The per-step logic behind a handle.
///
/// A producer only knows how to make its next element. Everything else,
/// including lifecycle state, validity of the current element, cancellation
/// and teardown, belongs to the `Handle` that drives it. Operators such as
/// `map()` and `filter()` are themselves producers wrapping another
/// producer, so they inherit the whole lifecycle for free.
///
/// `step()` is only ever called from `Handle::advance()`, never concurrently
/// with itself on the same handle, and never again after it has returned
/// `Step::Done` or an error.
///
/// # Examples
///
/// ```rust
/// use asyncoro::{Iterable, Producer, Step};
/// use async_trait::async_trait;
/// use std::convert::Infallible;
/// use tokio_util::sync::CancellationToken;
///
/// #[derive(Clone)]
/// struct Countdown(u32);
///
/// #[async_trait]
/// impl Producer for Countdown {
///     type Item = u32;
///     type Error = Infallible;
///
///     async fn step(
///         &mut self,
///         _cancel: &CancellationToken,
///     ) -> Result<Step<u32>, Infallible> {
///         if self.0 == 0 {
///             return Ok(Step::Done);
///         }
///         self.0 -= 1;
///         Ok(Step::Yield(self.0 + 1))
///     }
/// }
///
/// # futures::executor::block_on(async {
/// let mut handle = Iterable::new(Countdown(2)).into_handle();
/// let ambient = CancellationToken::new();
/// assert!(handle.advance(&ambient).await.unwrap());
/// assert_eq!(handle.current(), Ok(&2));
/// assert!(handle.advance(&ambient).await.unwrap());
/// assert_eq!(handle.current(), Ok(&1));
/// assert!(!handle.advance(&ambient).await.unwrap());
/// # });
/// ```
#[async_trait]
pub trait Producer: Send {
    type Item: Send;
    type Error: Send;

    /// Makes the next element.
    ///
    /// `cancel` is the linked signal for this one step. It fires if either
    /// the caller's ambient token or the handle's owned token fires. A
    /// producer that hands work to other tasks should give them this token
    /// (or a child of it).
    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<Self::Item>, Self::Error>;

    /// Calls the provided closure on each element this producer yields.
    ///
    /// Compare to [`std::iter::Iterator::map()`](
    ///     https://doc.rust-lang.org/std/iter/trait.Iterator.html#method.map
    /// ).
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U + Send,
        U: Send,
    {
        Map::new(self, f)
    }

    /// Skips the elements for which `predicate` returns `false`.
    fn filter<F>(self, predicate: F) -> Filter<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Item) -> bool + Send,
    {
        Filter::new(self, predicate)
    }
}

#[async_trait]
impl<P> Producer for Box<P>
where
    P: Producer + ?Sized,
{
    type Item = P::Item;
    type Error = P::Error;

    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<Self::Item>, Self::Error> {
        (**self).step(cancel).await
    }
}
