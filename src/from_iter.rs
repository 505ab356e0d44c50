use std::convert::Infallible;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::producer::Producer;
use crate::step::Step;

#[derive(Debug, Clone)]
pub struct FromIter<I>(I);

#[async_trait]
impl<I> Producer for FromIter<I>
where
    I: Iterator + Send,
    I::Item: Send,
{
    type Item = I::Item;
    type Error = Infallible;

    async fn step(
        &mut self,
        _: &CancellationToken,
    ) -> Result<Step<I::Item>, Infallible> {
        Ok(self.0.next().into())
    }
}

/// Creates a producer that yields the elements of an iterator, then is done.
///
/// This is the simplest way to iterate a literal sequence. It never fails and
/// never suspends. If the iterator is `Clone`, so is the producer, which
/// makes `Iterable::acquire()` available.
///
/// ```rust
/// use asyncoro::{HandleAssertions, Iterable, from_iter};
///
/// # futures::executor::block_on(async {
/// let mut handle = Iterable::new(from_iter([1, 2, 3])).into_handle();
/// handle.assert_yields(1).await;
/// handle.assert_yields(2).await;
/// handle.assert_yields(3).await;
/// handle.assert_exhausted().await;
/// # });
/// ```
pub fn from_iter<I>(iter: I) -> FromIter<I::IntoIter>
where
    I: IntoIterator,
    I::IntoIter: Send,
    I::Item: Send,
{
    FromIter(iter.into_iter())
}
