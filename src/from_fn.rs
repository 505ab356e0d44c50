use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::producer::Producer;
use crate::step::Step;

#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T, E, F, Fut> Producer for FromFn<F>
where
    F: FnMut(CancellationToken) -> Fut + Send,
    Fut: Future<Output = Result<Step<T>, E>> + Send,
    T: Send,
    E: Send,
{
    type Item = T;
    type Error = E;

    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<T>, E> {
        (self.0)(cancel.clone()).await
    }
}

/// Creates a producer from a closure that returns a future of the next step.
///
/// The closure receives the linked cancellation token of the current step by
/// value, so the future it returns can own it.
///
/// This is the most straightforward way to get a producer without
/// implementing `Producer` for your own data type.
///
/// ```rust
/// use std::convert::Infallible;
///
/// use asyncoro::{HandleAssertions, Iterable, Step, from_fn};
///
/// # futures::executor::block_on(async {
/// let mut n = 0;
/// let squares = from_fn(move |_cancel| {
///     n += 1;
///     let step = if n <= 3 { Step::Yield(n * n) } else { Step::Done };
///     async move { Ok::<_, Infallible>(step) }
/// });
/// let mut handle = Iterable::new(squares).into_handle();
/// handle.assert_yields(1).await;
/// handle.assert_yields(4).await;
/// handle.assert_yields(9).await;
/// handle.assert_exhausted().await;
/// # });
/// ```
pub fn from_fn<T, E, F, Fut>(f: F) -> FromFn<F>
where
    F: FnMut(CancellationToken) -> Fut + Send,
    Fut: Future<Output = Result<Step<T>, E>> + Send,
{
    FromFn(f)
}
