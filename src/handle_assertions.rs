use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::contract::AsyncEnumerator;
use crate::error::IterError;

/// Extension trait providing assertion methods for testing handles.
///
/// This trait is separate from [`AsyncEnumerator`] to keep the contract
/// focused on essential operations. Every assertion advances with a fresh,
/// never-cancelled ambient token.
///
/// ```rust
/// use asyncoro::{HandleAssertions, Iterable, from_iter};
///
/// # futures::executor::block_on(async {
/// let mut handle = Iterable::new(from_iter(["a", "b"])).into_handle();
/// handle.assert_current_invalid();
/// handle.assert_yields("a").await;
/// handle.assert_yields("b").await;
/// handle.assert_exhausted().await;
/// handle.assert_current_invalid();
/// # });
/// ```
#[async_trait]
pub trait HandleAssertions: AsyncEnumerator {
    /// Advances and asserts that the handle produced `expected`. Panics if
    /// the handle is exhausted, fails, or produced something else.
    async fn assert_yields(&mut self, expected: Self::Item)
    where
        Self::Item: PartialEq + std::fmt::Debug,
        Self::Error: std::fmt::Debug,
    {
        match self.advance(&CancellationToken::new()).await {
            Ok(true) => match self.current() {
                Ok(actual) => assert_eq!(
                    actual, &expected,
                    "expected Yield({expected:?}), got Yield({actual:?})"
                ),
                Err(e) => {
                    panic!("expected Yield({expected:?}), got Err({e:?})")
                }
            },
            Ok(false) => panic!("expected Yield({expected:?}), got exhausted"),
            Err(e) => panic!("expected Yield({expected:?}), got Err({e:?})"),
        }
    }

    /// Advances and asserts that the handle reported "no more elements".
    async fn assert_exhausted(&mut self)
    where
        Self::Item: std::fmt::Debug,
        Self::Error: std::fmt::Debug,
    {
        match self.advance(&CancellationToken::new()).await {
            Ok(true) => panic!(
                "expected exhausted, got Yield({:?})",
                self.current()
            ),
            Ok(false) => {}
            Err(e) => panic!("expected exhausted, got Err({e:?})"),
        }
    }

    /// Asserts that `current()` fails with `IterError::InvalidState`.
    fn assert_current_invalid(&self)
    where
        Self::Item: std::fmt::Debug,
        Self::Error: std::fmt::Debug,
    {
        match self.current() {
            Err(IterError::InvalidState) => {}
            other => panic!("expected InvalidState, got {other:?}"),
        }
    }
}

/// Blanket implementation of [`HandleAssertions`] for all types implementing
/// [`AsyncEnumerator`].
impl<T> HandleAssertions for T where T: AsyncEnumerator + ?Sized {}
