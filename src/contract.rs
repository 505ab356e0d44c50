use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::IterResult;
use crate::handle::Handle;
use crate::iterable::Iterable;
use crate::producer::Producer;
use crate::state::IterState;

/// The traversal facet: what a consumer can do with one handle.
///
/// `Handle` is the implementation in this crate. The trait exists so that
/// consumers can be written against `dyn AsyncEnumerator` without naming the
/// producer type.
#[async_trait]
pub trait AsyncEnumerator: Send {
    type Item: Send;
    type Error: Send;

    async fn advance(
        &mut self,
        ambient: &CancellationToken,
    ) -> IterResult<bool, Self::Error>;

    fn current(&self) -> IterResult<&Self::Item, Self::Error>;

    fn dispose(&mut self);

    fn state(&self) -> IterState;
}

/// The template facet: something handles can be acquired from any number of
/// times.
pub trait AsyncEnumerable {
    type Enumerator: AsyncEnumerator;

    fn acquire(&self) -> Self::Enumerator;
}

#[async_trait]
impl<P: Producer> AsyncEnumerator for Handle<P> {
    type Item = P::Item;
    type Error = P::Error;

    async fn advance(
        &mut self,
        ambient: &CancellationToken,
    ) -> IterResult<bool, P::Error> {
        Handle::advance(self, ambient).await
    }

    fn current(&self) -> IterResult<&P::Item, P::Error> {
        Handle::current(self)
    }

    fn dispose(&mut self) {
        Handle::dispose(self)
    }

    fn state(&self) -> IterState {
        Handle::state(self)
    }
}

impl<P> AsyncEnumerable for Iterable<P>
where
    P: Producer + Clone,
{
    type Enumerator = Handle<P>;

    fn acquire(&self) -> Handle<P> {
        Iterable::acquire(self)
    }
}

/// Drains `enumerator` into a `Vec`, stopping at the first error.
///
/// The enumerator is disposed on every exit path.
pub async fn collect<E>(
    enumerator: &mut E,
    ambient: &CancellationToken,
) -> IterResult<Vec<E::Item>, E::Error>
where
    E: AsyncEnumerator + ?Sized,
    E::Item: Clone,
{
    let mut items = Vec::new();
    let result = loop {
        match enumerator.advance(ambient).await {
            Ok(true) => match enumerator.current() {
                Ok(item) => items.push(item.clone()),
                Err(e) => break Err(e),
            },
            Ok(false) => break Ok(items),
            Err(e) => break Err(e),
        }
    };
    enumerator.dispose();
    result
}
