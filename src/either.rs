use async_trait::async_trait;
use either::Either;
use tokio_util::sync::CancellationToken;

use crate::producer::Producer;
use crate::step::Step;
use Either::{Left, Right};

/// `Either` of two producers is a producer when both sides yield the same
/// item type and fail with the same error type.
///
/// This lets a function pick one of two differently-typed producers at run
/// time and still return a single concrete type.
#[async_trait]
impl<A, B> Producer for Either<A, B>
where
    A: Producer,
    B: Producer<Item = A::Item, Error = A::Error>,
{
    type Item = A::Item;
    type Error = A::Error;

    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<A::Item>, A::Error> {
        match self {
            Left(a) => a.step(cancel).await,
            Right(b) => b.step(cancel).await,
        }
    }
}
