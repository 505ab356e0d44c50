use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::producer::Producer;
use crate::step::Step;

#[derive(Debug, Clone)]
pub struct Map<P, F> {
    producer: P,
    f: F,
}

impl<P, F> Map<P, F> {
    pub fn new<U>(producer: P, f: F) -> Self
    where
        P: Producer,
        F: FnMut(P::Item) -> U + Send,
    {
        Map { producer, f }
    }
}

#[async_trait]
impl<P, F, U> Producer for Map<P, F>
where
    P: Producer,
    F: FnMut(P::Item) -> U + Send,
    U: Send,
{
    type Item = U;
    type Error = P::Error;

    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<U>, P::Error> {
        let Self { producer, f } = self;
        Ok(producer.step(cancel).await?.map(f))
    }
}
