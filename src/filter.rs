use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::producer::Producer;
use crate::step::Step;
use Step::{Done, Yield};

#[derive(Debug, Clone)]
pub struct Filter<P, F> {
    producer: P,
    predicate: F,
}

impl<P, F> Filter<P, F> {
    pub fn new(producer: P, predicate: F) -> Self
    where
        P: Producer,
        F: FnMut(&P::Item) -> bool + Send,
    {
        Filter {
            producer,
            predicate,
        }
    }
}

#[async_trait]
impl<P, F> Producer for Filter<P, F>
where
    P: Producer,
    F: FnMut(&P::Item) -> bool + Send,
{
    type Item = P::Item;
    type Error = P::Error;

    /// Pulls from the inner producer until an element passes, so one step
    /// here may be many steps of the inner producer.
    async fn step(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Step<P::Item>, P::Error> {
        loop {
            match self.producer.step(cancel).await? {
                Yield(item) if (self.predicate)(&item) => {
                    return Ok(Yield(item));
                }
                Yield(_) => continue,
                Done => return Ok(Done),
            }
        }
    }
}
