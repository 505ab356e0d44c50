use crate::config::IterConfig;
use crate::filter::Filter;
use crate::handle::{Acquisition, Handle};
use crate::map::Map;
use crate::producer::Producer;

/// A reusable template from which handles are acquired.
///
/// The template holds a producer in its initial state and is never touched
/// by traversal. There are two ways to get a handle out of it:
///
///   * `into_handle()` consumes the template. Ownership proves that nobody
///     else can traverse it, so its producer is moved straight into the
///     handle without a copy. This is the common "iterate once" case.
///   * `acquire()` borrows the template and clones its producer, so the same
///     template can be traversed any number of times, from any number of
///     tasks at once, with no state shared between the traversals.
///
/// ```rust
/// use asyncoro::{Acquisition, HandleAssertions, Iterable, from_iter};
///
/// # futures::executor::block_on(async {
/// let template = Iterable::new(from_iter(vec![1, 2]));
///
/// let mut first = template.acquire();
/// let mut second = template.acquire();
/// assert_eq!(first.acquisition(), Acquisition::Cloned);
/// first.assert_yields(1).await;
/// second.assert_yields(1).await;
/// first.assert_yields(2).await;
///
/// let mut last = template.into_handle();
/// assert_eq!(last.acquisition(), Acquisition::Promoted);
/// last.assert_yields(1).await;
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Iterable<P> {
    producer: P,
    config: IterConfig,
}

impl<P: Producer> Iterable<P> {
    pub fn new(producer: P) -> Self {
        Iterable {
            producer,
            config: IterConfig::default(),
        }
    }

    pub fn with_config(mut self, config: IterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &IterConfig {
        &self.config
    }

    /// Promotes the template itself into an armed handle.
    pub fn into_handle(self) -> Handle<P> {
        let Self { producer, config } = self;
        Handle::new(producer, config, Acquisition::Promoted).arm()
    }

    /// Returns an armed handle over an independent clone of the producer.
    pub fn acquire(&self) -> Handle<P>
    where
        P: Clone,
    {
        Handle::new(
            self.producer.clone(),
            self.config.clone(),
            Acquisition::Cloned,
        )
        .arm()
    }

    /// A template whose handles yield `f` applied to each element.
    pub fn map<U, F>(self, f: F) -> Iterable<Map<P, F>>
    where
        F: FnMut(P::Item) -> U + Send,
        U: Send,
    {
        let Self { producer, config } = self;
        Iterable {
            producer: producer.map(f),
            config,
        }
    }

    /// A template whose handles skip elements failing `predicate`.
    pub fn filter<F>(self, predicate: F) -> Iterable<Filter<P, F>>
    where
        F: FnMut(&P::Item) -> bool + Send,
    {
        let Self { producer, config } = self;
        Iterable {
            producer: producer.filter(predicate),
            config,
        }
    }
}
