use futures::Stream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::cancel::Linked;
use crate::config::{ExhaustionPolicy, IterConfig};
use crate::error::{IterError, IterResult};
use crate::producer::Producer;
use crate::state::IterState;
use crate::step::Step;

/// How a handle was obtained from its template.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Acquisition {
    /// The template was consumed and its producer moved into the handle.
    Promoted,
    /// The template's producer was cloned; the template is untouched.
    Cloned,
}

/// One traversal of a producer.
///
/// A handle is obtained from an `Iterable` and driven with repeated
/// `advance()` / `current()` pairs. It owns a cancellation token for its
/// whole life and merges it with the caller's ambient token on every
/// `advance()`. Whichever way the traversal ends (exhaustion, a producer
/// failure, either cancellation, explicit `dispose()` or drop), teardown
/// runs once and the handle degrades to a permanently empty iterator.
///
/// `advance()` takes `&mut self`, so there can never be two advances in
/// flight on one handle. Independent handles share nothing and may be driven
/// from different tasks.
pub struct Handle<P: Producer> {
    producer: P,
    config: IterConfig,
    state: IterState,
    // `Some` exactly when the current element is valid.
    current: Option<P::Item>,
    owned: Option<CancellationToken>,
    exhausted: bool,
    // Set while a step is in flight. Still set afterwards only if the
    // advance future was dropped before the step finished.
    pending_step: bool,
    acquisition: Acquisition,
}

impl<P: Producer> Handle<P> {
    pub(crate) fn new(
        producer: P,
        config: IterConfig,
        acquisition: Acquisition,
    ) -> Self {
        Handle {
            producer,
            config,
            state: IterState::New,
            current: None,
            owned: None,
            exhausted: false,
            pending_step: false,
            acquisition,
        }
    }

    /// Moves a `New` handle to `Allocated` and creates its owned token.
    pub(crate) fn arm(mut self) -> Self {
        if self.state.transition(IterState::Allocated) {
            self.owned = Some(CancellationToken::new());
            debug!(
                label = self.config.label(),
                acquisition = ?self.acquisition,
                "handle armed"
            );
        }
        self
    }

    /// The lifecycle state. A handle whose advance was abandoned mid-step
    /// reports `Disposed`.
    pub fn state(&self) -> IterState {
        if self.pending_step {
            IterState::Disposed
        } else {
            self.state
        }
    }

    pub fn acquisition(&self) -> Acquisition {
        self.acquisition
    }

    pub fn label(&self) -> &str {
        self.config.label()
    }

    /// A clone of the owned cancellation token, or `None` once disposed.
    ///
    /// Cancelling it from anywhere aborts an in-flight advance and disposes
    /// the handle, exactly as if the caller's ambient token had fired.
    ///
    /// Between advances the transition is lazy: `state()` keeps reporting
    /// `Allocated` or `Iterating` until the next `advance()`, which fails
    /// with `IterError::Cancelled` without invoking the producer and
    /// disposes the handle.
    pub fn cancellation_token(&self) -> Option<CancellationToken> {
        self.owned.clone()
    }

    /// Tries to make the next element.
    ///
    /// Returns `Ok(true)` with a valid `current()` if an element was
    /// produced, and `Ok(false)` once the handle is exhausted or disposed.
    /// Returns `Err(IterError::Cancelled)` if `ambient` or the owned token
    /// fired before or during the step, and `Err(IterError::Producer(_))` if
    /// the producer failed. Every error disposes the handle, so the next
    /// call returns `Ok(false)` without touching the producer.
    ///
    /// If `ambient` is already cancelled, the producer is not invoked at
    /// all.
    ///
    /// Dropping the returned future before it completes abandons the step.
    /// The owned token is cancelled on the spot and the handle counts as
    /// disposed: it reports `Disposed` and the next call returns `Ok(false)`.
    pub async fn advance(
        &mut self,
        ambient: &CancellationToken,
    ) -> IterResult<bool, P::Error> {
        if self.pending_step {
            debug!(label = self.config.label(), "previous advance abandoned");
            self.dispose();
            return Ok(false);
        }

        let owned = match &self.owned {
            Some(owned) if self.state.can_advance() && !self.exhausted => {
                owned
            }
            _ => return Ok(false),
        };

        if ambient.is_cancelled() {
            debug!(
                label = self.config.label(),
                "ambient cancelled before advance"
            );
            self.dispose();
            return Err(IterError::Cancelled);
        }

        self.current = None;
        self.pending_step = true;
        let outcome = {
            // Cancels the owned token if this future is dropped mid-step.
            let abandoned = owned.clone().drop_guard();
            let linked = Linked::new(ambient, owned, self.config.label());
            trace!(label = self.config.label(), "stepping producer");
            let outcome = tokio::select! {
                biased;
                _ = linked.fired() => Err(IterError::Cancelled),
                step = self.producer.step(linked.token()) => {
                    step.map_err(IterError::Producer)
                }
            };
            let _ = abandoned.disarm();
            outcome
        };
        self.pending_step = false;

        match outcome {
            Ok(Step::Yield(item)) => {
                self.current = Some(item);
                self.state.transition(IterState::Iterating);
                Ok(true)
            }
            Ok(Step::Done) => {
                self.current = None;
                self.exhausted = true;
                debug!(label = self.config.label(), "producer exhausted");
                if self.config.exhaustion() == ExhaustionPolicy::Dispose {
                    self.dispose();
                }
                Ok(false)
            }
            Err(e) => {
                debug!(
                    label = self.config.label(),
                    cancelled = e.is_cancelled(),
                    "advance failed"
                );
                self.dispose();
                Err(e)
            }
        }
    }

    /// The element produced by the last successful `advance()`.
    ///
    /// Fails with `IterError::InvalidState` unless the immediately preceding
    /// `advance()` returned `Ok(true)` and the handle has not been disposed
    /// since.
    pub fn current(&self) -> IterResult<&P::Item, P::Error> {
        self.current.as_ref().ok_or(IterError::InvalidState)
    }

    /// Tears the handle down: cancels and releases the owned token and
    /// invalidates the current element.
    ///
    /// Disposing more than once is harmless; the token is released only the
    /// first time.
    pub fn dispose(&mut self) {
        self.current = None;
        self.pending_step = false;
        if let Some(owned) = self.owned.take() {
            if !owned.is_cancelled() {
                owned.cancel();
            }
            debug!(label = self.config.label(), "handle disposed");
        }
        self.state.transition(IterState::Disposed);
    }

    /// Moves the current element out, invalidating it.
    pub(crate) fn take_current(&mut self) -> Option<P::Item> {
        self.current.take()
    }

    /// Turns this handle into a `Stream` driven with `ambient` as the
    /// ambient token of every advance.
    ///
    /// The stream yields `Ok` for each element. A failure or cancellation is
    /// yielded once as `Err`, after which the stream ends.
    pub fn into_stream(
        self,
        ambient: CancellationToken,
    ) -> impl Stream<Item = IterResult<P::Item, P::Error>> + Send {
        futures::stream::unfold(
            (self, ambient),
            |(mut handle, ambient)| async move {
                match handle.advance(&ambient).await {
                    Ok(true) => {
                        let item = handle.take_current()?;
                        Some((Ok(item), (handle, ambient)))
                    }
                    Ok(false) => None,
                    Err(e) => Some((Err(e), (handle, ambient))),
                }
            },
        )
    }
}

impl<P: Producer> Drop for Handle<P> {
    fn drop(&mut self) {
        if !self.state.is_disposed() {
            trace!(label = self.config.label(), "dropping live handle");
            self.dispose();
        }
    }
}

impl<P> std::fmt::Debug for Handle<P>
where
    P: Producer,
    P::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("label", &self.config.label())
            .field("state", &self.state())
            .field("current", &self.current)
            .field("acquisition", &self.acquisition)
            .finish_non_exhaustive()
    }
}
