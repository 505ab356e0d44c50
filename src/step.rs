/// The outcome of one successful call to `Producer::step()`.
///
/// After a step finishes without error, the producer is in one of two states:
///
///   * `Yield(t)`: The producer made the element `t` and may be stepped
///     again.
///   * `Done`: The producer is exhausted. The handle driving it will never
///     step it again.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Step<T> {
    Yield(T),
    Done,
}

use Step::*;

impl<T> Step<T> {
    /// Returns the yielded element, if any.
    ///
    /// Compare to `Result::ok()` or `ControlFlow::continue_value()`.
    pub fn into_yield(self) -> Option<T> {
        match self {
            Yield(t) => Some(t),
            Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Done)
    }

    /// Maps the yielded element, leaving `Done` as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Step<U> {
        match self {
            Yield(t) => Yield(f(t)),
            Done => Done,
        }
    }
}

impl<T> From<Option<T>> for Step<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(t) => Yield(t),
            None => Done,
        }
    }
}
