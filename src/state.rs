/// Where a handle is in its lifecycle.
///
/// States only move forward, in the order they are declared here. Any state
/// may jump straight to `Disposed`, which is terminal.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord)]
pub enum IterState {
    /// Constructed but not yet armed for traversal.
    New,
    /// Armed with an owned cancellation token; nothing produced yet.
    Allocated,
    /// At least one advance has produced an element.
    Iterating,
    /// Torn down. Advancing reports "no more elements" forever.
    Disposed,
}

impl IterState {
    pub fn is_disposed(self) -> bool {
        self == IterState::Disposed
    }

    /// Whether `advance()` may invoke producer logic in this state.
    pub fn can_advance(self) -> bool {
        matches!(self, IterState::Allocated | IterState::Iterating)
    }

    /// Moves to `next` if that is not a step backwards. Returns whether the
    /// state changed.
    pub(crate) fn transition(&mut self, next: IterState) -> bool {
        if next > *self {
            *self = next;
            true
        } else {
            false
        }
    }
}
