//! Merging the caller's ambient cancellation with a handle's owned one.

use tokio_util::sync::CancellationToken;
use tracing::trace;

/// The linked signal for a single advance.
///
/// The linked token is a child of the owned token, so it fires whenever the
/// owned token does. The ambient token is not a parent, so `fired()` watches
/// it and cancels the linked token on its behalf.
///
/// Dropping the guard unregisters the linked token from the owned token's
/// tree. It does not cancel it: a producer that kept a clone of the linked
/// token stays attached to the owned token and is cancelled on disposal.
pub(crate) struct Linked<'a> {
    ambient: &'a CancellationToken,
    token: CancellationToken,
    label: &'a str,
}

impl<'a> Linked<'a> {
    pub(crate) fn new(
        ambient: &'a CancellationToken,
        owned: &CancellationToken,
        label: &'a str,
    ) -> Self {
        Linked {
            ambient,
            token: owned.child_token(),
            label,
        }
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Completes once either the ambient or the owned token fires. The
    /// linked token is cancelled by then.
    pub(crate) async fn fired(&self) {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => {}
            _ = self.ambient.cancelled() => {
                trace!(label = self.label, "ambient cancellation fired");
                self.token.cancel();
            }
        }
    }
}

impl Drop for Linked<'_> {
    fn drop(&mut self) {
        trace!(
            label = self.label,
            cancelled = self.token.is_cancelled(),
            "released linked cancellation"
        );
    }
}
