use std::borrow::Cow;

/// What a handle does when its producer reports `Step::Done`.
///
/// Either way the current element becomes invalid and later advances return
/// `false` without touching the producer. The difference is only when the
/// owned cancellation token is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExhaustionPolicy {
    /// Dispose the handle immediately, cancelling and releasing its owned
    /// token.
    #[default]
    Dispose,
    /// Leave the handle in its current state. The owned token lives until
    /// `dispose()` is called or the handle is dropped.
    Inert,
}

/// Per-template settings, copied into every handle acquired from it.
///
/// ```rust
/// use asyncoro::{ExhaustionPolicy, IterConfig};
///
/// let config = IterConfig::default()
///     .with_label("pages")
///     .with_exhaustion(ExhaustionPolicy::Inert);
/// assert_eq!(config.label(), "pages");
/// assert_eq!(config.exhaustion(), ExhaustionPolicy::Inert);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IterConfig {
    label: Option<Cow<'static, str>>,
    exhaustion: ExhaustionPolicy,
}

impl IterConfig {
    /// Sets the label attached to every tracing event of the handle.
    pub fn with_label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_exhaustion(mut self, exhaustion: ExhaustionPolicy) -> Self {
        self.exhaustion = exhaustion;
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or("iter")
    }

    pub fn exhaustion(&self) -> ExhaustionPolicy {
        self.exhaustion
    }
}
