use mgmt_domain::notification::Notification;
use std::borrow::Cow;
use std::fmt;

/// Handle returned by a subscription; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

impl SubscriptionId {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Failures a listener may report back to the broadcaster.
#[mgmt_derive::mgmt_error]
pub enum ListenerError {
    /// The listener could not process this notification; delivery continues with the next one.
    #[error("Listener failed{}: {message}", format_context(.context))]
    Failed { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The listener is gone for good and is removed after the current delivery round.
    #[error("Listener disconnected{}", format_context(.context))]
    Disconnected { context: Option<Cow<'static, str>> },
}

/// Receives notifications synchronously on the emitting thread.
pub trait NotificationListener: Send + Sync {
    /// # Errors
    /// Any error is logged by the broadcaster; [`ListenerError::Disconnected`] also
    /// removes the subscription.
    fn handle(&self, notification: &Notification) -> Result<(), ListenerError>;
}

impl<F> NotificationListener for F
where
    F: Fn(&Notification) -> Result<(), ListenerError> + Send + Sync,
{
    fn handle(&self, notification: &Notification) -> Result<(), ListenerError> {
        self(notification)
    }
}
