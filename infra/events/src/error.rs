use std::borrow::Cow;

/// Errors raised by broadcaster bookkeeping.
#[mgmt_derive::mgmt_error]
pub enum NotificationError {
    /// `unsubscribe` was called with an id that is not (or no longer) registered.
    #[error("Listener not found{}: {message}", format_context(.context))]
    ListenerNotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// Capacity must be greater than zero for bridged channels.
    #[error("Invalid capacity{}: {message}", format_context(.context))]
    InvalidCapacity { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
