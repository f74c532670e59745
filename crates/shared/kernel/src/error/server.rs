use crate::error::DispatchError;
use mgmt_domain::object_name::ObjectName;
use mgmt_events::NotificationError;
use std::borrow::Cow;

/// Failures of name-routed calls on the [`ObjectServer`](crate::server::ObjectServer).
#[mgmt_derive::mgmt_error]
pub enum ServerError {
    #[error("Instance already exists{}: {name}", format_context(.context))]
    InstanceAlreadyExists { name: ObjectName, context: Option<Cow<'static, str>> },

    #[error("Instance not found{}: {name}", format_context(.context))]
    InstanceNotFound { name: ObjectName, context: Option<Cow<'static, str>> },

    #[error("Dispatch error{}: {source}", format_context(.context))]
    Dispatch { source: DispatchError, context: Option<Cow<'static, str>> },

    #[error("Notification error{}: {source}", format_context(.context))]
    Notification { source: NotificationError, context: Option<Cow<'static, str>> },
}
