use mgmt_domain::DomainError;
use std::borrow::Cow;

/// Failures raised by facade getters, setters and operations.
#[mgmt_derive::mgmt_error]
#[derive(Clone, PartialEq, Eq)]
pub enum FacadeError {
    /// The request violates a domain rule (bad limit, unknown destination, ...).
    #[error("Rejected{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A collaborator the facade depends on is missing or shut down.
    #[error("Unavailable{}: {message}", format_context(.context))]
    Unavailable { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A value could not be converted to the type a binding expects.
    #[error("Value conversion failed{}: {source}", format_context(.context))]
    Domain { source: DomainError, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl FacadeError {
    pub fn rejected(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Rejected { message: message.into(), context: None }
    }

    pub fn unavailable(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Unavailable { message: message.into(), context: None }
    }
}
