use crate::error::FacadeError;
use mgmt_domain::value::ValueType;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use strum::{AsRefStr, Display, IntoStaticStr};

/// Errors returned to management clients.
///
/// Every variant names the object and the member the call addressed.
#[mgmt_derive::mgmt_error]
#[derive(Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// No readable (for reads) or declared (for writes) attribute has this name.
    #[error("Attribute '{member}' not found on '{object}'{}", format_context(.context))]
    AttributeNotFound { object: String, member: String, context: Option<Cow<'static, str>> },

    /// The written value's type differs from the declared attribute type.
    #[error(
        "Invalid value for '{member}' on '{object}'{}: expected {expected}, found {found}",
        format_context(.context)
    )]
    InvalidAttributeValue {
        object: String,
        member: String,
        expected: ValueType,
        found: ValueType,
        context: Option<Cow<'static, str>>,
    },

    /// No declared operation matches the name and signature.
    #[error("Operation '{member}({signature})' not found on '{object}'{}", format_context(.context))]
    OperationNotFound {
        object: String,
        member: String,
        signature: String,
        context: Option<Cow<'static, str>>,
    },

    /// The bound implementation failed, panicked or broke its declared contract.
    #[error("Invocation of '{member}' on '{object}' failed{}: {source}", format_context(.context))]
    InvocationFailure {
        object: String,
        member: String,
        source: FacadeError,
        context: Option<Cow<'static, str>>,
    },

    /// Write attempted on a read-only object or a non-writable attribute.
    #[error("Attribute '{member}' on '{object}' is not writable{}", format_context(.context))]
    ReadOnlyViolation { object: String, member: String, context: Option<Cow<'static, str>> },
}

/// Discriminant of a [`DispatchError`], stable across releases.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    IntoStaticStr,
)]
pub enum ErrorKind {
    AttributeNotFound,
    InvalidAttributeValue,
    OperationNotFound,
    InvocationFailure,
    ReadOnlyViolation,
}

/// Structured, trace-free view of a failure as a remote client receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub object: String,
    pub member: String,
    pub message: String,
}

impl DispatchError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::AttributeNotFound { .. } => ErrorKind::AttributeNotFound,
            Self::InvalidAttributeValue { .. } => ErrorKind::InvalidAttributeValue,
            Self::OperationNotFound { .. } => ErrorKind::OperationNotFound,
            Self::InvocationFailure { .. } => ErrorKind::InvocationFailure,
            Self::ReadOnlyViolation { .. } => ErrorKind::ReadOnlyViolation,
        }
    }

    #[must_use]
    pub fn object(&self) -> &str {
        match self {
            Self::AttributeNotFound { object, .. }
            | Self::InvalidAttributeValue { object, .. }
            | Self::OperationNotFound { object, .. }
            | Self::InvocationFailure { object, .. }
            | Self::ReadOnlyViolation { object, .. } => object,
        }
    }

    #[must_use]
    pub fn member(&self) -> &str {
        match self {
            Self::AttributeNotFound { member, .. }
            | Self::InvalidAttributeValue { member, .. }
            | Self::OperationNotFound { member, .. }
            | Self::InvocationFailure { member, .. }
            | Self::ReadOnlyViolation { member, .. } => member,
        }
    }

    /// The facade failure behind an [`DispatchError::InvocationFailure`].
    #[must_use]
    pub const fn cause(&self) -> Option<&FacadeError> {
        match self {
            Self::InvocationFailure { source, .. } => Some(source),
            _ => None,
        }
    }

    #[must_use]
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            kind: self.kind(),
            object: self.object().to_owned(),
            member: self.member().to_owned(),
            message: self.to_string(),
        }
    }
}
