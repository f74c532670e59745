use crate::value::ValueType;
use std::borrow::Cow;

/// Errors raised while converting values or parsing names.
#[mgmt_derive::mgmt_error]
#[derive(Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A [`Value`](crate::value::Value) was extracted as a type it does not hold.
    #[error("Type mismatch{}: expected {expected}, found {found}", format_context(.context))]
    TypeMismatch { expected: ValueType, found: ValueType, context: Option<Cow<'static, str>> },

    /// An [`ObjectName`](crate::object_name::ObjectName) string could not be parsed.
    #[error("Malformed object name{}: {message}", format_context(.context))]
    MalformedObjectName { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
