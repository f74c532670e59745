use mgmt_domain::value::ValueType;
use std::borrow::Cow;

/// A facade's bindings disagree with its declared metadata.
///
/// Raised once, when the dispatcher wraps the facade; never at call time.
#[mgmt_derive::mgmt_error]
#[derive(Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{class}: attribute '{member}' declared twice{}", format_context(.context))]
    DuplicateAttribute { class: String, member: String, context: Option<Cow<'static, str>> },

    #[error("{class}: member '{member}' bound twice{}", format_context(.context))]
    DuplicateBinding { class: String, member: String, context: Option<Cow<'static, str>> },

    #[error("{class}: readable attribute '{member}' has no getter{}", format_context(.context))]
    MissingGetter { class: String, member: String, context: Option<Cow<'static, str>> },

    #[error("{class}: writable attribute '{member}' has no setter{}", format_context(.context))]
    MissingSetter { class: String, member: String, context: Option<Cow<'static, str>> },

    #[error(
        "{class}: operation '{member}({signature})' has no binding{}",
        format_context(.context)
    )]
    MissingOperation {
        class: String,
        member: String,
        signature: String,
        context: Option<Cow<'static, str>>,
    },

    /// A getter, setter or operation was bound for a member that is not declared.
    #[error("{class}: binding '{member}' matches no declared member{}", format_context(.context))]
    UndeclaredBinding { class: String, member: String, context: Option<Cow<'static, str>> },

    #[error(
        "{class}: binding for '{member}' handles {found}, declared {expected}{}",
        format_context(.context)
    )]
    BindingTypeMismatch {
        class: String,
        member: String,
        expected: ValueType,
        found: ValueType,
        context: Option<Cow<'static, str>>,
    },

    #[error(
        "{class}: 'is' attribute '{member}' must be boolean, declared {found}{}",
        format_context(.context)
    )]
    InvalidBooleanAccessor {
        class: String,
        member: String,
        found: ValueType,
        context: Option<Cow<'static, str>>,
    },
}
