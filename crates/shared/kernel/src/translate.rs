//! Uniform translation of facade failures into [`DispatchError::InvocationFailure`].

use crate::error::{DispatchError, FacadeError};
use mgmt_events::panic_message;
use std::panic::{AssertUnwindSafe, catch_unwind};
use strum::{AsRefStr, Display};
use tracing::warn;

/// Which kind of call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Phase {
    Get,
    Set,
    Invoke,
}

/// Runs facade code, turning errors and panics into logged invocation failures.
pub(crate) fn guarded<R>(
    object: &str,
    member: &str,
    phase: Phase,
    call: impl FnOnce() -> Result<R, FacadeError>,
) -> Result<R, DispatchError> {
    match catch_unwind(AssertUnwindSafe(call)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(source)) => Err(failure(object, member, phase, source)),
        Err(panic) => {
            let message = format!("panicked: {}", panic_message(panic.as_ref()));
            Err(failure(object, member, phase, FacadeError::Internal {
                message: message.into(),
                context: None,
            }))
        },
    }
}

/// Wraps `source` as an invocation failure and logs it once at warn.
pub(crate) fn failure(
    object: &str,
    member: &str,
    phase: Phase,
    source: FacadeError,
) -> DispatchError {
    warn!(object, member, %phase, cause = %source, "Management call failed");
    DispatchError::InvocationFailure {
        object: object.to_owned(),
        member: member.to_owned(),
        source,
        context: Some(phase.as_ref().to_owned().into()),
    }
}

/// A contract breach by the bound implementation (wrong result type, missing result, ...).
pub(crate) fn breach(
    object: &str,
    member: &str,
    phase: Phase,
    message: String,
) -> DispatchError {
    failure(object, member, phase, FacadeError::Internal { message: message.into(), context: None })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_become_invocation_failures() {
        let err = guarded::<()>("Destination:orders", "MaxNumMsgs", Phase::Set, || {
            Err(FacadeError::rejected("use a positive number or -1"))
        })
        .unwrap_err();

        assert_eq!(err.member(), "MaxNumMsgs");
        assert!(matches!(err.cause(), Some(FacadeError::Rejected { .. })));
        assert!(err.to_string().contains("(set)"), "phase is rendered: {err}");
    }

    #[test]
    fn panics_are_contained() {
        let err = guarded::<()>("Broker", "shutdown", Phase::Invoke, || panic!("broker gone"))
            .unwrap_err();
        let Some(FacadeError::Internal { message, .. }) = err.cause() else {
            panic!("expected internal cause, got {err:?}");
        };
        assert_eq!(message, "panicked: broker gone");
    }
}
