use mgmt_derive::mgmt_error;
use std::borrow::Cow;

#[mgmt_error]
pub enum CallError {
    #[error("Call on {object}.{member} failed{}: {source}", format_context(.context))]
    Failed {
        object: Cow<'static, str>,
        member: Cow<'static, str>,
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },
}

fn main() {
    let err = CallError::Failed {
        object: "Destination:orders".into(),
        member: "pause".into(),
        source: std::io::Error::other("engine down"),
        context: None,
    };
    let err: Result<(), CallError> = Err(err);
    let err = err.context("invoke").unwrap_err();
    assert!(std::error::Error::source(&err).is_some());
}
