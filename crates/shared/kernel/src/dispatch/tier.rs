use private::Sealed;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Capability tier of a management object, as reported to clients.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Read-only tier: attributes are never written.
#[derive(Debug, Clone, Copy)]
pub struct ReadOnly;

/// Read-write tier: writable attributes accept type-checked writes.
#[derive(Debug, Clone, Copy)]
pub struct ReadWrite;

mod private {
    pub trait Sealed {}
}
impl Sealed for ReadOnly {}
impl Sealed for ReadWrite {}

/// Type-level capability tier of a [`Dispatcher`](super::Dispatcher).
pub trait Tier: Sealed + Send + Sync + 'static {
    const ACCESS: Access;
}

impl Tier for ReadOnly {
    const ACCESS: Access = Access::ReadOnly;
}

impl Tier for ReadWrite {
    const ACCESS: Access = Access::ReadWrite;
}
