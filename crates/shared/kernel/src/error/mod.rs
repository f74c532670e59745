//! Error taxonomy of the management runtime.
//!
//! [`FacadeError`] is what facade code returns; [`DispatchError`] is what management
//! clients see after translation; [`RegistrationError`] rejects a malformed facade at
//! construction; [`ServerError`] covers name-routed calls.

mod dispatch;
mod facade;
mod registration;
mod server;

pub use dispatch::{DispatchError, DispatchErrorExt, ErrorKind, ErrorReport};
pub use facade::{FacadeError, FacadeErrorExt};
pub use registration::{RegistrationError, RegistrationErrorExt};
pub use server::{ServerError, ServerErrorExt};
