//! Dispatch core of the broker management runtime.
//!
//! A facade implements [`Manageable`]: it declares its attributes, operations and
//! notifications and binds code to each of them in a [`Registry`]. Wrapping it in a
//! [`Dispatcher`] validates those bindings once and exposes the object by name, with the
//! capability tier fixed at the type level:
//!
//! ```rust,ignore
//! let destination = ReadWriteDispatcher::new(DestinationConfig::new(store, broadcaster))?;
//! destination.set_attribute(Attribute::new("MaxNumMsgs", 500_i64))?;
//! destination.invoke("pause", vec![], &[])?;
//! ```
//!
//! Connectors talk to the object-safe [`ManagementObject`] surface, usually through an
//! [`ObjectServer`] keyed by [`ObjectName`](mgmt_domain::object_name::ObjectName).
//!
//! ## Config loading
//! ```rust,no_run
//! use mgmt_kernel::config::load_management_config;
//!
//! let cfg = load_management_config(Some("config/mgmt.toml")).unwrap();
//! println!("serving domain {}", cfg.naming.domain);
//! ```

pub mod config;
pub mod contract;
pub mod dispatch;
pub mod error;
pub mod limits;
pub mod prelude;
pub mod protocol;
pub mod registry;
pub mod server;
mod translate;

pub use contract::Manageable;
pub use dispatch::{
    Access, Dispatcher, ReadOnly, ReadOnlyDispatcher, ReadWrite, ReadWriteDispatcher, Tier,
};
pub use error::{DispatchError, ErrorKind, ErrorReport, FacadeError, RegistrationError, ServerError};
pub use protocol::ManagementObject;
pub use registry::{Args, Registry};
pub use server::ObjectServer;

pub use mgmt_domain as domain;
pub use mgmt_events as events;
