//! Everything a facade module usually needs.

pub use crate::contract::Manageable;
pub use crate::dispatch::{ReadOnlyDispatcher, ReadWriteDispatcher};
pub use crate::error::{DispatchError, FacadeError, FacadeErrorExt};
pub use crate::limits::{ensure_neg_one_and_up, unlimited_from_zero};
pub use crate::protocol::ManagementObject;
pub use crate::registry::{Args, Registry};
pub use mgmt_domain::prelude::*;
pub use mgmt_events::{Broadcaster, ListenerError, NotificationListener};
