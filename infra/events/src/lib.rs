//! # Notifications
//!
//! The notification side of every management object: a [`Broadcaster`] that stamps events
//! with a per-object sequence number and a UTC timestamp and delivers them synchronously to
//! its subscribers.
//!
//! ## Features
//!
//! * **Ordered**: sequence numbers start at 0; one emitting thread yields consecutive numbers.
//! * **Isolated**: a failing or panicking listener is logged and skipped.
//! * **Filters**: [`TypeFilter`] by type prefix, [`AttributeChangeFilter`] by attribute name,
//!   or any `Fn(&Notification) -> bool`.
//! * **Async bridge**: [`Broadcaster::channel`] forwards into a `tokio` broadcast channel.
//!
//! # Example
//!
//! ```rust
//! use mgmt_events::{Broadcaster, NotificationError, NotificationReceiverExt};
//! use mgmt_domain::notification::{NotificationPayload, types};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), NotificationError> {
//!     let broadcaster = Broadcaster::new("Destination:orders");
//!     let (_id, mut rx) = broadcaster.channel(16)?;
//!
//!     broadcaster.notify(types::DESTINATION_PAUSE, None, NotificationPayload::None);
//!
//!     if let Some(n) = rx.next().await {
//!         assert_eq!(n.sequence, 0);
//!     }
//!     Ok(())
//! }
//! ```

mod broadcaster;
mod error;
mod filter;
mod listener;
mod receiver;

pub use broadcaster::{Broadcaster, panic_message};
pub use error::{NotificationError, NotificationErrorExt};
pub use filter::{AttributeChangeFilter, NotificationFilter, TypeFilter};
pub use listener::{ListenerError, ListenerErrorExt, NotificationListener, SubscriptionId};
pub use receiver::{NotificationReceiver, NotificationReceiverExt};
