use crate::registry::Registry;
use mgmt_domain::descriptor::{AttributeDescriptor, NotificationDescriptor, OperationDescriptor};
use mgmt_domain::notification::NotificationPayload;
use mgmt_events::Broadcaster;
use std::borrow::Cow;

/// The capability contract every management facade implements.
///
/// A facade declares its metadata, binds an implementation for every declared member, and
/// owns the [`Broadcaster`] its notifications go through. Nothing is discovered by naming
/// convention: what is not declared and bound does not exist for management clients.
pub trait Manageable: Send + Sync + Sized + 'static {
    /// Human-readable description of the object.
    fn description(&self) -> Cow<'static, str>;

    /// Class name reported in the descriptor; defaults to the Rust type name.
    fn class_name(&self) -> Cow<'static, str> {
        Cow::Borrowed(short_type_name(std::any::type_name::<Self>()))
    }

    fn attributes(&self) -> Vec<AttributeDescriptor>;

    fn operations(&self) -> Vec<OperationDescriptor> {
        Vec::new()
    }

    fn notifications(&self) -> Vec<NotificationDescriptor> {
        Vec::new()
    }

    /// Registers the getters, setters and operations behind the declared members.
    fn bind(registry: &mut Registry<Self>);

    /// The broadcaster stamping this object's notifications; its source names the object.
    fn broadcaster(&self) -> &Broadcaster;

    /// Emits a notification through [`Manageable::broadcaster`]; returns its sequence number.
    fn notify(
        &self,
        kind: &str,
        message: Option<String>,
        payload: NotificationPayload,
    ) -> u64 {
        self.broadcaster().notify(kind, message, payload)
    }
}

/// Last path segment of a type name, without generic arguments.
fn short_type_name(full: &'static str) -> &'static str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
