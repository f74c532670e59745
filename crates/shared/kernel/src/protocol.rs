//! Object-safe surface consumed by connectors and the [`ObjectServer`](crate::server::ObjectServer).

use crate::contract::Manageable;
use crate::dispatch::{Access, Dispatcher, Tier};
use crate::error::DispatchError;
use mgmt_domain::descriptor::ObjectDescriptor;
use mgmt_domain::value::{Attribute, AttributeList, Value};
use mgmt_events::{NotificationError, NotificationFilter, NotificationListener, SubscriptionId};
use std::sync::Arc;

/// A management object as a remote client sees it, independent of facade type and tier.
pub trait ManagementObject: Send + Sync {
    /// Name the object reports in errors and notifications.
    fn name(&self) -> &str;

    fn access(&self) -> Access;

    fn describe(&self) -> Arc<ObjectDescriptor>;

    fn get_attribute(&self, name: &str) -> Result<Value, DispatchError>;

    fn get_attributes(&self, names: &[&str]) -> AttributeList;

    /// Read-only objects answer with `ReadOnlyViolation`, or `AttributeNotFound` for
    /// undeclared names.
    fn set_attribute(&self, attribute: Attribute) -> Result<(), DispatchError>;

    /// Read-only objects apply nothing, warn once per member and return an empty list.
    fn set_attributes(&self, attributes: AttributeList) -> AttributeList;

    fn invoke(
        &self,
        name: &str,
        params: Vec<Value>,
        signature: &[&str],
    ) -> Result<Option<Value>, DispatchError>;

    fn subscribe(
        &self,
        listener: Arc<dyn NotificationListener>,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> SubscriptionId;

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), NotificationError>;
}

impl<T: Manageable, A: Tier> ManagementObject for Dispatcher<T, A> {
    fn name(&self) -> &str {
        Self::name(self)
    }

    fn access(&self) -> Access {
        A::ACCESS
    }

    fn describe(&self) -> Arc<ObjectDescriptor> {
        Self::describe(self)
    }

    fn get_attribute(&self, name: &str) -> Result<Value, DispatchError> {
        Self::get_attribute(self, name)
    }

    fn get_attributes(&self, names: &[&str]) -> AttributeList {
        Self::get_attributes(self, names)
    }

    fn set_attribute(&self, attribute: Attribute) -> Result<(), DispatchError> {
        self.write(attribute)
    }

    fn set_attributes(&self, attributes: AttributeList) -> AttributeList {
        self.write_all(attributes)
    }

    fn invoke(
        &self,
        name: &str,
        params: Vec<Value>,
        signature: &[&str],
    ) -> Result<Option<Value>, DispatchError> {
        Self::invoke(self, name, params, signature)
    }

    fn subscribe(
        &self,
        listener: Arc<dyn NotificationListener>,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> SubscriptionId {
        self.subscribe_arc(listener, filter)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> Result<(), NotificationError> {
        Self::unsubscribe(self, id)
    }
}
