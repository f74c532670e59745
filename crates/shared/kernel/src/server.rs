//! In-process registry routing management calls by [`ObjectName`].

use crate::error::ServerError;
use crate::protocol::ManagementObject;
use fxhash::FxHashMap;
use mgmt_domain::descriptor::ObjectDescriptor;
use mgmt_domain::object_name::{DEFAULT_DOMAIN, ObjectName};
use mgmt_domain::value::{Attribute, AttributeList, Value};
use mgmt_events::{NotificationFilter, NotificationListener, SubscriptionId};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

type Objects = FxHashMap<ObjectName, Arc<dyn ManagementObject>>;

/// Thread-safe table of registered management objects.
///
/// Cloning is cheap; clones share the same table.
#[derive(Clone)]
pub struct ObjectServer {
    domain: Arc<str>,
    objects: Arc<RwLock<Objects>>,
}

impl Default for ObjectServer {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectServer {
    /// A server whose default domain is the broker's.
    #[must_use]
    pub fn new() -> Self {
        Self::with_domain(DEFAULT_DOMAIN)
    }

    pub fn with_domain(domain: impl Into<Arc<str>>) -> Self {
        Self { domain: domain.into(), objects: Arc::new(RwLock::new(FxHashMap::default())) }
    }

    /// Domain given to names built with [`ObjectServer::qualify`].
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Moves `name` into this server's domain, keeping its key properties.
    #[must_use]
    pub fn qualify(&self, name: &ObjectName) -> ObjectName {
        name.clone().in_domain(&*self.domain)
    }

    /// Registers `object` under `name`.
    ///
    /// # Errors
    /// Returns [`ServerError::InstanceAlreadyExists`] if the name is taken.
    pub fn register(
        &self,
        name: ObjectName,
        object: Arc<dyn ManagementObject>,
    ) -> Result<(), ServerError> {
        let mut objects = self.objects.write();
        if objects.contains_key(&name) {
            return Err(ServerError::InstanceAlreadyExists { name, context: None });
        }
        debug!(
            name = %name,
            object = object.name(),
            access = %object.access(),
            "Management object registered"
        );
        objects.insert(name, object);
        Ok(())
    }

    /// Registers every entry, logging and skipping the ones that fail. Returns how many
    /// were registered.
    pub fn register_all<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (ObjectName, Arc<dyn ManagementObject>)>,
    {
        entries
            .into_iter()
            .filter(|(name, object)| match self.register(name.clone(), Arc::clone(object)) {
                Ok(()) => true,
                Err(err) => {
                    warn!(name = %name, cause = %err, "Management object registration skipped");
                    false
                },
            })
            .count()
    }

    /// Removes and returns the object registered under `name`.
    ///
    /// # Errors
    /// Returns [`ServerError::InstanceNotFound`] if nothing is registered under `name`.
    pub fn unregister(&self, name: &ObjectName) -> Result<Arc<dyn ManagementObject>, ServerError> {
        let removed = self.objects.write().remove(name);
        match removed {
            Some(object) => {
                debug!(name = %name, "Management object unregistered");
                Ok(object)
            },
            None => Err(not_found(name)),
        }
    }

    #[must_use]
    pub fn lookup(&self, name: &ObjectName) -> Option<Arc<dyn ManagementObject>> {
        self.objects.read().get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &ObjectName) -> bool {
        self.objects.read().contains_key(name)
    }

    /// Registered names matching `pattern`, in canonical order.
    #[must_use]
    pub fn query(&self, pattern: &ObjectName) -> Vec<ObjectName> {
        let mut names: Vec<ObjectName> =
            self.objects.read().keys().filter(|name| name.matches(pattern)).cloned().collect();
        names.sort_unstable();
        names
    }

    /// Every registered name, in canonical order.
    #[must_use]
    pub fn names(&self) -> Vec<ObjectName> {
        let mut names: Vec<ObjectName> = self.objects.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// # Errors
    /// Returns [`ServerError::InstanceNotFound`] for unknown names.
    pub fn describe(&self, name: &ObjectName) -> Result<Arc<ObjectDescriptor>, ServerError> {
        Ok(self.resolve(name)?.describe())
    }

    /// # Errors
    /// [`ServerError::InstanceNotFound`] for unknown names, otherwise the object's
    /// [`DispatchError`](crate::error::DispatchError) wrapped as [`ServerError::Dispatch`].
    pub fn get_attribute(&self, name: &ObjectName, attribute: &str) -> Result<Value, ServerError> {
        Ok(self.resolve(name)?.get_attribute(attribute)?)
    }

    /// # Errors
    /// Returns [`ServerError::InstanceNotFound`] for unknown names.
    pub fn get_attributes(
        &self,
        name: &ObjectName,
        attributes: &[&str],
    ) -> Result<AttributeList, ServerError> {
        Ok(self.resolve(name)?.get_attributes(attributes))
    }

    /// # Errors
    /// [`ServerError::InstanceNotFound`] for unknown names, otherwise the write's failure.
    pub fn set_attribute(&self, name: &ObjectName, attribute: Attribute) -> Result<(), ServerError> {
        Ok(self.resolve(name)?.set_attribute(attribute)?)
    }

    /// # Errors
    /// Returns [`ServerError::InstanceNotFound`] for unknown names.
    pub fn set_attributes(
        &self,
        name: &ObjectName,
        attributes: AttributeList,
    ) -> Result<AttributeList, ServerError> {
        Ok(self.resolve(name)?.set_attributes(attributes))
    }

    /// # Errors
    /// [`ServerError::InstanceNotFound`] for unknown names, otherwise the invocation's failure.
    pub fn invoke(
        &self,
        name: &ObjectName,
        operation: &str,
        params: Vec<Value>,
        signature: &[&str],
    ) -> Result<Option<Value>, ServerError> {
        Ok(self.resolve(name)?.invoke(operation, params, signature)?)
    }

    /// # Errors
    /// Returns [`ServerError::InstanceNotFound`] for unknown names.
    pub fn subscribe(
        &self,
        name: &ObjectName,
        listener: Arc<dyn NotificationListener>,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> Result<SubscriptionId, ServerError> {
        Ok(self.resolve(name)?.subscribe(listener, filter))
    }

    /// # Errors
    /// [`ServerError::InstanceNotFound`] for unknown names, [`ServerError::Notification`]
    /// for unknown subscriptions.
    pub fn unsubscribe(&self, name: &ObjectName, id: SubscriptionId) -> Result<(), ServerError> {
        Ok(self.resolve(name)?.unsubscribe(id)?)
    }

    fn resolve(&self, name: &ObjectName) -> Result<Arc<dyn ManagementObject>, ServerError> {
        self.lookup(name).ok_or_else(|| not_found(name))
    }
}

fn not_found(name: &ObjectName) -> ServerError {
    ServerError::InstanceNotFound { name: name.clone(), context: None }
}

impl fmt::Debug for ObjectServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectServer")
            .field("domain", &self.domain)
            .field("objects", &self.len())
            .finish()
    }
}
