//! Generic, tier-typed dispatch over a [`Manageable`] facade.
//!
//! A [`Dispatcher`] aggregates the facade's descriptors once, validates its [`Registry`]
//! against them and then serves reads, writes and invocations by name. Every failure is
//! translated into a [`DispatchError`]; facade errors and panics never reach the caller raw.

mod tier;
mod validate;

pub use tier::{Access, ReadOnly, ReadWrite, Tier};

use crate::contract::Manageable;
use crate::error::{DispatchError, ErrorKind, FacadeError, RegistrationError};
use crate::registry::{Args, Registry};
use crate::translate::{Phase, breach, failure, guarded};
use mgmt_domain::descriptor::{AttributeDescriptor, ObjectDescriptor, OperationDescriptor};
use mgmt_domain::value::{Attribute, AttributeList, Value, ValueType};
use mgmt_events::{
    NotificationError, NotificationFilter, NotificationListener, SubscriptionId,
};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};
use validate::{Bindings, validate};

struct DispatcherInner<T> {
    object: Arc<T>,
    name: String,
    descriptor: Arc<ObjectDescriptor>,
    bindings: Bindings<T>,
}

/// Name-based access to one management object.
///
/// The tier parameter decides at the type level whether writes exist: only
/// `Dispatcher<T, ReadWrite>` has [`set_attribute`](Dispatcher::set_attribute). Through the
/// [`ManagementObject`](crate::protocol::ManagementObject) surface a read-only dispatcher
/// answers every write with [`DispatchError::ReadOnlyViolation`].
///
/// Cloning is cheap and shares the object, its bindings and its broadcaster.
pub struct Dispatcher<T, A: Tier = ReadOnly> {
    inner: Arc<DispatcherInner<T>>,
    tier: PhantomData<A>,
}

pub type ReadOnlyDispatcher<T> = Dispatcher<T, ReadOnly>;
pub type ReadWriteDispatcher<T> = Dispatcher<T, ReadWrite>;

impl<T: Manageable, A: Tier> Dispatcher<T, A> {
    /// Wraps `object`, aggregating its descriptors and validating its bindings.
    ///
    /// # Errors
    /// Returns a [`RegistrationError`] if the bindings disagree with the declared members.
    pub fn new(object: T) -> Result<Self, RegistrationError> {
        Self::from_arc(Arc::new(object))
    }

    /// Same as [`Dispatcher::new`] for an object that is already shared.
    ///
    /// # Errors
    /// Returns a [`RegistrationError`] if the bindings disagree with the declared members.
    pub fn from_arc(object: Arc<T>) -> Result<Self, RegistrationError> {
        let descriptor = ObjectDescriptor {
            class_name: object.class_name(),
            description: object.description(),
            attributes: object.attributes(),
            operations: object.operations(),
            notifications: object.notifications(),
        };

        let mut registry = Registry::new();
        T::bind(&mut registry);
        let bindings = validate(&descriptor, registry, A::ACCESS)?;
        let name = object.broadcaster().source().to_owned();

        debug!(
            object = %name,
            class = %descriptor.class_name,
            access = %A::ACCESS,
            attributes = descriptor.attributes.len(),
            operations = descriptor.operations.len(),
            "Management object bound"
        );

        Ok(Self {
            inner: Arc::new(DispatcherInner {
                object,
                name,
                descriptor: Arc::new(descriptor),
                bindings,
            }),
            tier: PhantomData,
        })
    }

    /// The wrapped facade.
    #[must_use]
    pub fn object(&self) -> &Arc<T> {
        &self.inner.object
    }

    /// Object name used in errors and logs; the broadcaster's source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[must_use]
    pub const fn access(&self) -> Access {
        A::ACCESS
    }

    /// The descriptor aggregated at construction.
    #[must_use]
    pub fn describe(&self) -> Arc<ObjectDescriptor> {
        Arc::clone(&self.inner.descriptor)
    }

    /// Reads a readable attribute.
    ///
    /// # Errors
    /// [`DispatchError::AttributeNotFound`] if no readable attribute has this name,
    /// [`DispatchError::InvocationFailure`] if the getter fails or returns the wrong type.
    pub fn get_attribute(&self, name: &str) -> Result<Value, DispatchError> {
        let attribute = self
            .inner
            .descriptor
            .attribute(name)
            .filter(|a| a.is_readable())
            .ok_or_else(|| self.attribute_not_found(name))?;
        self.read(name, attribute, Phase::Get)
    }

    /// Best-effort batch read in request order; failing members are logged and omitted.
    pub fn get_attributes(&self, names: &[&str]) -> AttributeList {
        names
            .iter()
            .filter_map(|&name| match self.get_attribute(name) {
                Ok(value) => Some(Attribute::new(name, value)),
                Err(err) => {
                    log_omitted(&self.inner.name, name, "read", &err);
                    None
                },
            })
            .collect()
    }

    /// Invokes the first declared operation matching `name` and `signature` exactly.
    ///
    /// When nothing matches and `name` is `is<Attr>` for an attribute flagged as a boolean
    /// accessor, the attribute is read instead; that fallback takes no parameters and
    /// ignores `signature`.
    ///
    /// # Errors
    /// [`DispatchError::OperationNotFound`] if nothing resolves,
    /// [`DispatchError::InvocationFailure`] for argument mismatches, failures, panics and
    /// results that break the declared return type.
    pub fn invoke(
        &self,
        name: &str,
        params: Vec<Value>,
        signature: &[&str],
    ) -> Result<Option<Value>, DispatchError> {
        if let Some((index, operation)) = self.inner.descriptor.resolve_operation(name, signature)
        {
            return self.call(index, operation, params);
        }

        if let Some(attribute) = self.boolean_accessor(name) {
            if !params.is_empty() {
                let cause = FacadeError::rejected(format!(
                    "expected 0 arguments, got {}",
                    params.len()
                ));
                return Err(failure(&self.inner.name, name, Phase::Invoke, cause));
            }
            return self.read(name, attribute, Phase::Invoke).map(Some);
        }

        Err(DispatchError::OperationNotFound {
            object: self.inner.name.clone(),
            member: name.to_owned(),
            signature: signature.join(", "),
            context: None,
        })
    }

    /// Registers a listener on the object's broadcaster.
    pub fn subscribe<L>(
        &self,
        listener: L,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> SubscriptionId
    where
        L: NotificationListener + 'static,
    {
        self.inner.object.broadcaster().subscribe(listener, filter)
    }

    /// Removes a subscription made through [`Dispatcher::subscribe`] or the broadcaster.
    ///
    /// # Errors
    /// Returns [`NotificationError::ListenerNotFound`] for an unknown id.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<(), NotificationError> {
        self.inner.object.broadcaster().unsubscribe(id)
    }

    pub(crate) fn subscribe_arc(
        &self,
        listener: Arc<dyn NotificationListener>,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> SubscriptionId {
        self.inner.object.broadcaster().subscribe_arc(listener, filter)
    }

    /// Applies one write under this tier's rules.
    pub(crate) fn write(&self, attribute: Attribute) -> Result<(), DispatchError> {
        let Attribute { name, value } = attribute;
        let inner = &*self.inner;
        let declared =
            inner.descriptor.attribute(&name).ok_or_else(|| self.attribute_not_found(&name))?;

        if A::ACCESS == Access::ReadOnly || !declared.is_writable() {
            let context =
                if declared.is_writable() { "read-only object" } else { "read-only attribute" };
            return Err(DispatchError::ReadOnlyViolation {
                object: inner.name.clone(),
                member: name,
                context: Some(context.into()),
            });
        }

        if !value.is(declared.value_type) {
            return Err(DispatchError::InvalidAttributeValue {
                object: inner.name.clone(),
                member: name,
                expected: declared.value_type,
                found: value.value_type(),
                context: None,
            });
        }

        let setter = inner.bindings.setters.get(&name).ok_or_else(|| {
            breach(&inner.name, &name, Phase::Set, "no setter bound".to_owned())
        })?;
        guarded(&inner.name, &name, Phase::Set, || (setter.call)(&*inner.object, value))?;
        debug!(object = %inner.name, member = %name, "Attribute written");
        Ok(())
    }

    /// Applies each write independently; see [`Dispatcher::set_attributes`].
    pub(crate) fn write_all(&self, attributes: AttributeList) -> AttributeList {
        let mut applied = AttributeList::new();
        for attribute in attributes {
            let name = attribute.name.clone();
            let written = attribute.value.clone();
            if let Err(err) = self.write(attribute) {
                log_omitted(&self.inner.name, &name, "write", &err);
                continue;
            }

            let readable = self.inner.descriptor.attribute(&name).filter(|a| a.is_readable());
            let value = match readable.map(|a| self.read(&name, a, Phase::Get)) {
                Some(Ok(current)) => current,
                Some(Err(err)) => {
                    debug!(
                        object = %self.inner.name,
                        member = %name,
                        cause = %err,
                        "Read-back after write failed"
                    );
                    written
                },
                None => written,
            };
            applied.push(Attribute { name, value });
        }
        applied
    }

    fn read(
        &self,
        member: &str,
        attribute: &AttributeDescriptor,
        phase: Phase,
    ) -> Result<Value, DispatchError> {
        let inner = &*self.inner;
        let getter = inner
            .bindings
            .getters
            .get(&*attribute.name)
            .ok_or_else(|| breach(&inner.name, member, phase, "no getter bound".to_owned()))?;

        let value = guarded(&inner.name, member, phase, || (getter.call)(&*inner.object))?;
        if value.is(attribute.value_type) {
            Ok(value)
        } else {
            Err(breach(
                &inner.name,
                member,
                phase,
                format!("getter returned {}, declared {}", value.value_type(), attribute.value_type),
            ))
        }
    }

    fn call(
        &self,
        index: usize,
        operation: &OperationDescriptor,
        params: Vec<Value>,
    ) -> Result<Option<Value>, DispatchError> {
        let inner = &*self.inner;
        let member: &str = &operation.name;

        if params.len() != operation.parameters.len() {
            let cause = FacadeError::rejected(format!(
                "expected {} arguments, got {}",
                operation.parameters.len(),
                params.len()
            ));
            return Err(failure(&inner.name, member, Phase::Invoke, cause));
        }
        for (position, (param, value)) in operation.parameters.iter().zip(&params).enumerate() {
            if !value.is(param.value_type) {
                let cause = FacadeError::rejected(format!(
                    "argument #{position} '{}' expects {}, found {}",
                    param.name,
                    param.value_type,
                    value.value_type()
                ));
                return Err(failure(&inner.name, member, Phase::Invoke, cause));
            }
        }

        let binding = inner.bindings.operations.get(index).ok_or_else(|| {
            breach(&inner.name, member, Phase::Invoke, "no operation bound".to_owned())
        })?;
        let mut args = Args::new(params);
        let result =
            guarded(&inner.name, member, Phase::Invoke, || (binding.call)(&*inner.object, &mut args))?;

        match (operation.return_type, result) {
            (ValueType::Void, None) => Ok(None),
            (ValueType::Void, Some(value)) => Err(breach(
                &inner.name,
                member,
                Phase::Invoke,
                format!("void operation returned {}", value.value_type()),
            )),
            (declared, Some(value)) if value.is(declared) => Ok(Some(value)),
            (declared, Some(value)) => Err(breach(
                &inner.name,
                member,
                Phase::Invoke,
                format!("operation returned {}, declared {declared}", value.value_type()),
            )),
            (declared, None) => Err(breach(
                &inner.name,
                member,
                Phase::Invoke,
                format!("operation returned nothing, declared {declared}"),
            )),
        }
    }

    fn boolean_accessor(&self, name: &str) -> Option<&AttributeDescriptor> {
        name.strip_prefix("is")
            .and_then(|suffix| self.inner.descriptor.attribute(suffix))
            .filter(|a| a.is_boolean_accessor() && a.is_readable())
    }

    fn attribute_not_found(&self, name: &str) -> DispatchError {
        DispatchError::AttributeNotFound {
            object: self.inner.name.clone(),
            member: name.to_owned(),
            context: None,
        }
    }
}

impl<T: Manageable> Dispatcher<T, ReadWrite> {
    /// Writes one attribute.
    ///
    /// # Errors
    /// [`DispatchError::AttributeNotFound`] for undeclared names,
    /// [`DispatchError::ReadOnlyViolation`] for non-writable attributes,
    /// [`DispatchError::InvalidAttributeValue`] on a type mismatch and
    /// [`DispatchError::InvocationFailure`] if the setter fails. A rejected write leaves the
    /// object unchanged.
    pub fn set_attribute(&self, attribute: Attribute) -> Result<(), DispatchError> {
        self.write(attribute)
    }

    /// Applies each write independently, without atomicity.
    ///
    /// Returns the applied attributes with the value read back after the write, or the
    /// written value for write-only attributes. Failing members are logged and omitted.
    pub fn set_attributes(&self, attributes: AttributeList) -> AttributeList {
        self.write_all(attributes)
    }
}

/// Invocation failures were already logged when they were translated.
fn log_omitted(object: &str, member: &str, batch: &'static str, err: &DispatchError) {
    if err.kind() == ErrorKind::InvocationFailure {
        debug!(object, member, batch, cause = %err, "Attribute omitted from batch");
    } else {
        warn!(object, member, batch, cause = %err, "Attribute omitted from batch");
    }
}

impl<T, A: Tier> Clone for Dispatcher<T, A> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner), tier: PhantomData }
    }
}

impl<T, A: Tier> fmt::Debug for Dispatcher<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("name", &self.inner.name)
            .field("class", &self.inner.descriptor.class_name)
            .field("access", &A::ACCESS)
            .finish_non_exhaustive()
    }
}
