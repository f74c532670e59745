//! Static metadata describing what a management object exposes.
//!
//! Descriptors are declared by each facade once and aggregated into an immutable
//! [`ObjectDescriptor`] when the object is wrapped for dispatch.

use crate::value::ValueType;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

type Text = Cow<'static, str>;

bitflags! {
    /// Access flags of a managed attribute.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AttributeAccess: u8 {
        const READABLE = 1 << 0;
        const WRITABLE = 1 << 1;
        /// Boolean attribute also reachable through `invoke("is<Name>")`.
        const IS = 1 << 2;

        const READ_WRITE = Self::READABLE.bits() | Self::WRITABLE.bits();
    }
}

/// A named, typed property with independent readable/writable flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: Text,
    pub value_type: ValueType,
    pub description: Text,
    pub access: AttributeAccess,
}

impl AttributeDescriptor {
    pub fn new(
        name: impl Into<Text>,
        value_type: ValueType,
        description: impl Into<Text>,
        access: AttributeAccess,
    ) -> Self {
        Self { name: name.into(), value_type, description: description.into(), access }
    }

    /// A readable, non-writable attribute.
    pub fn read_only(
        name: impl Into<Text>,
        value_type: ValueType,
        description: impl Into<Text>,
    ) -> Self {
        Self::new(name, value_type, description, AttributeAccess::READABLE)
    }

    /// A readable and writable attribute.
    pub fn read_write(
        name: impl Into<Text>,
        value_type: ValueType,
        description: impl Into<Text>,
    ) -> Self {
        Self::new(name, value_type, description, AttributeAccess::READ_WRITE)
    }

    /// Flags the attribute as a boolean `is` accessor.
    #[must_use]
    pub fn boolean_accessor(mut self) -> Self {
        self.access |= AttributeAccess::IS;
        self
    }

    #[must_use]
    pub const fn is_readable(&self) -> bool {
        self.access.contains(AttributeAccess::READABLE)
    }

    #[must_use]
    pub const fn is_writable(&self) -> bool {
        self.access.contains(AttributeAccess::WRITABLE)
    }

    #[must_use]
    pub const fn is_boolean_accessor(&self) -> bool {
        self.access.contains(AttributeAccess::IS)
    }
}

/// One parameter in an operation signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: Text,
    pub value_type: ValueType,
    pub description: Text,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<Text>, value_type: ValueType, description: impl Into<Text>) -> Self {
        Self { name: name.into(), value_type, description: description.into() }
    }
}

/// Advisory classification of an operation. Never enforced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationImpact {
    /// Read-like, returns information.
    Info,
    /// Changes state.
    #[default]
    Action,
    ActionInfo,
    Unknown,
}

/// A named, parameterized, possibly overloaded action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    pub name: Text,
    pub description: Text,
    pub parameters: Vec<ParameterDescriptor>,
    pub return_type: ValueType,
    pub impact: OperationImpact,
}

impl OperationDescriptor {
    pub fn new(
        name: impl Into<Text>,
        description: impl Into<Text>,
        return_type: ValueType,
        impact: OperationImpact,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
            return_type,
            impact,
        }
    }

    /// A parameterless `void` action.
    pub fn action(name: impl Into<Text>, description: impl Into<Text>) -> Self {
        Self::new(name, description, ValueType::Void, OperationImpact::Action)
    }

    /// Appends a parameter to the signature.
    #[must_use]
    pub fn param(
        mut self,
        name: impl Into<Text>,
        value_type: ValueType,
        description: impl Into<Text>,
    ) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, value_type, description));
        self
    }

    /// Declared parameter type names, in order.
    pub fn signature(&self) -> impl ExactSizeIterator<Item = &'static str> + '_ {
        self.parameters.iter().map(|p| p.value_type.name())
    }

    /// Exact signature match: same arity, and each type name equal to the requested string.
    #[must_use]
    pub fn accepts<S: AsRef<str>>(&self, signature: &[S]) -> bool {
        self.parameters.len() == signature.len()
            && self.signature().zip(signature).all(|(declared, requested)| declared == requested.as_ref())
    }
}

/// Describes the notifications an object may emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDescriptor {
    pub types: Vec<Text>,
    pub event_class: Text,
    pub description: Text,
}

impl NotificationDescriptor {
    pub fn new<I, T>(types: I, event_class: impl Into<Text>, description: impl Into<Text>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Text>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            event_class: event_class.into(),
            description: description.into(),
        }
    }
}

/// The full management interface of one object: built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectDescriptor {
    pub class_name: Text,
    pub description: Text,
    pub attributes: Vec<AttributeDescriptor>,
    pub operations: Vec<OperationDescriptor>,
    pub notifications: Vec<NotificationDescriptor>,
}

impl ObjectDescriptor {
    /// Declared attribute named `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// First operation, in declaration order, whose name and signature match exactly.
    #[must_use]
    pub fn resolve_operation<S: AsRef<str>>(
        &self,
        name: &str,
        signature: &[S],
    ) -> Option<(usize, &OperationDescriptor)> {
        self.operations.iter().enumerate().find(|(_, op)| op.name == name && op.accepts(signature))
    }

    /// All overloads declared under `name`.
    pub fn overloads<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a OperationDescriptor> {
        self.operations.iter().filter(move |op| op.name == name)
    }

    /// Whether any notification descriptor lists `kind`.
    #[must_use]
    pub fn emits(&self, kind: &str) -> bool {
        self.notifications.iter().any(|n| n.types.iter().any(|t| t == kind))
    }
}
