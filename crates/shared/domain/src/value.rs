//! Typed management values.
//!
//! Every attribute, parameter and return value crossing the management surface is a
//! [`Value`]. Its [`ValueType`] is exact: an `Int` never satisfies a `long` declaration and
//! no widening or parsing happens anywhere in the runtime.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// Declared type of a managed attribute, parameter or return value.
///
/// The string form (`"int"`, `"string[]"`, ...) is what clients put into an invocation
/// signature; resolution compares those strings verbatim.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ValueType {
    Boolean,
    Int,
    Long,
    Double,
    String,
    #[serde(rename = "string[]")]
    #[strum(serialize = "string[]")]
    StringArray,
    Composite,
    List,
    /// Only meaningful as an operation return type.
    Void,
}

impl ValueType {
    /// The canonical type name used in signatures.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// A runtime management value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Boolean(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    String(String),
    #[serde(rename = "string[]")]
    StringArray(Vec<String>),
    Composite(BTreeMap<String, Value>),
    List(Vec<Value>),
}

impl Value {
    /// The exact type of this value.
    #[must_use]
    pub const fn value_type(&self) -> ValueType {
        match self {
            Self::Boolean(_) => ValueType::Boolean,
            Self::Int(_) => ValueType::Int,
            Self::Long(_) => ValueType::Long,
            Self::Double(_) => ValueType::Double,
            Self::String(_) => ValueType::String,
            Self::StringArray(_) => ValueType::StringArray,
            Self::Composite(_) => ValueType::Composite,
            Self::List(_) => ValueType::List,
        }
    }

    #[must_use]
    pub fn is(&self, expected: ValueType) -> bool {
        self.value_type() == expected
    }

    /// Extracts a typed value, failing with [`DomainError::TypeMismatch`] on any other variant.
    ///
    /// # Errors
    /// Returns [`DomainError::TypeMismatch`] if the value does not hold a `T`.
    pub fn extract<T: Typed>(self) -> Result<T, DomainError> {
        T::try_from(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::StringArray(v) => write!(f, "[{}]", v.join(", ")),
            Self::Composite(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}={v}")?;
                }
                f.write_str("}")
            },
            Self::List(items) => {
                f.write_str("[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            },
        }
    }
}

/// Rust types with a fixed management type.
///
/// Typed bindings use [`Typed::VALUE_TYPE`] to prove at registration time that a setter or
/// parameter accepts exactly the declared type.
pub trait Typed: Into<Value> + TryFrom<Value, Error = DomainError> {
    const VALUE_TYPE: ValueType;
}

macro_rules! typed_value {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }

        impl TryFrom<Value> for $ty {
            type Error = DomainError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::$variant(v) => Ok(v),
                    other => Err(DomainError::TypeMismatch {
                        expected: ValueType::$variant,
                        found: other.value_type(),
                        context: None,
                    }),
                }
            }
        }

        impl Typed for $ty {
            const VALUE_TYPE: ValueType = ValueType::$variant;
        }
    };
}

typed_value!(bool, Boolean);
typed_value!(i32, Int);
typed_value!(i64, Long);
typed_value!(f64, Double);
typed_value!(String, String);
typed_value!(Vec<String>, StringArray);
typed_value!(BTreeMap<String, Value>, Composite);
typed_value!(Vec<Value>, List);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

/// A named attribute value, the unit of batch reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    pub value: Value,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Ordered list of attributes; preserves request order like a batch result should.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeList(Vec<Attribute>);

impl AttributeList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, attribute: Attribute) {
        self.0.push(attribute);
    }

    /// First value recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|a| a.name == name).map(|a| &a.value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|a| a.name.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Value> {
        self.0.into_iter().map(|a| (a.name, a.value)).collect()
    }
}

impl FromIterator<Attribute> for AttributeList {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for AttributeList {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a AttributeList {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
