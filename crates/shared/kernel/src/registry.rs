//! Explicit bindings from declared member names to facade code.
//!
//! A facade fills its [`Registry`] once, in [`Manageable::bind`](crate::Manageable::bind).
//! Typed helpers record the Rust-side type of each binding so the dispatcher can prove at
//! construction that it agrees with the declared metadata.

use crate::error::FacadeError;
use fxhash::FxHashMap;
use mgmt_domain::value::{Typed, Value, ValueType};
use std::fmt;

type GetterFn<T> = Box<dyn Fn(&T) -> Result<Value, FacadeError> + Send + Sync>;
type SetterFn<T> = Box<dyn Fn(&T, Value) -> Result<(), FacadeError> + Send + Sync>;
type OperationFn<T> =
    Box<dyn Fn(&T, &mut Args) -> Result<Option<Value>, FacadeError> + Send + Sync>;

pub(crate) struct GetterBinding<T> {
    /// `None` for dynamic getters, whose result type is checked per call.
    pub(crate) value_type: Option<ValueType>,
    pub(crate) call: GetterFn<T>,
}

pub(crate) struct SetterBinding<T> {
    pub(crate) value_type: Option<ValueType>,
    pub(crate) call: SetterFn<T>,
}

pub(crate) struct OperationBinding<T> {
    pub(crate) name: String,
    pub(crate) signature: Vec<ValueType>,
    pub(crate) call: OperationFn<T>,
}

/// Getter, setter and operation bindings of one facade type.
pub struct Registry<T> {
    pub(crate) getters: FxHashMap<String, GetterBinding<T>>,
    pub(crate) setters: FxHashMap<String, SetterBinding<T>>,
    pub(crate) operations: Vec<OperationBinding<T>>,
    pub(crate) duplicates: Vec<String>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            getters: FxHashMap::default(),
            setters: FxHashMap::default(),
            operations: Vec::new(),
            duplicates: Vec::new(),
        }
    }
}

impl<T: 'static> Registry<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the getter of attribute `name`; `V` must be the attribute's declared type.
    pub fn getter<V, F>(&mut self, name: &str, f: F) -> &mut Self
    where
        V: Typed,
        F: Fn(&T) -> Result<V, FacadeError> + Send + Sync + 'static,
    {
        let call: GetterFn<T> = Box::new(move |obj: &T| f(obj).map(Into::into));
        self.insert_getter(name, Some(V::VALUE_TYPE), call)
    }

    /// Binds a getter producing an untyped [`Value`]; its type is checked on every read.
    pub fn dynamic_getter<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: Fn(&T) -> Result<Value, FacadeError> + Send + Sync + 'static,
    {
        self.insert_getter(name, None, Box::new(f))
    }

    /// Binds the setter of attribute `name`; `V` must be the attribute's declared type.
    pub fn setter<V, F>(&mut self, name: &str, f: F) -> &mut Self
    where
        V: Typed,
        F: Fn(&T, V) -> Result<(), FacadeError> + Send + Sync + 'static,
    {
        let call: SetterFn<T> =
            Box::new(move |obj: &T, value: Value| f(obj, V::try_from(value)?));
        if self.setters.contains_key(name) {
            self.duplicates.push(name.to_owned());
        } else {
            self.setters
                .insert(name.to_owned(), SetterBinding { value_type: Some(V::VALUE_TYPE), call });
        }
        self
    }

    /// Binds one overload of operation `name`.
    ///
    /// `signature` must equal the declared parameter types. Arguments arrive already
    /// checked against it and are taken in order with [`Args::arg`].
    pub fn operation<F>(&mut self, name: &str, signature: &[ValueType], f: F) -> &mut Self
    where
        F: Fn(&T, &mut Args) -> Result<Option<Value>, FacadeError> + Send + Sync + 'static,
    {
        if self.operations.iter().any(|op| op.name == name && op.signature == signature) {
            self.duplicates.push(format!("{name}({})", join_types(signature)));
        } else {
            self.operations.push(OperationBinding {
                name: name.to_owned(),
                signature: signature.to_vec(),
                call: Box::new(f),
            });
        }
        self
    }

    fn insert_getter(
        &mut self,
        name: &str,
        value_type: Option<ValueType>,
        call: GetterFn<T>,
    ) -> &mut Self {
        if self.getters.contains_key(name) {
            self.duplicates.push(name.to_owned());
        } else {
            self.getters.insert(name.to_owned(), GetterBinding { value_type, call });
        }
        self
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut getters: Vec<&str> = self.getters.keys().map(String::as_str).collect();
        let mut setters: Vec<&str> = self.setters.keys().map(String::as_str).collect();
        getters.sort_unstable();
        setters.sort_unstable();
        let operations: Vec<String> = self
            .operations
            .iter()
            .map(|op| format!("{}({})", op.name, join_types(&op.signature)))
            .collect();

        f.debug_struct("Registry")
            .field("getters", &getters)
            .field("setters", &setters)
            .field("operations", &operations)
            .finish()
    }
}

/// Operation arguments, consumed front to back.
#[derive(Debug)]
pub struct Args {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Args {
    pub(crate) fn new(values: Vec<Value>) -> Self {
        Self { values: values.into_iter(), position: 0 }
    }

    /// Takes the next argument as `V`.
    ///
    /// # Errors
    /// Returns [`FacadeError::Internal`] when the arguments are exhausted and
    /// [`FacadeError::Domain`] when the next one is not a `V`.
    pub fn arg<V: Typed>(&mut self) -> Result<V, FacadeError> {
        let position = self.position;
        let value = self.values.next().ok_or_else(|| FacadeError::Internal {
            message: format!("missing argument #{position}").into(),
            context: None,
        })?;
        self.position += 1;
        Ok(V::try_from(value)?)
    }

    /// Arguments not yet taken.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

pub(crate) fn join_types(types: &[ValueType]) -> String {
    types.iter().map(|t| t.name()).collect::<Vec<_>>().join(", ")
}
