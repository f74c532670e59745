use super::tier::Access;
use crate::error::RegistrationError;
use crate::registry::{GetterBinding, OperationBinding, Registry, SetterBinding, join_types};
use fxhash::{FxHashMap, FxHashSet};
use mgmt_domain::descriptor::ObjectDescriptor;
use mgmt_domain::value::ValueType;

/// Bindings resolved against the descriptor; operations are indexed like
/// `ObjectDescriptor::operations`.
pub(super) struct Bindings<T> {
    pub(super) getters: FxHashMap<String, GetterBinding<T>>,
    pub(super) setters: FxHashMap<String, SetterBinding<T>>,
    pub(super) operations: Vec<OperationBinding<T>>,
}

pub(super) fn validate<T>(
    descriptor: &ObjectDescriptor,
    mut registry: Registry<T>,
    access: Access,
) -> Result<Bindings<T>, RegistrationError> {
    let class: &str = &descriptor.class_name;

    if let Some(member) = registry.duplicates.first() {
        return Err(RegistrationError::DuplicateBinding {
            class: class.to_owned(),
            member: member.clone(),
            context: None,
        });
    }

    let mut getters = FxHashMap::default();
    let mut setters = FxHashMap::default();
    let mut seen = FxHashSet::default();

    for attribute in &descriptor.attributes {
        let name: &str = &attribute.name;
        if !seen.insert(name) {
            return Err(RegistrationError::DuplicateAttribute {
                class: class.to_owned(),
                member: name.to_owned(),
                context: None,
            });
        }

        if attribute.is_boolean_accessor() && attribute.value_type != ValueType::Boolean {
            return Err(RegistrationError::InvalidBooleanAccessor {
                class: class.to_owned(),
                member: name.to_owned(),
                found: attribute.value_type,
                context: None,
            });
        }

        if attribute.is_readable() {
            let getter = registry.getters.remove(name).ok_or_else(|| {
                RegistrationError::MissingGetter {
                    class: class.to_owned(),
                    member: name.to_owned(),
                    context: Some("getter".into()),
                }
            })?;
            check_type(class, name, attribute.value_type, getter.value_type)?;
            getters.insert(name.to_owned(), getter);
        }

        if attribute.is_writable() {
            let setter = registry.setters.remove(name);
            match (access, setter) {
                (Access::ReadWrite, Some(setter)) => {
                    check_type(class, name, attribute.value_type, setter.value_type)?;
                    setters.insert(name.to_owned(), setter);
                },
                (Access::ReadWrite, None) => {
                    return Err(RegistrationError::MissingSetter {
                        class: class.to_owned(),
                        member: name.to_owned(),
                        context: None,
                    });
                },
                // The read-only tier never writes; a bound setter is simply unused.
                (Access::ReadOnly, _) => {},
            }
        }
    }

    let mut leftovers: Vec<&String> =
        registry.getters.keys().chain(registry.setters.keys()).collect();
    leftovers.sort_unstable();
    if let Some(member) = leftovers.first() {
        return Err(RegistrationError::UndeclaredBinding {
            class: class.to_owned(),
            member: (*member).clone(),
            context: Some("attribute".into()),
        });
    }

    let mut pending: Vec<Option<OperationBinding<T>>> =
        registry.operations.into_iter().map(Some).collect();
    let mut operations = Vec::with_capacity(descriptor.operations.len());

    for operation in &descriptor.operations {
        let declared: Vec<ValueType> = operation.parameters.iter().map(|p| p.value_type).collect();
        let binding = pending
            .iter_mut()
            .find(|slot| {
                matches!(slot, Some(b) if b.name == operation.name && b.signature == declared)
            })
            .and_then(Option::take)
            .ok_or_else(|| RegistrationError::MissingOperation {
                class: class.to_owned(),
                member: operation.name.to_string(),
                signature: join_types(&declared),
                context: None,
            })?;
        operations.push(binding);
    }

    if let Some(extra) = pending.into_iter().flatten().next() {
        return Err(RegistrationError::UndeclaredBinding {
            class: class.to_owned(),
            member: format!("{}({})", extra.name, join_types(&extra.signature)),
            context: Some("operation".into()),
        });
    }

    Ok(Bindings { getters, setters, operations })
}

fn check_type(
    class: &str,
    member: &str,
    declared: ValueType,
    bound: Option<ValueType>,
) -> Result<(), RegistrationError> {
    match bound {
        Some(found) if found != declared => Err(RegistrationError::BindingTypeMismatch {
            class: class.to_owned(),
            member: member.to_owned(),
            expected: declared,
            found,
            context: None,
        }),
        _ => Ok(()),
    }
}
