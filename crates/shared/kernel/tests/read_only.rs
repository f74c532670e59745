pub mod fixtures;

use fixtures::{DestinationConfig, OBJECT};
use mgmt_kernel::prelude::*;
use mgmt_kernel::{Access, ErrorKind};
use std::borrow::Cow;
use std::sync::Arc;

fn monitor() -> ReadOnlyDispatcher<DestinationConfig> {
    ReadOnlyDispatcher::new(DestinationConfig::new()).expect("valid facade")
}

#[test]
fn reads_return_declared_types() {
    let d = monitor();
    let descriptor = d.describe();

    for name in ["MaxNumMsgs", "Name", "LocalOnly"] {
        let declared = descriptor.attribute(name).unwrap().value_type;
        let value = d.get_attribute(name).unwrap();
        assert_eq!(value.value_type(), declared, "{name}");
    }
    assert_eq!(d.get_attribute("Name").unwrap(), Value::from("orders"));
}

#[test]
fn unknown_and_write_only_attributes_are_not_found() {
    let d = monitor();
    for name in ["UnknownAttr", "Password", "maxnummsgs"] {
        let err = d.get_attribute(name).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AttributeNotFound, "{name}");
        assert_eq!(err.object(), OBJECT);
        assert_eq!(err.member(), name);
    }
}

#[test]
fn wrongly_typed_getter_is_an_invocation_failure() {
    let err = monitor().get_attribute("Broken").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvocationFailure);
    assert!(matches!(err.cause(), Some(FacadeError::Internal { .. })));
}

#[test]
fn writes_are_rejected_without_touching_state() {
    let d = monitor();
    let object: &dyn ManagementObject = &d;
    assert_eq!(object.access(), Access::ReadOnly);

    let err = object.set_attribute(Attribute::new("MaxNumMsgs", 500_i64)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadOnlyViolation);
    let err = object.set_attribute(Attribute::new("UnknownAttr", 1_i64)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AttributeNotFound);

    let batch: AttributeList = [Attribute::new("MaxNumMsgs", 7_i64)].into_iter().collect();
    assert!(object.set_attributes(batch).is_empty());

    assert_eq!(d.object().stored_max(), 0);
    assert_eq!(d.object().setter_calls(), 0);
}

#[test]
fn describe_is_cached() {
    let d = monitor();
    let first = d.describe();
    assert!(Arc::ptr_eq(&first, &d.clone().describe()));
    assert_eq!(first.class_name, "DestinationConfig");
    assert_eq!(first.operations.len(), 8);
    assert!(first.emits(types::DESTINATION_PAUSE));
}

struct Probe {
    broadcaster: Broadcaster,
}

impl Manageable for Probe {
    fn description(&self) -> Cow<'static, str> {
        "Probe".into()
    }

    fn attributes(&self) -> Vec<AttributeDescriptor> {
        vec![AttributeDescriptor::read_only("Foo", ValueType::Int, "A number")]
    }

    fn bind(registry: &mut Registry<Self>) {
        registry.getter("Foo", |_: &Self| Ok(42_i32));
    }

    fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }
}

#[test]
fn batch_read_omits_unknown_members() {
    let d = ReadOnlyDispatcher::new(Probe { broadcaster: Broadcaster::new("Probe") }).unwrap();
    let list = d.get_attributes(&["Foo", "UnknownAttr"]);

    assert_eq!(list.len(), 1);
    assert_eq!(list.get("Foo"), Some(&Value::Int(42)));
    assert!(!list.contains("UnknownAttr"));
}

#[test]
fn batch_read_keeps_request_order_and_skips_failures() {
    let list = monitor().get_attributes(&["Name", "Broken", "MaxNumMsgs"]);
    assert_eq!(list.names().collect::<Vec<_>>(), ["Name", "MaxNumMsgs"]);
}
