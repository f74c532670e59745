pub mod fixtures;

use fixtures::DestinationConfig;
use mgmt_kernel::prelude::*;
use mgmt_kernel::{Access, ErrorKind};

fn config() -> ReadWriteDispatcher<DestinationConfig> {
    ReadWriteDispatcher::new(DestinationConfig::new()).expect("valid facade")
}

#[test]
fn rejected_write_keeps_previous_value() {
    let d = config();
    d.set_attribute(Attribute::new("MaxNumMsgs", 500_i64)).unwrap();
    assert_eq!(d.get_attribute("MaxNumMsgs").unwrap(), Value::Long(500));

    let err = d.set_attribute(Attribute::new("MaxNumMsgs", "abc")).unwrap_err();
    assert_eq!(
        err,
        DispatchError::InvalidAttributeValue {
            object: "Destination:orders".to_owned(),
            member: "MaxNumMsgs".to_owned(),
            expected: ValueType::Long,
            found: ValueType::String,
            context: None,
        }
    );

    assert_eq!(d.get_attribute("MaxNumMsgs").unwrap(), Value::Long(500));
    assert_eq!(d.object().setter_calls(), 1, "type checks run before the setter");
}

#[test]
fn int_never_satisfies_long() {
    let d = config();
    let err = d.set_attribute(Attribute::new("MaxNumMsgs", 5_i32)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidAttributeValue);
    assert_eq!(d.object().stored_max(), 0);
}

#[test]
fn setter_rejection_is_translated() {
    let d = config();
    d.set_attribute(Attribute::new("MaxNumMsgs", 10_i64)).unwrap();

    let err = d.set_attribute(Attribute::new("MaxNumMsgs", -5_i64)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvocationFailure);
    let Some(FacadeError::Rejected { message, .. }) = err.cause() else {
        panic!("expected a rejection, got {err:?}");
    };
    assert!(message.contains("Please use a positive number or -1"), "{message}");
    assert_eq!(d.object().stored_max(), 10);

    d.set_attribute(Attribute::new("MaxNumMsgs", -1_i64)).unwrap();
    assert_eq!(d.object().stored_max(), -1);
}

#[test]
fn non_writable_and_unknown_attributes() {
    let d = config();
    let err = d.set_attribute(Attribute::new("Name", "other")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadOnlyViolation);
    assert_eq!(d.get_attribute("Name").unwrap(), Value::from("orders"));

    let err = d.set_attribute(Attribute::new("UnknownAttr", "x")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AttributeNotFound);
}

#[test]
fn write_only_attribute_accepts_writes() {
    let d = config();
    d.set_attribute(Attribute::new("Password", "s3cret")).unwrap();
    assert_eq!(d.object().password(), "s3cret");
    assert_eq!(d.get_attribute("Password").unwrap_err().kind(), ErrorKind::AttributeNotFound);
}

#[test]
fn batch_write_applies_members_independently() {
    let d = config();
    let request: AttributeList = [
        Attribute::new("MaxNumMsgs", 10_i64),
        Attribute::new("Password", "x"),
        Attribute::new("Name", "renamed"),
        Attribute::new("UnknownAttr", 1_i64),
        Attribute::new("MaxNumMsgs", "bad"),
    ]
    .into_iter()
    .collect();

    let applied = d.set_attributes(request);
    assert_eq!(applied.names().collect::<Vec<_>>(), ["MaxNumMsgs", "Password"]);
    assert_eq!(applied.get("MaxNumMsgs"), Some(&Value::Long(10)));
    assert_eq!(applied.get("Password"), Some(&Value::from("x")));
    assert_eq!(d.object().stored_max(), 10);
}

#[test]
fn protocol_surface_writes_on_read_write_tier() {
    let d = config();
    let object: &dyn ManagementObject = &d;
    assert_eq!(object.access(), Access::ReadWrite);

    object.set_attribute(Attribute::new("MaxNumMsgs", 42_i64)).unwrap();
    assert_eq!(object.get_attribute("MaxNumMsgs").unwrap(), Value::Long(42));
}

#[test]
fn error_report_is_serializable() {
    let err = config().set_attribute(Attribute::new("Name", "x")).unwrap_err();
    let report = err.report();
    assert_eq!(report.member, "Name");

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["kind"], "ReadOnlyViolation");
    assert_eq!(json["object"], "Destination:orders");
    assert_eq!(json["message"], err.to_string());
}
