pub mod fixtures;

use fixtures::{DestinationConfig, OBJECT, Recorder};
use mgmt_kernel::events::{AttributeChangeFilter, NotificationReceiverExt, TypeFilter};
use mgmt_kernel::prelude::*;
use std::sync::Arc;

fn config() -> ReadWriteDispatcher<DestinationConfig> {
    ReadWriteDispatcher::new(DestinationConfig::new()).expect("valid facade")
}

#[test]
fn pause_emits_the_next_sequence_number() {
    let d = config();
    let recorder = Recorder::default();
    d.subscribe(recorder.clone(), None);

    d.set_attribute(Attribute::new("MaxNumMsgs", 100_i64)).unwrap();
    let previous = recorder.last().unwrap().sequence;

    d.invoke("pause", vec![], &[]).unwrap();
    let pause = recorder.last().unwrap();
    assert_eq!(pause.kind, types::DESTINATION_PAUSE);
    assert_eq!(pause.sequence, previous + 1);
    assert_eq!(pause.source, OBJECT);
    assert_eq!(pause.message.as_deref(), Some("paused ALL"));
}

#[test]
fn attribute_change_carries_old_and_new_values() {
    let d = config();
    let mut filter = AttributeChangeFilter::new();
    filter.enable_attribute("MaxNumMsgs");
    let recorder = Recorder::default();
    d.subscribe(recorder.clone(), Some(Arc::new(filter)));

    d.set_attribute(Attribute::new("MaxNumMsgs", 500_i64)).unwrap();
    d.invoke("pause", vec![], &[]).unwrap();
    let _ = d.set_attribute(Attribute::new("MaxNumMsgs", "abc"));

    assert_eq!(recorder.kinds(), [types::ATTRIBUTE_CHANGE]);
    let change = recorder.last().unwrap();
    assert!(change.is_attribute_change_of("MaxNumMsgs"));
    let NotificationPayload::AttributeChange { old_value, new_value, attribute_type, .. } =
        &change.payload
    else {
        panic!("unexpected payload {:?}", change.payload);
    };
    assert_eq!(*attribute_type, ValueType::Long);
    assert_eq!(*old_value, Value::Long(0));
    assert_eq!(*new_value, Value::Long(500));
}

#[test]
fn type_filter_selects_by_prefix() {
    let d = config();
    let mut filter = TypeFilter::new();
    filter.enable_type("mq.destination.");
    let recorder = Recorder::default();
    d.subscribe(recorder.clone(), Some(Arc::new(filter)));

    d.set_attribute(Attribute::new("MaxNumMsgs", 1_i64)).unwrap();
    d.invoke("pause", vec![Value::from("CONSUMERS")], &["string"]).unwrap();

    assert_eq!(recorder.kinds(), [types::DESTINATION_PAUSE]);
    assert_eq!(recorder.sequences(), [1]);
}

#[test]
fn unsubscribe_through_protocol_surface() {
    let d = config();
    let object: &dyn ManagementObject = &d;
    let recorder = Recorder::default();
    let id = object.subscribe(Arc::new(recorder.clone()), None);

    d.invoke("pause", vec![], &[]).unwrap();
    object.unsubscribe(id).unwrap();
    d.invoke("pause", vec![], &[]).unwrap();

    assert_eq!(recorder.sequences(), [0]);
    assert!(object.unsubscribe(id).is_err());
}

#[test]
fn failed_invocation_emits_nothing() {
    let d = config();
    let recorder = Recorder::default();
    d.subscribe(recorder.clone(), None);

    assert!(d.invoke("pause", vec![], &["string"]).is_err());
    assert!(d.invoke("compact", vec![], &[]).is_err());
    assert!(recorder.sequences().is_empty());
    assert_eq!(d.object().broadcaster().next_sequence(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn channel_bridge_delivers_dispatch_notifications() {
    let d = config();
    let (_, mut rx) = d.object().broadcaster().channel(8).unwrap();

    d.invoke("pause", vec![], &[]).unwrap();
    d.set_attribute(Attribute::new("MaxNumMsgs", 9_i64)).unwrap();

    let first = rx.next().await.unwrap();
    let second = rx.next().await.unwrap();
    assert_eq!(first.kind, types::DESTINATION_PAUSE);
    assert_eq!(second.kind, types::ATTRIBUTE_CHANGE);
    assert_eq!(second.sequence, first.sequence + 1);
}
