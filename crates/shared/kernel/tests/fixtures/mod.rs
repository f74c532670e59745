#![allow(dead_code, unreachable_pub)]

use mgmt_kernel::prelude::*;
use parking_lot::Mutex;
use std::borrow::Cow;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

pub const OBJECT: &str = "Destination:orders";

/// Destination facade exercising every binding shape the runtime supports.
#[derive(Debug)]
pub struct DestinationConfig {
    broadcaster: Broadcaster,
    max_num_msgs: AtomicI64,
    password: Mutex<String>,
    paused: Mutex<Option<String>>,
    setter_calls: AtomicUsize,
}

impl DestinationConfig {
    pub fn new() -> Self {
        Self {
            broadcaster: Broadcaster::new(OBJECT),
            max_num_msgs: AtomicI64::new(0),
            password: Mutex::new(String::new()),
            paused: Mutex::new(None),
            setter_calls: AtomicUsize::new(0),
        }
    }

    pub fn stored_max(&self) -> i64 {
        self.max_num_msgs.load(Ordering::SeqCst)
    }

    pub fn password(&self) -> String {
        self.password.lock().clone()
    }

    pub fn paused(&self) -> Option<String> {
        self.paused.lock().clone()
    }

    pub fn setter_calls(&self) -> usize {
        self.setter_calls.load(Ordering::SeqCst)
    }

    fn pause_with(&self, kind: &str) {
        *self.paused.lock() = Some(kind.to_owned());
        let message = Some(format!("paused {kind}"));
        self.notify(types::DESTINATION_PAUSE, message, NotificationPayload::None);
    }
}

impl Manageable for DestinationConfig {
    fn description(&self) -> Cow<'static, str> {
        "Destination configuration".into()
    }

    fn attributes(&self) -> Vec<AttributeDescriptor> {
        vec![
            AttributeDescriptor::read_write("MaxNumMsgs", ValueType::Long, "Maximum messages"),
            AttributeDescriptor::read_only("Name", ValueType::String, "Destination name"),
            AttributeDescriptor::read_only("LocalOnly", ValueType::Boolean, "Local delivery only")
                .boolean_accessor(),
            AttributeDescriptor::new(
                "Password",
                ValueType::String,
                "Write-only secret",
                AttributeAccess::WRITABLE,
            ),
            AttributeDescriptor::read_only("Broken", ValueType::String, "Wrongly typed getter"),
        ]
    }

    fn operations(&self) -> Vec<OperationDescriptor> {
        vec![
            OperationDescriptor::action("pause", "Pause all traffic"),
            OperationDescriptor::action("pause", "Pause by type").param(
                "pauseType",
                ValueType::String,
                "PRODUCERS, CONSUMERS or ALL",
            ),
            OperationDescriptor::new("resize", "Resize", ValueType::String, OperationImpact::Action)
                .param("size", ValueType::Int, ""),
            OperationDescriptor::new("resize", "Resize", ValueType::String, OperationImpact::Action)
                .param("size", ValueType::Long, ""),
            OperationDescriptor::new("getNumMsgs", "Limit", ValueType::Long, OperationImpact::Info),
            OperationDescriptor::action("purge", "Purge all messages"),
            OperationDescriptor::action("compact", "Compact the store"),
            OperationDescriptor::action("touch", "Returns a value although declared void"),
        ]
    }

    fn notifications(&self) -> Vec<NotificationDescriptor> {
        vec![NotificationDescriptor::new(
            [types::DESTINATION_PAUSE, types::ATTRIBUTE_CHANGE],
            "DestinationNotification",
            "Destination state changes",
        )]
    }

    fn bind(registry: &mut Registry<Self>) {
        registry
            .getter("MaxNumMsgs", |d: &Self| Ok(d.stored_max()))
            .setter("MaxNumMsgs", |d: &Self, value: i64| {
                d.setter_calls.fetch_add(1, Ordering::SeqCst);
                let value = ensure_neg_one_and_up("MaxNumMsgs", value)?;
                let old = d.max_num_msgs.swap(value, Ordering::SeqCst);
                d.broadcaster.attribute_changed(
                    "MaxNumMsgs",
                    ValueType::Long,
                    old.into(),
                    value.into(),
                );
                Ok(())
            })
            .getter("Name", |_: &Self| Ok("orders".to_owned()))
            .getter("LocalOnly", |_: &Self| Ok(true))
            .setter("Password", |d: &Self, value: String| {
                *d.password.lock() = value;
                Ok(())
            })
            .dynamic_getter("Broken", |_: &Self| Ok(Value::Int(7)))
            .operation("pause", &[], |d: &Self, _| {
                d.pause_with("ALL");
                Ok(None)
            })
            .operation("pause", &[ValueType::String], |d: &Self, args| {
                d.pause_with(&args.arg::<String>()?);
                Ok(None)
            })
            .operation("resize", &[ValueType::Int], |_: &Self, _| Ok(Some("int".into())))
            .operation("resize", &[ValueType::Long], |_: &Self, _| Ok(Some("long".into())))
            .operation("getNumMsgs", &[], |d: &Self, _| Ok(Some(Value::Long(d.stored_max()))))
            .operation("purge", &[], |_: &Self, _| {
                Err(FacadeError::unavailable("message store offline"))
            })
            .operation("compact", &[], |_: &Self, _| panic!("store corrupted"))
            .operation("touch", &[], |_: &Self, _| Ok(Some(Value::Boolean(true))));
    }

    fn broadcaster(&self) -> &Broadcaster {
        &self.broadcaster
    }
}

/// Collects every notification it receives.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl Recorder {
    pub fn sequences(&self) -> Vec<u64> {
        self.seen.lock().iter().map(|n| n.sequence).collect()
    }

    pub fn kinds(&self) -> Vec<String> {
        self.seen.lock().iter().map(|n| n.kind.clone()).collect()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().last().cloned()
    }
}

impl NotificationListener for Recorder {
    fn handle(&self, notification: &Notification) -> Result<(), ListenerError> {
        self.seen.lock().push(notification.clone());
        Ok(())
    }
}
