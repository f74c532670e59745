//! Notification events emitted by management objects.

use crate::value::{Value, ValueType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Standard notification type strings used by broker facades.
pub mod types {
    pub const ATTRIBUTE_CHANGE: &str = "jmx.attribute.change";

    pub const BROKER_QUIESCE_START: &str = "mq.broker.quiesce.start";
    pub const BROKER_QUIESCE_COMPLETE: &str = "mq.broker.quiesce.complete";
    pub const BROKER_SHUTDOWN_START: &str = "mq.broker.shutdown.start";
    pub const BROKER_RESOURCE_STATE_CHANGE: &str = "mq.broker.resource.state.change";

    pub const CLUSTER_BROKER_JOIN: &str = "mq.cluster.broker.join";
    pub const CLUSTER_BROKER_DOWN: &str = "mq.cluster.broker.down";

    pub const CONNECTION_OPEN: &str = "mq.connection.open";
    pub const CONNECTION_CLOSE: &str = "mq.connection.close";
    pub const CONNECTION_REJECT: &str = "mq.connection.reject";

    pub const DESTINATION_CREATE: &str = "mq.destination.create";
    pub const DESTINATION_DESTROY: &str = "mq.destination.destroy";
    pub const DESTINATION_PAUSE: &str = "mq.destination.pause";
    pub const DESTINATION_RESUME: &str = "mq.destination.resume";
    pub const DESTINATION_PURGE: &str = "mq.destination.purge";
    pub const DESTINATION_COMPACT: &str = "mq.destination.compact";

    pub const SERVICE_PAUSE: &str = "mq.service.pause";
    pub const SERVICE_RESUME: &str = "mq.service.resume";

    pub const TRANSACTION_COMMIT: &str = "mq.transaction.commit";
    pub const TRANSACTION_ROLLBACK: &str = "mq.transaction.rollback";
    pub const TRANSACTION_PREPARE: &str = "mq.transaction.prepare";
}

/// Event-specific data carried by a [`Notification`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotificationPayload {
    #[default]
    None,
    AttributeChange {
        attribute: String,
        attribute_type: ValueType,
        old_value: Value,
        new_value: Value,
    },
    /// Free-form fields: destination name/type, pause type, connection id, ...
    Properties(BTreeMap<String, Value>),
}

impl NotificationPayload {
    /// Builds a [`NotificationPayload::Properties`] from `(key, value)` pairs.
    pub fn properties<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self::Properties(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Looks up a field of a [`NotificationPayload::Properties`] payload.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Properties(map) => map.get(key),
            _ => None,
        }
    }
}

/// A stamped event as delivered to subscribers.
///
/// `sequence` is assigned by the emitting object's broadcaster: the first notification of
/// an object carries 0 and each later one the previous value plus one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: String,
    pub source: String,
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
    pub payload: NotificationPayload,
}

impl Notification {
    /// Whether this is a `jmx.attribute.change` event for `attribute`.
    #[must_use]
    pub fn is_attribute_change_of(&self, attribute: &str) -> bool {
        matches!(&self.payload, NotificationPayload::AttributeChange { attribute: a, .. } if a == attribute)
    }
}
