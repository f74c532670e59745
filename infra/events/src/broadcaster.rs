use crate::error::NotificationError;
use crate::filter::NotificationFilter;
use crate::listener::{ListenerError, NotificationListener, SubscriptionId};
use crate::receiver::NotificationReceiver;
use chrono::Utc;
use mgmt_domain::notification::{Notification, NotificationPayload, types};
use mgmt_domain::value::{Value, ValueType};
use parking_lot::{ReentrantMutex, RwLock};
use std::any::Any;
use std::borrow::Cow;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, trace, warn};

const MIN_CAPACITY: usize = 1;

#[derive(Clone)]
struct Subscription {
    id: SubscriptionId,
    listener: Arc<dyn NotificationListener>,
    filter: Option<Arc<dyn NotificationFilter>>,
}

struct BroadcasterInner {
    source: String,
    /// Held across stamping and delivery; re-entered by listeners that emit.
    emit: ReentrantMutex<()>,
    sequence: AtomicU64,
    next_id: AtomicU64,
    subscribers: RwLock<Vec<Subscription>>,
}

/// Stamps and fans out the notifications of one management object.
///
/// Every object owns exactly one broadcaster. Sequence numbers start at 0 and grow by one
/// per emitted notification for the broadcaster's lifetime. Emission is serialized per
/// broadcaster, so concurrent emitters never interleave and each subscriber sees the numbers
/// in order. Delivery is synchronous, in subscription order, over a snapshot of the
/// subscriber list, so listeners may subscribe, unsubscribe or emit from inside a callback.
///
/// Cloning is cheap and yields a handle to the same broadcaster.
#[derive(Clone)]
pub struct Broadcaster {
    inner: Arc<BroadcasterInner>,
}

impl Broadcaster {
    /// Creates a broadcaster whose notifications carry `source` (usually the object's name).
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(BroadcasterInner {
                source: source.into(),
                emit: ReentrantMutex::new(()),
                sequence: AtomicU64::new(0),
                next_id: AtomicU64::new(0),
                subscribers: RwLock::new(Vec::new()),
            }),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.inner.source
    }

    /// Sequence number the next notification will carry.
    #[must_use]
    pub fn next_sequence(&self) -> u64 {
        self.inner.sequence.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.read().len()
    }

    /// Registers a listener, optionally behind a filter.
    ///
    /// # Examples
    /// ```rust
    /// use mgmt_events::{Broadcaster, ListenerError};
    /// use mgmt_domain::notification::{Notification, NotificationPayload};
    ///
    /// let broadcaster = Broadcaster::new("Destination:orders");
    /// broadcaster.subscribe(|n: &Notification| -> Result<(), ListenerError> {
    ///     assert_eq!(n.sequence, 0);
    ///     Ok(())
    /// }, None);
    /// broadcaster.notify("mq.destination.pause", None, NotificationPayload::None);
    /// ```
    pub fn subscribe<L>(
        &self,
        listener: L,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> SubscriptionId
    where
        L: NotificationListener + 'static,
    {
        self.subscribe_arc(Arc::new(listener), filter)
    }

    /// Registers a shared listener without re-wrapping.
    pub fn subscribe_arc(
        &self,
        listener: Arc<dyn NotificationListener>,
        filter: Option<Arc<dyn NotificationFilter>>,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.subscribers.write().push(Subscription { id, listener, filter });
        debug!(source = %self.inner.source, subscription = %id, "Listener subscribed");
        id
    }

    /// Removes a subscription.
    ///
    /// # Errors
    /// Returns [`NotificationError::ListenerNotFound`] if `id` is not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> Result<(), NotificationError> {
        let removed = {
            let mut subscribers = self.inner.subscribers.write();
            let before = subscribers.len();
            subscribers.retain(|s| s.id != id);
            before != subscribers.len()
        };

        if removed {
            debug!(source = %self.inner.source, subscription = %id, "Listener unsubscribed");
            Ok(())
        } else {
            Err(NotificationError::ListenerNotFound {
                message: id.to_string().into(),
                context: Some(self.inner.source.clone().into()),
            })
        }
    }

    /// Stamps a notification with the next sequence number and the current time, then
    /// delivers it. Returns the sequence number used.
    pub fn notify(
        &self,
        kind: impl Into<String>,
        message: Option<String>,
        payload: NotificationPayload,
    ) -> u64 {
        let _emitting = self.inner.emit.lock();
        let sequence = self.inner.sequence.fetch_add(1, Ordering::AcqRel);
        let notification = Notification {
            kind: kind.into(),
            source: self.inner.source.clone(),
            sequence,
            timestamp: Utc::now(),
            message,
            payload,
        };
        self.deliver(&notification);
        sequence
    }

    /// Emits a `jmx.attribute.change` notification.
    pub fn attribute_changed(
        &self,
        attribute: impl Into<String>,
        attribute_type: ValueType,
        old_value: Value,
        new_value: Value,
    ) -> u64 {
        let attribute = attribute.into();
        let message = format!("{attribute} changed");
        self.notify(
            types::ATTRIBUTE_CHANGE,
            Some(message),
            NotificationPayload::AttributeChange { attribute, attribute_type, old_value, new_value },
        )
    }

    /// Bridges notifications into a `tokio` broadcast channel.
    ///
    /// The forwarding subscription is dropped on the first notification emitted after every
    /// receiver is gone.
    ///
    /// # Errors
    /// Returns [`NotificationError::InvalidCapacity`] if `capacity` is zero.
    pub fn channel(
        &self,
        capacity: usize,
    ) -> Result<(SubscriptionId, NotificationReceiver), NotificationError> {
        if capacity < MIN_CAPACITY {
            return Err(NotificationError::InvalidCapacity {
                message: format!("capacity must be >= {MIN_CAPACITY}").into(),
                context: Some(self.inner.source.clone().into()),
            });
        }
        let (tx, rx) = broadcast::channel(capacity);
        let id = self.subscribe(ChannelForwarder { tx }, None);
        Ok((id, rx))
    }

    fn deliver(&self, notification: &Notification) {
        let snapshot = self.inner.subscribers.read().clone();
        let mut disconnected = Vec::new();

        for subscription in &snapshot {
            if subscription.filter.as_ref().is_some_and(|f| !f.is_enabled(notification)) {
                continue;
            }

            let outcome =
                catch_unwind(AssertUnwindSafe(|| subscription.listener.handle(notification)));
            match outcome {
                Ok(Ok(())) => trace!(
                    source = %notification.source,
                    kind = %notification.kind,
                    sequence = notification.sequence,
                    subscription = %subscription.id,
                    "Notification delivered"
                ),
                Ok(Err(ListenerError::Disconnected { .. })) => disconnected.push(subscription.id),
                Ok(Err(err)) => warn!(
                    source = %notification.source,
                    kind = %notification.kind,
                    subscription = %subscription.id,
                    cause = %err,
                    "Notification listener failed"
                ),
                Err(panic) => warn!(
                    source = %notification.source,
                    kind = %notification.kind,
                    subscription = %subscription.id,
                    cause = %panic_message(panic.as_ref()),
                    "Notification listener panicked"
                ),
            }
        }

        if !disconnected.is_empty() {
            self.inner.subscribers.write().retain(|s| !disconnected.contains(&s.id));
            debug!(
                source = %notification.source,
                pruned = disconnected.len(),
                "Disconnected listeners removed"
            );
        }
    }
}

impl fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Broadcaster")
            .field("source", &self.inner.source)
            .field("next_sequence", &self.next_sequence())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

struct ChannelForwarder {
    tx: broadcast::Sender<Arc<Notification>>,
}

impl NotificationListener for ChannelForwarder {
    fn handle(&self, notification: &Notification) -> Result<(), ListenerError> {
        self.tx
            .send(Arc::new(notification.clone()))
            .map(|_| ())
            .map_err(|_| ListenerError::Disconnected { context: Some("all receivers dropped".into()) })
    }
}

/// Best-effort text of a panic payload.
#[must_use]
pub fn panic_message(payload: &(dyn Any + Send)) -> Cow<'static, str> {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        Cow::Borrowed(*s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        Cow::Owned(s.clone())
    } else {
        Cow::Borrowed("non-string panic payload")
    }
}
