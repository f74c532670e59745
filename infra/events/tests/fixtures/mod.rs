use mgmt_domain::notification::Notification;
use mgmt_events::{ListenerError, NotificationListener};
use parking_lot::Mutex;
use std::sync::Arc;

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
