use mgmt_domain::notification::Notification;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Receiving end of [`Broadcaster::channel`](crate::Broadcaster::channel).
pub type NotificationReceiver = broadcast::Receiver<Arc<Notification>>;

/// Ergonomic receiving for channels handed out by
/// [`Broadcaster::channel`](crate::Broadcaster::channel).
pub trait NotificationReceiverExt {
    /// Receive the next notification, skipping over lag; `None` once the channel is closed.
    fn next(&mut self) -> impl Future<Output = Option<Arc<Notification>>> + Send;
}

impl NotificationReceiverExt for NotificationReceiver {
    async fn next(&mut self) -> Option<Arc<Notification>> {
        let mut skipped = 0u64;

        loop {
            match self.recv().await {
                Ok(notification) => {
                    if skipped > 0 {
                        warn!(
                            source = %notification.source,
                            skipped,
                            "Notification receiver lagged; continuing from oldest retained"
                        );
                    }
                    return Some(notification);
                },
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    skipped = skipped.saturating_add(n);
                    debug!(skipped = n, total_skipped = skipped, "Notification receiver lagged");
                },
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
