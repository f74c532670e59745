//! Per-subscription notification filters.

use fxhash::FxHashSet;
use mgmt_domain::notification::{Notification, types};

/// Decides whether a notification is delivered to one subscriber.
pub trait NotificationFilter: Send + Sync {
    fn is_enabled(&self, notification: &Notification) -> bool;
}

impl<F> NotificationFilter for F
where
    F: Fn(&Notification) -> bool + Send + Sync,
{
    fn is_enabled(&self, notification: &Notification) -> bool {
        self(notification)
    }
}

/// Passes notifications whose type starts with one of the enabled prefixes.
///
/// An empty filter passes nothing.
#[derive(Debug, Clone, Default)]
pub struct TypeFilter {
    prefixes: Vec<String>,
}

impl TypeFilter {
    #[must_use]
    pub const fn new() -> Self {
        Self { prefixes: Vec::new() }
    }

    /// Enables every type starting with `prefix` (`"mq.destination."` or a full type).
    pub fn enable_type(&mut self, prefix: impl Into<String>) -> &mut Self {
        let prefix = prefix.into();
        if !self.prefixes.contains(&prefix) {
            self.prefixes.push(prefix);
        }
        self
    }

    pub fn disable_type(&mut self, prefix: &str) -> &mut Self {
        self.prefixes.retain(|p| p != prefix);
        self
    }

    pub fn disable_all_types(&mut self) -> &mut Self {
        self.prefixes.clear();
        self
    }

    #[must_use]
    pub fn enabled_types(&self) -> &[String] {
        &self.prefixes
    }
}

impl NotificationFilter for TypeFilter {
    fn is_enabled(&self, notification: &Notification) -> bool {
        self.prefixes.iter().any(|p| notification.kind.starts_with(p.as_str()))
    }
}

/// Passes `jmx.attribute.change` notifications for enabled attribute names only.
#[derive(Debug, Clone, Default)]
pub struct AttributeChangeFilter {
    attributes: FxHashSet<String>,
}

impl AttributeChangeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable_attribute(&mut self, name: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into());
        self
    }

    pub fn disable_attribute(&mut self, name: &str) -> &mut Self {
        self.attributes.remove(name);
        self
    }

    pub fn disable_all_attributes(&mut self) -> &mut Self {
        self.attributes.clear();
        self
    }

    /// Enabled names, sorted.
    #[must_use]
    pub fn enabled_attributes(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.attributes.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl NotificationFilter for AttributeChangeFilter {
    fn is_enabled(&self, notification: &Notification) -> bool {
        notification.kind == types::ATTRIBUTE_CHANGE
            && self.attributes.iter().any(|a| notification.is_attribute_change_of(a))
    }
}
