use crate::object_name::DEFAULT_DOMAIN;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level management runtime configuration.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ManagementConfigInner {
    pub logging: LoggingConfig,
    pub notifications: NotificationConfig,
    pub naming: NamingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct ManagementConfig {
    #[serde(flatten, default)]
    inner: Arc<ManagementConfigInner>,
}

impl Deref for ManagementConfig {
    type Target = ManagementConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ManagementConfig {
    fn deref_mut(&mut self) -> &mut ManagementConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Output format of log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Rolling policy for file logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Minutely,
    Hourly,
    #[default]
    Daily,
    Never,
}

/// Logger settings; `path` enables the rolling file appender.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub name: String,
    pub level: String,
    pub console: bool,
    pub format: LogFormat,
    pub path: Option<PathBuf>,
    pub rotation: LogRotation,
    pub max_files: usize,
    pub env_filter: Option<String>,
}

/// Notification delivery settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Buffer size of channels handed out by the async bridge.
    pub channel_capacity: usize,
}

/// Object naming settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub domain: String,
}

// --- Default ---

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            name: "mgmt".to_owned(),
            level: "info".to_owned(),
            console: true,
            format: LogFormat::Compact,
            path: None,
            rotation: LogRotation::Daily,
            max_files: 10,
            env_filter: None,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self { channel_capacity: 256 }
    }
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self { domain: DEFAULT_DOMAIN.to_owned() }
    }
}
