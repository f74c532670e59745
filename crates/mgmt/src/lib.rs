//! Facade crate of the broker management runtime.
//! Re-exports the domain, kernel, event and logger crates and wires them together from a
//! single [`ManagementConfig`]. Keep this crate thin: it composes, it does not dispatch.
//!
//! ## Usage
//! ```rust,no_run
//! use mgmt::domain::config::ManagementConfig;
//!
//! let runtime = mgmt::init(&ManagementConfig::default()).unwrap();
//! assert!(runtime.server().is_empty());
//! ```

use mgmt_domain::config::{
    LogFormat as ConfigFormat, LogRotation, LoggingConfig, ManagementConfig,
};
use mgmt_events::{Broadcaster, NotificationError, NotificationReceiver, SubscriptionId};
use mgmt_kernel::config::{ConfigError, load_management_config};
use mgmt_kernel::server::ObjectServer;
use mgmt_logger::{LogFormat, Logger, LoggerError, Rotation, parse_level};
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

pub use mgmt_domain as domain;
pub use mgmt_events as events;
pub use mgmt_kernel as kernel;
pub use mgmt_logger as logger;

pub mod prelude {
    pub use mgmt_kernel::prelude::*;
    pub use mgmt_kernel::{ObjectServer, ReadOnly, ReadWrite};
}

#[mgmt_derive::mgmt_error]
pub enum InitError {
    #[error("Logger initialization failed{}: {source}", format_context(.context))]
    Logger { source: LoggerError, context: Option<Cow<'static, str>> },

    #[error("Configuration failed{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },
}

/// A running management runtime: the installed logger and the object server.
#[must_use = "Dropping the runtime stops background logging."]
#[derive(Debug)]
pub struct Runtime {
    config: ManagementConfig,
    server: ObjectServer,
    logger: Logger,
}

impl Runtime {
    #[must_use]
    pub const fn server(&self) -> &ObjectServer {
        &self.server
    }

    #[must_use]
    pub const fn logger(&self) -> &Logger {
        &self.logger
    }

    #[must_use]
    pub const fn config(&self) -> &ManagementConfig {
        &self.config
    }

    /// Opens an async notification channel on `broadcaster`, sized from
    /// `notifications.channel_capacity`.
    ///
    /// # Errors
    /// Returns [`NotificationError::InvalidCapacity`] if the configured capacity is zero.
    pub fn channel(
        &self,
        broadcaster: &Broadcaster,
    ) -> Result<(SubscriptionId, NotificationReceiver), NotificationError> {
        broadcaster.channel(self.config.notifications.channel_capacity)
    }
}

/// Installs the logger and creates the object server.
///
/// # Errors
/// Returns [`InitError::Logger`] if the logging settings are invalid or a global
/// subscriber is already installed.
pub fn init(config: &ManagementConfig) -> Result<Runtime, InitError> {
    let logger = init_logger(&config.logging).context("logging")?;
    let server = ObjectServer::with_domain(config.naming.domain.as_str());

    info!(
        domain = server.domain(),
        channel_capacity = config.notifications.channel_capacity,
        "Management runtime initialized"
    );

    Ok(Runtime { config: config.clone(), server, logger })
}

/// Loads the configuration (file plus `MGMT__` environment overrides), then calls [`init`].
///
/// # Errors
/// Returns [`InitError::Config`] if loading fails, otherwise see [`init`].
pub fn init_from_file(path: Option<impl AsRef<Path>>) -> Result<Runtime, InitError> {
    let config = load_management_config(path)?;
    init(&config)
}

/// Builds and installs the process-wide logger from `logging`.
///
/// # Errors
/// Returns [`LoggerError`] for an unknown level, an invalid filter, no enabled output, or a
/// subscriber that is already installed.
pub fn init_logger(logging: &LoggingConfig) -> Result<Logger, LoggerError> {
    let builder = Logger::builder()
        .name(logging.name.as_str())
        .level(parse_level(&logging.level)?)
        .console(logging.console)
        .format(log_format(logging.format));
    let builder = match &logging.env_filter {
        Some(filter) => builder.env_filter(filter.as_str()),
        None => builder,
    };

    match &logging.path {
        Some(path) => builder
            .path(path)
            .rotation(rotation(logging.rotation))
            .max_files(logging.max_files)
            .init(),
        None => builder.init(),
    }
}

const fn log_format(format: ConfigFormat) -> LogFormat {
    match format {
        ConfigFormat::Compact => LogFormat::Compact,
        ConfigFormat::Pretty => LogFormat::Pretty,
        ConfigFormat::Json => LogFormat::Json,
    }
}

const fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Minutely => Rotation::MINUTELY,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
        LogRotation::Never => Rotation::NEVER,
    }
}
