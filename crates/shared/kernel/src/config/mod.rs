use config::{Config, Environment, File};
use mgmt_domain::config::ManagementConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Prefix of environment overrides, e.g. `MGMT__LOGGING__LEVEL=debug`.
pub const ENV_PREFIX: &str = "MGMT";

const DEFAULT_FILE: &str = "mgmt";

#[mgmt_derive::mgmt_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads a configuration from a base file overlaid with `MGMT__`-prefixed environment
/// variables. Nested keys use a double underscore: `MGMT__NAMING__DOMAIN` sets
/// `naming.domain`.
///
/// An explicit `path` must exist; without one the optional `mgmt.{toml,json,yaml,..}` in the
/// working directory is used when present.
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed,
/// or the merged values do not fit `T`.
///
/// # Example
/// ```rust
/// use mgmt_kernel::config::load_config;
/// use mgmt_kernel::domain::config::ManagementConfig;
///
/// let cfg: ManagementConfig = load_config(None::<&str>).unwrap_or_default();
/// assert!(cfg.notifications.channel_capacity > 0);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    load_layered(path, environment())
}

/// [`load_config`] for the runtime's own [`ManagementConfig`].
///
/// # Errors
/// See [`load_config`].
pub fn load_management_config(
    path: Option<impl AsRef<Path>>,
) -> Result<ManagementConfig, ConfigError> {
    load_config(path)
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn load_layered<T>(
    path: Option<impl AsRef<Path>>,
    environment: Environment,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let required = path.is_some();
    let effective_path =
        path.map_or_else(|| PathBuf::from(DEFAULT_FILE), |p| p.as_ref().to_path_buf());

    let builder = Config::builder()
        .add_source(File::from(effective_path.as_path()).required(required))
        .add_source(environment);

    info!(path = %effective_path.display(), required, "Loading management config");

    let config = builder
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgmt_domain::config::{LogFormat, LogRotation};
    use serial_test::serial;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    #[serial]
    fn loads_file_and_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "mgmt.toml",
            r#"
                [logging]
                level = "debug"
                format = "json"
                rotation = "never"

                [naming]
                domain = "test.broker"
            "#,
        );

        let cfg = load_management_config(Some(&path)).unwrap();
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.logging.rotation, LogRotation::Never);
        assert_eq!(cfg.naming.domain, "test.broker");
        assert_eq!(cfg.notifications.channel_capacity, 256);
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "mgmt.toml", "[logging]\nlevel = \"warn\"\n");
        let vars = config::Map::from([
            ("MGMT__LOGGING__LEVEL".to_owned(), "trace".to_owned()),
            ("OTHER__LOGGING__LEVEL".to_owned(), "off".to_owned()),
        ]);

        let cfg: ManagementConfig =
            load_layered(Some(&path), environment().source(Some(vars))).unwrap();
        assert_eq!(cfg.logging.level, "trace");
    }

    #[test]
    #[serial]
    fn explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_management_config(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to build config"), "{err}");
    }
}
