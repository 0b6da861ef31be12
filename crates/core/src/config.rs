//! Application configuration loaded from disk and the environment.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::discovery::{
    Credentials, DiscoverCredentials, ProcessDiscovery, RegionPolicy, StaticCredentials,
    DEFAULT_PROCESS_NAME,
};

/// Directory under the user config dir holding our files.
pub const APP_DIR: &str = "lcu-companion";
/// Name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";
/// Prefix for environment overrides, e.g. `LCU_COMPANION__REQUEST_TIMEOUT_SECS`.
pub const ENV_PREFIX: &str = "LCU_COMPANION";

const MIN_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 30;

const DEFAULT_CONFIG: &str = r#"# lcu-companion configuration

# Name of the League client process whose launch arguments carry the credentials.
# process_name = "LeagueClientUx.exe"

# Timeout for every request to the local client API, in seconds (10-30).
request_timeout_secs = 10

# "optional": a missing --rso_platform_id is tolerated.
# "required": discovery fails without it.
region_policy = "optional"

# Explicit credentials bypass process discovery when port and token are both set.
# port = 56737
# token = ""
# region = "HN1"

# Also write logs to ./logs/lcu-companion.log
log_to_file = false
"#;

/// Runtime settings for discovery, the HTTP gateway and logging.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Process whose command line is inspected for credentials.
    pub process_name: String,
    /// Gateway timeout; clamped to 10-30 seconds when applied.
    pub request_timeout_secs: u64,
    /// Whether the region flag must be present.
    pub region_policy: RegionPolicy,
    /// Port override.
    pub port: Option<u16>,
    /// Token override.
    pub token: Option<String>,
    /// Region override.
    pub region: Option<String>,
    /// Mirror log output into a file.
    pub log_to_file: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            process_name: DEFAULT_PROCESS_NAME.to_string(),
            request_timeout_secs: MIN_TIMEOUT_SECS,
            region_policy: RegionPolicy::default(),
            port: None,
            token: None,
            region: None,
            log_to_file: false,
        }
    }
}

impl AppConfig {
    /// Load from the default location plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path())
    }

    /// Load from `path` (which may be absent) plus environment overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("failed to read configuration {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid configuration in {}", path.display()))
    }

    /// Gateway timeout within the supported range.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
        )
    }

    /// Credentials given explicitly in the configuration, if complete.
    pub fn credential_override(&self) -> Option<Credentials> {
        let port = self.port.filter(|port| *port > 0)?;
        let token = self.token.clone().filter(|token| !token.is_empty())?;
        Some(Credentials {
            port,
            token,
            region: self.region.clone().filter(|region| !region.is_empty()),
        })
    }

    /// Discovery strategy implied by this configuration.
    pub fn discovery(&self) -> Box<dyn DiscoverCredentials> {
        match self.credential_override() {
            Some(credentials) => {
                info!("using credentials from configuration");
                Box::new(StaticCredentials(credentials))
            }
            None => Box::new(ProcessDiscovery::system(
                self.process_name.clone(),
                self.region_policy,
            )),
        }
    }
}

/// Directory holding the configuration file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Full path of the configuration file.
pub fn config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE)
}

/// Write the commented default configuration if none exists yet.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = config_path();
    ensure_default_config_at(&path)?;
    Ok(path)
}

/// Like [`ensure_default_config`] for an explicit path. Returns whether a file
/// was written.
pub fn ensure_default_config_at(path: impl AsRef<Path>) -> Result<bool> {
    let path = path.as_ref();
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!("wrote default configuration to {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_file_round_trips_to_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join("nested").join(CONFIG_FILE);

        assert!(ensure_default_config_at(&path)?);
        assert!(!ensure_default_config_at(&path)?, "existing file is kept");

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.process_name, DEFAULT_PROCESS_NAME);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.region_policy, RegionPolicy::Optional);
        assert!(config.credential_override().is_none());
        Ok(())
    }

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let temp = tempdir()?;
        let config = AppConfig::load_from(temp.path().join(CONFIG_FILE))?;
        assert_eq!(config.request_timeout_secs, 10);
        assert!(!config.log_to_file);
        Ok(())
    }

    #[test]
    fn file_values_override_defaults() -> Result<()> {
        let temp = tempdir()?;
        let path = temp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
process_name = "LeagueClientUx"
request_timeout_secs = 90
region_policy = "required"
port = 56737
token = "abc-1"
region = "HN1"
"#,
        )?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.process_name, "LeagueClientUx");
        assert_eq!(config.region_policy, RegionPolicy::Required);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));

        let credentials = config.credential_override().expect("override");
        assert_eq!(credentials.port, 56737);
        assert_eq!(credentials.token, "abc-1");
        assert_eq!(credentials.region.as_deref(), Some("HN1"));
        assert_eq!(config.discovery().discover().unwrap(), credentials);
        Ok(())
    }

    #[test]
    fn incomplete_override_is_ignored() {
        let config = AppConfig {
            port: Some(56737),
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(config.credential_override().is_none());
    }
}
