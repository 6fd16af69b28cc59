//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `zabdash.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

use zabdash_adapter_zabbix_reqwest::ZabbixConfig;
use zabdash_domain::settings::RefreshInterval;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Zabbix API connection.
    pub zabbix: ZabbixConfig,
    /// Device poller settings.
    pub poller: PollerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Device poller configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Initial refresh interval; the dashboard can change it at runtime.
    pub refresh_seconds: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `zabdash.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("zabdash.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("ZABDASH_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("ZABDASH_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("ZABDASH_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("ZABDASH_ZABBIX_URL") {
            self.zabbix.url = val;
        }
        if let Some(val) = var("ZABDASH_ZABBIX_USER") {
            self.zabbix.basic_auth_user = Some(val);
        }
        if let Some(val) = var("ZABDASH_ZABBIX_PASSWORD") {
            self.zabbix.basic_auth_password = Some(val);
        }
        if let Some(seconds) = var("ZABDASH_REFRESH_SECONDS").and_then(|val| val.parse().ok()) {
            self.poller.refresh_seconds = seconds;
        }
        if let Some(val) = var("ZABDASH_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.zabbix.url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "zabbix.url must not be empty".to_string(),
            ));
        }
        if self.zabbix.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "zabbix.timeout_secs must be positive".to_string(),
            ));
        }
        if self.poller.refresh_seconds == 0 {
            return Err(ConfigError::Validation(
                "poller.refresh_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Initial polling interval.
    #[must_use]
    pub fn refresh_interval(&self) -> RefreshInterval {
        RefreshInterval::from_secs(self.poller.refresh_seconds).unwrap_or_default()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            refresh_seconds: RefreshInterval::DEFAULT_SECONDS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "zabdashd=info,zabdash=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
