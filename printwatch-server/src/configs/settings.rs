use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Config file consulted when no `--config` flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "configs/default.toml";

/// HTTP status surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 1337,
        }
    }
}

/// The monitored printer's TCP endpoint and poll cadence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Printer {
    pub host: String,
    pub port: u16,
    pub poll_interval_ms: u64,
}

impl Default for Printer {
    fn default() -> Self {
        Self {
            host: "192.168.1.75".into(),
            port: 8899,
            poll_interval_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Logger {
    pub level: String,
    /// Suppresses the per-frame status lines and send logs; warnings still
    /// get through.
    pub silent: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self {
            level: "info".into(),
            silent: false,
        }
    }
}

/// Immutable runtime configuration, constructed once at startup and shared
/// by reference. Flag overrides are folded in before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: Server,
    pub printer: Printer,
    pub logger: Logger,
}

/// Values taken from the command line that win over the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub poll_interval_ms: Option<u64>,
    pub api_port: Option<u16>,
    pub silent: bool,
}

impl Settings {
    /// Loads settings from `path`, or from [`DEFAULT_CONFIG_PATH`] when no
    /// path was given. An explicitly named file must exist; the default one
    /// may be absent, in which case built-in defaults apply.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path, true),
            None => (Path::new(DEFAULT_CONFIG_PATH), false),
        };

        if !required && !path.exists() {
            return Ok(Settings::default());
        }

        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.printer.host = host;
        }
        if let Some(port) = overrides.port {
            self.printer.port = port;
        }
        if let Some(interval) = overrides.poll_interval_ms {
            self.printer.poll_interval_ms = interval;
        }
        if let Some(port) = overrides.api_port {
            self.server.port = port;
        }
        if overrides.silent {
            self.logger.silent = true;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.printer.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidPollInterval);
        }
        if self.printer.port == 0 {
            return Err(ConfigError::InvalidPort { name: "printer" });
        }
        if self.server.port == 0 {
            return Err(ConfigError::InvalidPort { name: "server" });
        }
        Ok(())
    }
}
