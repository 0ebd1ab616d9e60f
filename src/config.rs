//! Server configuration: defaults, optional TOML file, then environment.

use std::path::Path;
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Configuration for the game server.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    host: String,

    /// Port to bind.
    port: u16,

    /// SQLite database file.
    database_url: String,

    /// Public base URL used in the `location` of new games. May be empty.
    host_address: String,

    /// Connection attempts before startup gives up.
    connect_attempts: u32,

    /// Pause between connection attempts, in seconds.
    connect_retry_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "tictactoe.db".to_string(),
            host_address: String::new(),
            connect_attempts: 12,
            connect_retry_secs: 5,
        }
    }
}

impl ServerConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(port = config.port, "Config loaded successfully");
        Ok(config)
    }

    /// Applies `PORT`, `HOST_ADDR` and `DATABASE_URL` from the environment.
    ///
    /// An unparsable `PORT` is ignored with a warning.
    #[instrument(skip(self))]
    pub fn apply_env(self) -> Self {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides looked up through `var`.
    pub fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = var("PORT") {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => warn!(port = %port, "Invalid PORT in environment, keeping {}", self.port),
            }
        }
        if let Some(host_address) = var("HOST_ADDR") {
            self.host_address = host_address;
        }
        if let Some(database_url) = var("DATABASE_URL") {
            self.database_url = database_url;
        }
        self
    }

    /// Applies command-line overrides.
    pub fn apply_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
        host_address: Option<String>,
    ) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(host_address) = host_address {
            self.host_address = host_address;
        }
        self
    }

    /// Checks values that cannot be validated while parsing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `host_address` is neither empty nor an
    /// http(s) URL, or the database path is empty.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        let address = &self.host_address;
        if !address.is_empty() && !address.starts_with("http://") && !address.starts_with("https://") {
            return Err(ConfigError::new(format!("Invalid HOST_ADDR: '{}'", address)));
        }
        if self.database_url.is_empty() {
            return Err(ConfigError::new("Database path must not be empty".to_string()));
        }
        Ok(())
    }

    /// Pause between connection attempts.
    pub fn connect_retry_delay(&self) -> Duration {
        Duration::from_secs(self.connect_retry_secs)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
