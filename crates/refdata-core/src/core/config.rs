//! Configuration for the reference data services
//!
//! Settings are layered: per-service defaults, then an optional TOML file,
//! then environment variables. The result is validated before use.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    GEO_DATABASE, GEO_DEFAULT_PORT, MEMORY_STORE_URI, TRIVIA_DATABASE, TRIVIA_DEFAULT_PORT,
};
use crate::types::{Error, Result};
use crate::log_warn;

/// Which service a configuration is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// Geographic reference API
    Geo,
    /// Trivia question service
    Trivia,
}

/// Available document store backends, selected by URI scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// In-memory store (`memory://`)
    Memory,
    /// MongoDB (`mongodb://` or `mongodb+srv://`)
    Mongo,
}

impl StoreBackend {
    /// Pick the backend for a connection URI
    pub fn from_uri(uri: &str) -> Result<Self> {
        if uri.starts_with(MEMORY_STORE_URI) {
            Ok(StoreBackend::Memory)
        } else if uri.starts_with("mongodb://") || uri.starts_with("mongodb+srv://") {
            Ok(StoreBackend::Mongo)
        } else {
            Err(Error::config(format!("Unsupported store URI: {}", uri)))
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line output
    Compact,
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Document store configuration
    pub store: StoreConfig,

    /// Upstream reference source (geo import only)
    pub upstream: UpstreamConfig,

    /// Static assets (trivia only)
    pub assets: AssetsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_addr: SocketAddr,
}

/// Document store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Connection URI; the scheme selects the backend
    pub uri: String,

    /// Database name
    pub database: String,

    /// Connection and server selection timeout in seconds
    pub connect_timeout_secs: u64,
}

/// Upstream reference source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the upstream API; empty when not configured
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Static asset configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// On-disk directory served instead of the bundled assets; must contain `default.html`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_dir: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format
    pub format: LogFormat,

    /// Include the event target in each line
    pub with_target: bool,
}

fn default_store_uri() -> String {
    if cfg!(feature = "mongo") {
        "mongodb://localhost:27017".to_string()
    } else {
        MEMORY_STORE_URI.to_string()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_store_uri(),
            database: GEO_DATABASE.to_string(),
            connect_timeout_secs: 10,
        }
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            with_target: false,
        }
    }
}

impl Config {
    /// Defaults for one service
    pub fn for_service(service: Service) -> Self {
        let (port, database) = match service {
            Service::Geo => (GEO_DEFAULT_PORT, GEO_DATABASE),
            Service::Trivia => (TRIVIA_DEFAULT_PORT, TRIVIA_DATABASE),
        };

        Self {
            server: ServerConfig {
                http_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            },
            store: StoreConfig {
                database: database.to_string(),
                ..StoreConfig::default()
            },
            upstream: UpstreamConfig::default(),
            assets: AssetsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration for `service` from defaults, an optional file and the environment
    pub fn load(service: Service, path: Option<&str>) -> Result<Self> {
        // Runs before the subscriber exists; callers log the source afterwards
        let mut config = match path {
            Some(path) => Self::from_file(service, path)?,
            None => Self::for_service(service),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Where [`Config::load`] took its settings from, for the startup log
    pub fn describe_source(path: Option<&str>) -> String {
        match path {
            Some(path) => format!("Loaded configuration from: {}", path),
            None => "No config file specified, using defaults".to_string(),
        }
    }

    /// Read a TOML file layered over the service defaults
    ///
    /// Keys missing from the file keep their default values.
    pub fn from_file(service: Service, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml_str(service, &contents)
    }

    /// Parse TOML text layered over the service defaults
    pub fn from_toml_str(service: Service, contents: &str) -> Result<Self> {
        let overlay: toml::Table = toml::from_str(contents)
            .map_err(|e| Error::config(format!("Failed to parse config file: {}", e)))?;

        let defaults = toml::to_string(&Self::for_service(service))
            .map_err(|e| Error::config(format!("Failed to encode default configuration: {}", e)))?;
        let mut merged: toml::Table = toml::from_str(&defaults)
            .map_err(|e| Error::config(format!("Failed to encode default configuration: {}", e)))?;
        merge_tables(&mut merged, overlay);

        let merged = toml::to_string(&merged)
            .map_err(|e| Error::config(format!("Invalid config file: {}", e)))?;
        toml::from_str(&merged).map_err(|e| Error::config(format!("Invalid config file: {}", e)))
    }

    /// Apply environment overrides
    ///
    /// `lookup` resolves a variable name to its value; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup("MONGO_URI") {
            self.store.uri = uri;
        }

        if let Some(database) = lookup("DATABASE_NAME") {
            self.store.database = database;
        }

        if let Some(base_url) = lookup("UPSTREAM_BASE_URL") {
            self.upstream.base_url = base_url;
        }

        if let Some(secs) = lookup("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = secs
                .parse()
                .map_err(|e| Error::config(format!("Invalid UPSTREAM_TIMEOUT_SECS: {}", e)))?;
        }

        if let Some(port) = lookup("PORT") {
            let port: u16 = port
                .parse()
                .map_err(|e| Error::config(format!("Invalid PORT: {}", e)))?;
            self.server.http_addr.set_port(port);
        }

        if let Some(dir) = lookup("STATIC_DIR") {
            self.assets.static_dir = Some(PathBuf::from(dir));
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        StoreBackend::from_uri(&self.store.uri)?;

        if self.store.database.trim().is_empty() {
            return Err(Error::config("Database name must not be empty"));
        }

        if self.store.connect_timeout_secs == 0 {
            return Err(Error::config("Store connect timeout must be positive"));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(Error::config("Upstream timeout must be positive"));
        }

        let base = &self.upstream.base_url;
        if !base.is_empty() && !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::config(format!("Upstream base URL must be http(s): {}", base)));
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(Error::config("Invalid log level")),
        }

        Ok(())
    }

    /// Store backend selected by the connection URI
    pub fn store_backend(&self) -> Result<StoreBackend> {
        StoreBackend::from_uri(&self.store.uri)
    }

    /// Upstream base URL, required for an import run
    pub fn require_upstream(&self) -> Result<&str> {
        let base = self.upstream.base_url.trim_end_matches('/');
        if base.is_empty() {
            log_warn!("UPSTREAM_BASE_URL is not set");
            return Err(Error::config("Upstream base URL is required for seeding"));
        }
        Ok(base)
    }

    /// Store connection timeout
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.store.connect_timeout_secs)
    }

    /// Upstream request timeout
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream.timeout_secs)
    }
}

/// Recursively overlay `overlay` onto `base`
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(existing)), toml::Value::Table(nested)) => {
                merge_tables(existing, nested);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}
