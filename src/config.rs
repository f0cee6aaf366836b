//! Configuration management for the Contactos service.
//!
//! Loads settings from environment variables once at startup. A `.env` file in the
//! working directory is honored if present.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::fmt;
use std::str::FromStr;

/// Which document store backend to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// MongoDB reached through `connection_uri()`
    Mongo,
    /// In-process store, nothing persists past the process
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "memory" => Ok(Self::Memory),
            other => Err(format!("Must be 'mongo' or 'memory', got: {}", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mongo => write!(f, "mongo"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// Configuration for the Contactos service and its console client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment name (default: "development")
    pub env: String,

    /// Host the server listens on and the client connects to (default: "127.0.0.1")
    pub host: String,

    /// Port the server listens on (default: 3000)
    pub port: u16,

    /// Database user
    pub db_user: String,

    /// Database password
    pub db_password: String,

    /// Database host
    pub db_host: String,

    /// Database name
    pub db_name: String,

    /// Database port, only used with non-SRV schemes
    pub db_port: Option<u16>,

    /// Connection string scheme (default: "mongodb+srv")
    pub db_scheme: String,

    /// Store backend (default: mongo)
    pub store_backend: StoreBackend,

    /// Whether an empty listing is reported as not found (default: true)
    pub empty_list_is_not_found: bool,

    /// Log level used when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required when `STORE_BACKEND` is `mongo`:
    /// - `DB_USER`, `DB_PASSWORD`, `DB_HOST`, `DB_NAME`
    ///
    /// Optional:
    /// - `NODE_ENV` (default: "development")
    /// - `HOST` (default: "127.0.0.1")
    /// - `PORT` (default: 3000)
    /// - `DB_PORT`, `DB_SCHEME` (default: "mongodb+srv")
    /// - `STORE_BACKEND` (default: "mongo")
    /// - `EMPTY_LIST_IS_NOT_FOUND` (default: true)
    /// - `LOG_LEVEL` (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let store_backend = match env::var("STORE_BACKEND") {
            Ok(val) => val.parse().map_err(|reason| ConfigError::InvalidValue {
                var: "STORE_BACKEND".to_string(),
                reason,
            })?,
            Err(_) => StoreBackend::Mongo,
        };

        let required = store_backend == StoreBackend::Mongo;
        let db_user = Self::db_var("DB_USER", required)?;
        let db_password = Self::db_var("DB_PASSWORD", required)?;
        let db_host = Self::db_var("DB_HOST", required)?;
        let db_name = Self::db_var("DB_NAME", required)?;

        let db_port = match env::var("DB_PORT") {
            Ok(val) if !val.trim().is_empty() => Some(Self::parse_port("DB_PORT", &val)?),
            _ => None,
        };

        let (host, port) = Self::listen_from_env()?;
        let empty_list_is_not_found = Self::parse_env_bool("EMPTY_LIST_IS_NOT_FOUND", true)?;

        Ok(Config {
            env: env::var("NODE_ENV").unwrap_or_else(|_| "development".to_string()),
            host,
            port,
            db_user,
            db_password,
            db_host,
            db_name,
            db_port,
            db_scheme: env::var("DB_SCHEME").unwrap_or_else(|_| "mongodb+srv".to_string()),
            store_backend,
            empty_list_is_not_found,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Load only what the console client needs: `HOST` and `PORT`.
    ///
    /// Database variables are not read, so the client runs without credentials.
    pub fn client_from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        let (host, port) = Self::listen_from_env()?;
        Ok(Config {
            host,
            port,
            ..Config::default()
        })
    }

    fn listen_from_env() -> ConfigResult<(String, u16)> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("PORT") {
            Ok(val) => Self::parse_port("PORT", &val)?,
            Err(_) => 3000,
        };
        Ok((host, port))
    }

    /// Connection string for the document store.
    ///
    /// Credentials, host and database name are percent-encoded.
    pub fn connection_uri(&self) -> String {
        self.build_uri(&urlencoding::encode(&self.db_password))
    }

    /// Connection string with the password masked, safe to log.
    pub fn redacted_uri(&self) -> String {
        self.build_uri("****")
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Base URL of the contacts API as seen by the console client.
    pub fn api_base_url(&self) -> String {
        format!("http://{}:{}/api/v1/contactos", self.host, self.port)
    }

    fn build_uri(&self, password: &str) -> String {
        let mut host = urlencoding::encode(&self.db_host).into_owned();
        if let Some(port) = self.db_port {
            if !self.db_scheme.ends_with("+srv") {
                host = format!("{}:{}", host, port);
            }
        }

        format!(
            "{}://{}:{}@{}/{}",
            self.db_scheme,
            urlencoding::encode(&self.db_user),
            password,
            host,
            urlencoding::encode(&self.db_name)
        )
    }

    /// Read a database variable, failing only when it is required and missing.
    fn db_var(var_name: &str, required: bool) -> ConfigResult<String> {
        match env::var(var_name) {
            Ok(val) if !val.trim().is_empty() => Ok(val),
            _ if required => Err(ConfigError::MissingVar(var_name.to_string())),
            _ => Ok(String::new()),
        }
    }

    fn parse_port(var_name: &str, val: &str) -> ConfigResult<u16> {
        val.trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a port number between 0-65535, got: {}", val),
            })
    }

    /// Parse an environment variable as bool with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            env: "development".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_user: String::new(),
            db_password: String::new(),
            db_host: String::new(),
            db_name: String::new(),
            db_port: None,
            db_scheme: "mongodb+srv".to_string(),
            store_backend: StoreBackend::Mongo,
            empty_list_is_not_found: true,
            log_level: "info".to_string(),
        }
    }
}
