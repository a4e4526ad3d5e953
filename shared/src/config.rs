//! Configuration management for the calendar service.
//!
//! Loading flow:
//! 1. Start with compiled [`Config::default()`]
//! 2. If the YAML file exists, merge its values over the defaults
//! 3. Apply `CALENDAR_*` environment overrides (highest priority)

use std::env;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Default location of the YAML configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "./config/config.yaml";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "CALENDAR_CONFIG";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Interface the HTTP listener binds to
    pub host: String,
    /// HTTP listener port
    pub port: u16,
    /// Database host
    pub db_host: String,
    /// Database port
    pub db_port: u16,
    /// Database name
    pub db_name: String,
    /// Database user
    pub db_user: String,
    /// Database password
    pub db_password: String,
    /// Upper bound on pooled connections
    pub db_max_connections: u32,
    /// Seconds to wait for a free pooled connection
    pub db_acquire_timeout_secs: u64,
    /// Full connection URL; takes precedence over the individual `db_*` fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4040,
            db_host: "localhost".to_string(),
            db_port: 5432,
            db_name: "calendar".to_string(),
            db_user: "postgres".to_string(),
            db_password: String::new(),
            db_max_connections: 5,
            db_acquire_timeout_secs: 3,
            database_url: None,
        }
    }
}

impl Config {
    /// Resolve the configuration file path, honouring `CALENDAR_CONFIG`.
    pub fn path() -> PathBuf {
        env::var(CONFIG_PATH_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }

    /// Load configuration from the default path with env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    /// Load configuration from a specific YAML file with env var overrides.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("CALENDAR_").ignore(&["config"]))
            .merge(Env::raw().only(&["database_url"]))
            .extract()?;
        Ok(config)
    }

    /// Address the HTTP listener binds to.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Connection URL for the database.
    pub fn database_url(&self) -> String {
        match &self.database_url {
            Some(url) => url.clone(),
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                self.db_user, self.db_password, self.db_host, self.db_port, self.db_name
            ),
        }
    }
}
