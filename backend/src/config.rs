//! Server configuration file support.
//!
//! Configuration is read from `dealership.toml` when one is found, falls back
//! to built-in defaults otherwise, and is finally overridden by environment
//! variables.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//! cors_origin = "http://localhost:5173"
//!
//! [auth]
//! jwt_secret = "change-me"
//! token_ttl_hours = 24
//! admin_password = "admin123"
//!
//! [analytics]
//! seed_mock_views = true
//! default_window_days = 30
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::db::seed::DEFAULT_ADMIN_PASSWORD;
use crate::models::view::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};

pub const CONFIG_FILE_NAME: &str = "dealership.toml";

/// Longest accepted token lifetime: one year.
pub const MAX_TOKEN_TTL_HOURS: i64 = 24 * 366;

/// Errors raised while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

/// Complete server configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    #[serde(default)]
    pub analytics: AnalyticsSettings,
}

/// Listener and CORS settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed browser origin. `None` or `"*"` allows any origin.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

/// Token and bootstrap credential settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,
    #[serde(default = "default_admin_password")]
    pub admin_password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Backfill synthetic view history at startup.
    #[serde(default = "default_true")]
    pub seed_mock_views: bool,
    #[serde(default = "default_window_days")]
    pub default_window_days: i64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_jwt_secret() -> String {
    "dealership-dev-secret".to_string()
}

fn default_token_ttl_hours() -> i64 {
    24
}

fn default_admin_password() -> String {
    DEFAULT_ADMIN_PASSWORD.to_string()
}

fn default_true() -> bool {
    true
}

fn default_window_days() -> i64 {
    DEFAULT_WINDOW_DAYS
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: None,
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
            admin_password: default_admin_password(),
        }
    }
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            seed_mock_views: default_true(),
            default_window_days: default_window_days(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file. Missing sections and keys take
    /// their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `dealership.toml` from the first standard location that has one.
    ///
    /// Searches the current directory, then `backend/`, then the parent
    /// directory. Returns `Ok(None)` when no file exists anywhere.
    pub fn from_default_location() -> Result<Option<Self>, ConfigError> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];

        for path in search_paths {
            if path.exists() {
                log::info!("Loading configuration from {}", path.display());
                return Self::from_file(&path).map(Some);
            }
        }
        Ok(None)
    }

    /// File (if any) plus environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_default_location()?.unwrap_or_default();
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `CORS_ORIGIN`, `JWT_SECRET`, `TOKEN_TTL_HOURS`,
    /// `ADMIN_PASSWORD` and `SEED_MOCK_VIEWS` from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_value("PORT", &port)?;
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            self.server.cors_origin = Some(origin);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("TOKEN_TTL_HOURS") {
            self.auth.token_ttl_hours = parse_value("TOKEN_TTL_HOURS", &ttl)?;
        }
        if let Some(password) = lookup("ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }
        if let Some(flag) = lookup("SEED_MOCK_VIEWS") {
            self.analytics.seed_mock_views = parse_flag("SEED_MOCK_VIEWS", &flag)?;
        }
        self.validate()
    }

    /// Range-check the time settings.
    ///
    /// `token_ttl_hours` must lie in `1..=MAX_TOKEN_TTL_HOURS` and
    /// `default_window_days` in `1..=MAX_WINDOW_DAYS`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_range(
            "token_ttl_hours",
            self.auth.token_ttl_hours,
            MAX_TOKEN_TTL_HOURS,
        )?;
        require_range(
            "default_window_days",
            self.analytics.default_window_days,
            MAX_WINDOW_DAYS,
        )
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn require_range(key: &str, value: i64, max: i64) -> Result<(), ConfigError> {
    if (1..=max).contains(&value) {
        return Ok(());
    }
    Err(ConfigError::InvalidValue {
        key: key.to_string(),
        value: format!("{} (expected 1..={})", value, max),
    })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}
