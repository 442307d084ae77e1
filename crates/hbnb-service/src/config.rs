//! Runtime configuration read from the environment (and `.env`)

use std::fmt;

use chrono::TimeDelta;
use thiserror::Error;

const DEV_SECRET: &str = "dev-secret-key";
const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
/// Longest accepted access token lifetime (one year)
const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "testing" | "test" => Ok(Self::Testing),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::Invalid {
                key: "HBNB_ENV",
                value: value.to_string(),
            }),
        }
    }

    fn default_database_url(self) -> &'static str {
        match self {
            Self::Production => "sqlite://production.db",
            _ => "sqlite://development.db",
        }
    }

    fn default_log_filter(self) -> &'static str {
        match self {
            Self::Development => "debug",
            _ => "info",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Sqlite,
}

impl StorageBackend {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::Invalid {
                key: "HBNB_STORAGE",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has an invalid value '{value}'")]
    Invalid { key: &'static str, value: String },

    #[error("{0} must be set in production")]
    Missing(&'static str),
}

#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub storage: StorageBackend,
    pub database_url: String,
    pub secret_key: String,
    /// Access token lifetime, within `1..=MAX_TOKEN_TTL_SECS` seconds
    pub token_ttl: TimeDelta,
    pub log_filter: String,
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("HBNB_ENV") {
            Some(value) => Environment::parse(&value)?,
            None => Environment::Development,
        };

        let storage = match lookup("HBNB_STORAGE") {
            Some(value) => StorageBackend::parse(&value)?,
            None if environment == Environment::Testing => StorageBackend::Memory,
            None => StorageBackend::Sqlite,
        };

        let database_url = lookup("DATABASE_URL")
            .unwrap_or_else(|| environment.default_database_url().to_string());

        let secret_key = match lookup("JWT_SECRET_KEY").filter(|s| !s.is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                return Err(ConfigError::Missing("JWT_SECRET_KEY"))
            }
            None => DEV_SECRET.to_string(),
        };

        let token_ttl_secs = match lookup("JWT_ACCESS_TOKEN_EXPIRES") {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|secs| (1..=MAX_TOKEN_TTL_SECS).contains(secs))
                .ok_or(ConfigError::Invalid {
                    key: "JWT_ACCESS_TOKEN_EXPIRES",
                    value,
                })?,
            None => DEFAULT_TOKEN_TTL_SECS,
        };
        let token_ttl = TimeDelta::try_seconds(token_ttl_secs).ok_or(ConfigError::Invalid {
            key: "JWT_ACCESS_TOKEN_EXPIRES",
            value: token_ttl_secs.to_string(),
        })?;

        let log_filter = lookup("HBNB_LOG")
            .unwrap_or_else(|| environment.default_log_filter().to_string());

        Ok(Self {
            environment,
            storage,
            database_url,
            secret_key,
            token_ttl,
            log_filter,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("storage", &self.storage)
            .field("database_url", &self.database_url)
            .field("secret_key", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("log_filter", &self.log_filter)
            .finish()
    }
}
