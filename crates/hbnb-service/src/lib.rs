//! # HBnB Service
//!
//! Application facade, storage adapters and credential adapters for the
//! HBnB domain library.
//!
//! - `adapters`: in-memory and SQLite repositories, password hashing, tokens
//! - `application`: the [`Facade`], the single entry point for callers
//! - `models`: caller-supplied payloads
//! - `config` / `telemetry`: process setup for the `hbnb` binary

pub mod adapters;
pub mod application;
pub mod config;
pub mod models;
pub mod telemetry;

use std::sync::Arc;

pub use adapters::{HmacTokenIssuer, Pbkdf2Hasher, Repositories, TokenError};
pub use application::Facade;
pub use config::{Config, ConfigError, Environment, StorageBackend};

/// Token issuer configured from `JWT_SECRET_KEY` / `JWT_ACCESS_TOKEN_EXPIRES`
pub fn token_issuer(config: &Config) -> HmacTokenIssuer {
    HmacTokenIssuer::new(config.secret_key.clone(), config.token_ttl)
}

/// Wire repositories for the configured backend and build the facade
pub async fn build_facade(config: &Config) -> Result<Facade, sqlx::Error> {
    let repositories = match config.storage {
        StorageBackend::Memory => Repositories::in_memory(),
        StorageBackend::Sqlite => {
            let pool = adapters::sqlite::open(&config.database_url).await?;
            Repositories::sqlite(pool)
        }
    };

    tracing::debug!("Using {:?} storage", config.storage);

    Ok(Facade::new(
        repositories,
        Arc::new(Pbkdf2Hasher::new()),
        Arc::new(token_issuer(config)),
    ))
}
