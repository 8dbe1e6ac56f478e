use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::auth::{password, token};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Where the credential store lives
#[derive(Clone, PartialEq)]
pub enum DatabaseConfig {
    Url(String),
    Parts {
        host: String,
        port: u16,
        user: String,
        password: Option<String>,
        database: String,
    },
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseConfig::Url(_) => f.write_str("Url(<redacted>)"),
            DatabaseConfig::Parts {
                host,
                port,
                user,
                database,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("database", database)
                .finish_non_exhaustive(),
        }
    }
}

/// Process configuration, read once at startup
#[derive(Clone)]
pub struct AppConfig {
    pub port: u16,
    pub jwt_secret: String,
    pub token_expiration_days: i64,
    pub bcrypt_cost: u32,
    /// `None` runs the server on the in-memory store
    pub database: Option<DatabaseConfig>,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field("jwt_secret", &"<redacted>")
            .field("token_expiration_days", &self.token_expiration_days)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("database", &self.database)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let jwt_secret = get("JWT_SECRET_TOKEN").ok_or(ConfigError::Missing("JWT_SECRET_TOKEN"))?;

        let port = parse_or(&get, "PORT", DEFAULT_PORT)?;
        let token_expiration_days =
            parse_or(&get, "TOKEN_EXPIRATION_DAYS", token::DEFAULT_EXPIRATION_DAYS)?;
        if !(1..=token::MAX_EXPIRATION_DAYS).contains(&token_expiration_days) {
            return Err(ConfigError::Invalid {
                key: "TOKEN_EXPIRATION_DAYS",
                value: token_expiration_days.to_string(),
            });
        }

        let bcrypt_cost = parse_or(&get, "BCRYPT_COST", password::DEFAULT_COST)?;
        if !(password::MIN_COST..=password::MAX_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        let database = match get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig::Url(url)),
            None => match (get("PG_HOST"), get("PG_USER"), get("PG_DATABASE")) {
                (Some(host), Some(user), Some(database)) => Some(DatabaseConfig::Parts {
                    host,
                    port: parse_or(&get, "PG_PORT", DEFAULT_PG_PORT)?,
                    user,
                    password: get("PG_PASSWORD"),
                    database,
                }),
                _ => None,
            },
        };

        Ok(Self {
            port,
            jwt_secret,
            token_expiration_days,
            bcrypt_cost,
            database,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
