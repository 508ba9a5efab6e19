use std::{env, fmt};

use anyhow::{Context, Result};

pub struct DatabaseConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration through `lookup`, falling back to the default for
    /// every key that is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        let port = |key: &str, default: &str| -> Result<u16> {
            let raw = get(key, default);
            raw.parse()
                .with_context(|| format!("{key} must be a valid port, got {raw:?}"))
        };

        Ok(Config {
            database: DatabaseConfig {
                user: get("DB_USER", "root"),
                password: get("DB_PASSWORD", "password"),
                host: get("DB_HOST", "localhost"),
                port: port("DB_PORT", "3306")?,
                name: get("DB_NAME", "gorizon_db"),
            },
            server_port: port("SERVER_PORT", "8080")?,
        })
    }
}
