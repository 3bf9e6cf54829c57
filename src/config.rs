//! Runtime settings read from the environment (and `.env`, loaded in `main`).

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://movie_database.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_TOP_MOVIES_LIMIT: u32 = 10;

/// Bot settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub telegram_bot_token: String,
    pub database_url: String,
    pub database_max_connections: u32,
    /// How many titles `/top` shows
    pub top_movies_limit: u32,
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let telegram_bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("TELEGRAM_BOT_TOKEN must be set")?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let database_max_connections = parse_or_default(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let top_movies_limit = parse_or_default(&lookup, "TOP_MOVIES_LIMIT", DEFAULT_TOP_MOVIES_LIMIT)?;

        if database_max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            telegram_bot_token,
            database_url,
            database_max_connections,
            top_movies_limit,
        })
    }
}

fn parse_or_default<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} must be a positive integer, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_applied() {
        let config = config_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]).unwrap();
        assert_eq!(config.telegram_bot_token, "123:abc");
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.database_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.top_movies_limit, 10);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("DATABASE_URL", "sqlite://other.db"),
            ("DATABASE_MAX_CONNECTIONS", "2"),
            ("TOP_MOVIES_LIMIT", " 25 "),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite://other.db");
        assert_eq!(config.database_max_connections, 2);
        assert_eq!(config.top_movies_limit, 25);
    }

    #[test]
    fn test_missing_token_is_an_error() {
        assert!(config_from(&[]).is_err());
        assert!(config_from(&[("TELEGRAM_BOT_TOKEN", "  ")]).is_err());
    }

    #[test]
    fn test_invalid_numbers_are_errors() {
        let err = config_from(&[("TELEGRAM_BOT_TOKEN", "t"), ("TOP_MOVIES_LIMIT", "ten")])
            .unwrap_err();
        assert!(err.to_string().contains("TOP_MOVIES_LIMIT"));

        assert!(config_from(&[("TELEGRAM_BOT_TOKEN", "t"), ("DATABASE_MAX_CONNECTIONS", "0")])
            .is_err());
    }
}
