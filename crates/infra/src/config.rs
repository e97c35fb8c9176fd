//! Configuration loading and representation.
//!
//! Everything comes from environment variables. `from_lookup` takes any
//! key -> value function so parsing can be exercised without touching the
//! process environment.

use chrono::Duration;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_ITEMS_PER_PAGE: u32 = 30;
pub const DEFAULT_RETENTION_DAYS: i64 = 14;
pub const DEFAULT_COOKIE_MAX_AGE_DAYS: i64 = 14;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be {expected} (got '{value}')")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    /// `None` selects the in-memory collection.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub items_per_page: u32,
    /// Items last written longer ago than this are removed by the cleanup sweep.
    pub retention: Duration,
    pub cookie_max_age: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            retention: Duration::days(DEFAULT_RETENTION_DAYS),
            cookie_max_age: Duration::days(DEFAULT_COOKIE_MAX_AGE_DAYS),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let items_per_page = match get("ITEMS_PER_PAGE") {
            Some(v) => parse_positive("ITEMS_PER_PAGE", &v)?,
            None => defaults.items_per_page,
        };
        let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(v) => parse_positive("DATABASE_MAX_CONNECTIONS", &v)?,
            None => defaults.max_connections,
        };
        let retention = match get("RETENTION_DAYS") {
            Some(v) => Duration::days(parse_days("RETENTION_DAYS", &v)?),
            None => defaults.retention,
        };
        let cookie_max_age = match get("COOKIE_MAX_AGE_DAYS") {
            Some(v) => Duration::days(parse_days("COOKIE_MAX_AGE_DAYS", &v)?),
            None => defaults.cookie_max_age,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            database_url: get("DATABASE_URL"),
            max_connections,
            items_per_page,
            retention,
            cookie_max_age,
        })
    }
}

fn parse_positive(key: &'static str, value: &str) -> Result<u32, ConfigError> {
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "a positive integer",
            value: value.to_string(),
        }),
    }
}

fn parse_days(key: &'static str, value: &str) -> Result<i64, ConfigError> {
    match value.parse::<i64>() {
        Ok(n) if (0..=36_500).contains(&n) => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            expected: "a number of days between 0 and 36500",
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/stockroom"),
            ("ITEMS_PER_PAGE", "50"),
            ("RETENTION_DAYS", "7"),
        ])
        .unwrap();

        assert_eq!(cfg.database_url.as_deref(), Some("postgres://localhost/stockroom"));
        assert_eq!(cfg.items_per_page, 50);
        assert_eq!(cfg.retention, Duration::days(7));
        assert_eq!(cfg.cookie_max_age, Duration::days(14));
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        assert_eq!(config(&[("DATABASE_URL", "  ")]).unwrap().database_url, None);
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = config(&[("ITEMS_PER_PAGE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "ITEMS_PER_PAGE", .. }));
    }

    #[test]
    fn rejects_garbage_retention() {
        assert!(config(&[("RETENTION_DAYS", "two weeks")]).is_err());
    }
}
