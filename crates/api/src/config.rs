//! Process configuration, read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `BIND_ADDR` | `0.0.0.0:8080` |
//! | `DATABASE_URL` | `sqlite://mechanic_shop.db` |
//! | `DATABASE_MAX_CONNECTIONS` | `5` |
//! | `USE_IN_MEMORY_STORE` | `false` |
//! | `LOG_FORMAT` | `json` |

use std::net::SocketAddr;

use mechanic_shop_observability::LogFormat;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://mechanic_shop.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid value for {var}: {message}")]
pub struct ConfigError {
    pub var: &'static str,
    pub message: String,
}

/// Which customer store backs the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Sqlite { url: String, max_connections: u32 },
    InMemory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub store: StoreConfig,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr = parse_var(&lookup, "BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let log_format = parse_var(&lookup, "LOG_FORMAT", "json")?;
        let use_in_memory: bool = parse_var(&lookup, "USE_IN_MEMORY_STORE", "false")?;

        let store = if use_in_memory {
            StoreConfig::InMemory
        } else {
            let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
            let max_connections: u32 = parse_var(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                &DEFAULT_MAX_CONNECTIONS.to_string(),
            )?;
            if max_connections == 0 {
                return Err(ConfigError {
                    var: "DATABASE_MAX_CONNECTIONS",
                    message: "must be at least 1".to_string(),
                });
            }
            StoreConfig::Sqlite {
                url,
                max_connections,
            }
        };

        Ok(Self {
            bind_addr,
            store,
            log_format,
        })
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(var).unwrap_or_else(|| default.to_string());
    raw.trim().parse::<T>().map_err(|e| ConfigError {
        var,
        message: format!("'{raw}': {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn defaults_use_sqlite_file_and_json_logs() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.store,
            StoreConfig::Sqlite {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            }
        );
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("BIND_ADDR", "127.0.0.1:5000"),
            ("DATABASE_URL", "sqlite:///var/lib/shop.db"),
            ("DATABASE_MAX_CONNECTIONS", "8"),
            ("LOG_FORMAT", "pretty"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr.port(), 5000);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.store,
            StoreConfig::Sqlite {
                url: "sqlite:///var/lib/shop.db".to_string(),
                max_connections: 8,
            }
        );
    }

    #[test]
    fn in_memory_store_can_be_selected() {
        let config = config_from(&[("USE_IN_MEMORY_STORE", "true")]).unwrap();
        assert_eq!(config.store, StoreConfig::InMemory);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = config_from(&[("BIND_ADDR", "not-an-addr")]).unwrap_err();
        assert_eq!(err.var, "BIND_ADDR");

        let err = config_from(&[("USE_IN_MEMORY_STORE", "yes")]).unwrap_err();
        assert_eq!(err.var, "USE_IN_MEMORY_STORE");

        let err = config_from(&[("DATABASE_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert_eq!(err.var, "DATABASE_MAX_CONNECTIONS");

        let err = config_from(&[("LOG_FORMAT", "xml")]).unwrap_err();
        assert!(err.to_string().contains("LOG_FORMAT"));
    }
}
