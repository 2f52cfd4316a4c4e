//! Process configuration, resolved once at startup.
//!
//! Request handlers never read the environment; they receive whatever store the
//! resolved [`StorageConfig`] produced.

use std::net::SocketAddr;

use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Which backend holds locations and items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Process-local tables (dev/test). Lost on restart.
    InMemory,
    Postgres { url: String, max_connections: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub storage: StorageConfig,
}

impl Config {
    /// Resolve configuration from process environment variables.
    ///
    /// - `STOCKROOM_BIND`: listen address (default `0.0.0.0:8080`)
    /// - `DATABASE_URL`: Postgres connection string; absent means in-memory storage
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default 5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = get("STOCKROOM_BIND")
            .unwrap_or_else(|| DEFAULT_BIND.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::Invalid {
                var: "STOCKROOM_BIND",
                reason: e.to_string(),
            })?;

        let storage = match get("DATABASE_URL") {
            None => StorageConfig::InMemory,
            Some(url) => {
                let max_connections = match get("DATABASE_MAX_CONNECTIONS") {
                    None => DEFAULT_MAX_CONNECTIONS,
                    Some(raw) => match raw.parse::<u32>() {
                        Ok(0) => {
                            return Err(ConfigError::Invalid {
                                var: "DATABASE_MAX_CONNECTIONS",
                                reason: "must be at least 1".to_string(),
                            });
                        }
                        Ok(n) => n,
                        Err(e) => {
                            return Err(ConfigError::Invalid {
                                var: "DATABASE_MAX_CONNECTIONS",
                                reason: e.to_string(),
                            });
                        }
                    },
                };
                StorageConfig::Postgres { url, max_connections }
            }
        };

        Ok(Self { bind_addr, storage })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn resolve(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_to_in_memory_on_port_8080() {
        let cfg = resolve(&[]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(cfg.storage, StorageConfig::InMemory);
    }

    #[test]
    fn database_url_selects_postgres() {
        let cfg = resolve(&[
            ("DATABASE_URL", "postgres://localhost/stockroom"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("STOCKROOM_BIND", "127.0.0.1:3000"),
        ])
        .unwrap();

        assert_eq!(cfg.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(
            cfg.storage,
            StorageConfig::Postgres {
                url: "postgres://localhost/stockroom".to_string(),
                max_connections: 12,
            }
        );
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let cfg = resolve(&[("DATABASE_URL", "  ")]).unwrap();
        assert_eq!(cfg.storage, StorageConfig::InMemory);
    }

    #[test]
    fn rejects_bad_values() {
        let err = resolve(&[("STOCKROOM_BIND", "localhost")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "STOCKROOM_BIND", .. }));

        let err = resolve(&[("DATABASE_URL", "postgres://x"), ("DATABASE_MAX_CONNECTIONS", "0")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DATABASE_MAX_CONNECTIONS", .. }));
    }
}
