//! Configuration loaded from environment variables (and `.env`, if present).

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind (default: 0.0.0.0)
    pub host: IpAddr,

    /// Listening port (default: 8000)
    pub port: u16,

    /// SQLite database file (default: ./contacts.db)
    pub database_path: PathBuf,

    /// Directory holding the front end (default: ./public)
    pub public_dir: PathBuf,

    /// Pool size for the SQLite connection pool (default: number of CPUs)
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Optional environment variables:
    /// - `HOST`, `PORT`
    /// - `DATABASE_PATH`
    /// - `PUBLIC_DIR`
    /// - `DB_MAX_CONNECTIONS`
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let host = parse_or("HOST", &lookup, IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or("PORT", &lookup, 8000u16)?;
        let db_max_connections = parse_or("DB_MAX_CONNECTIONS", &lookup, num_cpus::get() as u32)?;
        if db_max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DB_MAX_CONNECTIONS".to_string(),
                reason: "Must be at least 1".to_string(),
            });
        }

        let database_path = lookup("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./contacts.db"));
        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("./public"));

        Ok(Self {
            host,
            port,
            database_path,
            public_dir,
            db_max_connections,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(var: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> ConfigResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
        assert_eq!(config.database_path, PathBuf::from("./contacts.db"));
        assert_eq!(config.public_dir, PathBuf::from("./public"));
        assert!(config.db_max_connections >= 1);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("PORT", "3000"),
            ("HOST", "127.0.0.1"),
            ("DATABASE_PATH", "/tmp/c.db"),
            ("DB_MAX_CONNECTIONS", "2"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.database_path, PathBuf::from("/tmp/c.db"));
        assert_eq!(config.db_max_connections, 2);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_zero_connections_rejected() {
        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
    }
}
