use std::net::IpAddr;

use crate::audit::Blacklist;

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageBackend,
    pub max_connections: u32,
    pub host: IpAddr,
    pub port: u16,
    pub blacklist: Blacklist,
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    Postgres { database_url: String },
    /// Nothing survives a restart.
    Memory,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` reads the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_required = |key: &str| {
            lookup(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let storage = match env_or("ACTIONLOG_STORAGE", "postgres").as_str() {
            "postgres" => StorageBackend::Postgres {
                database_url: env_required("DATABASE_URL")?,
            },
            "memory" => StorageBackend::Memory,
            other => return Err(format!("Invalid ACTIONLOG_STORAGE: {other}")),
        };

        let max_connections: u32 = env_or("ACTIONLOG_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid ACTIONLOG_MAX_CONNECTIONS: {e}"))?;

        let host: IpAddr = env_or("ACTIONLOG_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ACTIONLOG_HOST: {e}"))?;

        let port: u16 = env_or("ACTIONLOG_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ACTIONLOG_PORT: {e}"))?;

        let blacklist = Blacklist::parse(&env_or("ACTIONLOG_BLACKLIST", ""));

        let log_level = env_or("ACTIONLOG_LOG_LEVEL", "info");

        Ok(Config {
            storage,
            max_connections,
            host,
            port,
            blacklist,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn postgres_is_the_default_and_needs_a_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(err.contains("DATABASE_URL"));

        let config = config_from(&[("DATABASE_URL", "postgres://localhost/actionlog")]).unwrap();
        assert_eq!(
            config.storage,
            StorageBackend::Postgres {
                database_url: "postgres://localhost/actionlog".to_string()
            }
        );
        assert_eq!(config.port, 3000);
        assert_eq!(config.max_connections, 10);
        assert!(config.blacklist.is_empty());
    }

    #[test]
    fn memory_storage_and_blacklist() {
        let config = config_from(&[
            ("ACTIONLOG_STORAGE", "memory"),
            ("ACTIONLOG_BLACKLIST", "SecretAction, Users.view,"),
        ])
        .unwrap();

        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.blacklist, Blacklist::new(["SecretAction", "Users.view"]));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("ACTIONLOG_STORAGE", "sqlite")]).unwrap_err().contains("ACTIONLOG_STORAGE"));
        assert!(
            config_from(&[("ACTIONLOG_STORAGE", "memory"), ("ACTIONLOG_PORT", "http")])
                .unwrap_err()
                .contains("ACTIONLOG_PORT")
        );
    }
}
