//! API server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use medix_core::{TaxRate, DEFAULT_EXPIRY_WINDOW_DAYS, MAX_EXPIRY_WINDOW_DAYS};
use serde::Serialize;

/// API server configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ApiConfig {
    /// HTTP listen port
    pub http_port: u16,

    /// Interface to bind
    pub bind_addr: String,

    /// SQLite file holding staff and the pharmacy profile
    pub database_path: String,

    /// Pool size for the SQLite connection pool
    pub db_max_connections: u32,

    /// Load the sample stock and bills on startup
    pub seed_sample_data: bool,

    /// "Expiring soon" window for stock reports, in days
    pub expiry_window_days: i64,

    /// Tax applied to bills that don't specify a rate
    pub default_tax_rate_bps: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            http_port: 3000,
            bind_addr: "0.0.0.0".to_string(),
            database_path: "./data/medix.db".to_string(),
            db_max_connections: 5,
            seed_sample_data: true,
            expiry_window_days: DEFAULT_EXPIRY_WINDOW_DAYS,
            default_tax_rate_bps: 0,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ApiConfig::default();

        let config = ApiConfig {
            http_port: parse_or(&lookup, "HTTP_PORT", defaults.http_port)?,

            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),

            database_path: lookup("DATABASE_PATH").unwrap_or(defaults.database_path),

            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.db_max_connections)?,

            seed_sample_data: parse_or(&lookup, "SEED_SAMPLE_DATA", defaults.seed_sample_data)?,

            expiry_window_days: parse_or(&lookup, "EXPIRY_WINDOW_DAYS", defaults.expiry_window_days)?,

            default_tax_rate_bps: parse_or(
                &lookup,
                "DEFAULT_TAX_RATE_BPS",
                defaults.default_tax_rate_bps,
            )?,
        };

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("DB_MAX_CONNECTIONS".to_string()));
        }
        if !(0..=MAX_EXPIRY_WINDOW_DAYS).contains(&config.expiry_window_days) {
            return Err(ConfigError::InvalidValue("EXPIRY_WINDOW_DAYS".to_string()));
        }
        if config.default_tax_rate_bps > 10_000 {
            return Err(ConfigError::InvalidValue("DEFAULT_TAX_RATE_BPS".to_string()));
        }

        Ok(config)
    }

    /// Socket address to listen on.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_addr, self.http_port)
            .parse()
            .map_err(|_| ConfigError::InvalidValue("BIND_ADDR".to_string()))
    }

    pub fn default_tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.default_tax_rate_bps)
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(name.to_string())),
        None => Ok(default),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.http_port, 3000);
        assert_eq!(config.database_path, "./data/medix.db");
        assert!(config.seed_sample_data);
        assert_eq!(config.expiry_window_days, 30);
        assert_eq!(config.listen_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("HTTP_PORT", "8080"),
            ("BIND_ADDR", "127.0.0.1"),
            ("SEED_SAMPLE_DATA", "false"),
            ("DEFAULT_TAX_RATE_BPS", "1200"),
        ])
        .unwrap();
        assert_eq!(config.listen_addr().unwrap().to_string(), "127.0.0.1:8080");
        assert!(!config.seed_sample_data);
        assert_eq!(config.default_tax_rate().bps(), 1200);
    }

    #[test]
    fn test_invalid_values() {
        let err = load(&[("HTTP_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name) if name == "HTTP_PORT"));

        assert!(load(&[("DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(load(&[("DEFAULT_TAX_RATE_BPS", "10001")]).is_err());
        assert!(load(&[("EXPIRY_WINDOW_DAYS", "-1")]).is_err());
        assert!(load(&[("EXPIRY_WINDOW_DAYS", "1000000000")]).is_err());
        assert!(load(&[("EXPIRY_WINDOW_DAYS", "36500")]).is_ok());

        let config = load(&[("BIND_ADDR", "not an ip")]).unwrap();
        assert!(config.listen_addr().is_err());
    }
}
