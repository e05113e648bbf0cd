//! Configuration management for the MODARTE tracker
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with MODARTE prefix
//!
//! The database section is the external secrets contract: host, port,
//! database name, user, password, and TLS mode all resolve through the same
//! nested lookup, so credentials never need to live in the repository.

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Hosted database configuration
    pub database: DatabaseConfig,

    /// Migration utility configuration
    pub migration: MigrationConfig,

    /// Dashboard configuration
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// Database server hostname
    pub host: String,

    /// Database server port
    pub port: u16,

    /// Database name
    pub name: String,

    /// Database user
    pub user: String,

    /// Database password
    pub password: String,

    /// TLS mode (disable, allow, prefer, require, verify-ca, verify-full)
    pub ssl_mode: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    pub min_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MigrationConfig {
    /// Path to the embedded SQLite source database
    pub source_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Stock level at or below which a product is flagged as low stock
    pub low_stock_threshold: i64,
}

impl DatabaseConfig {
    /// Build Postgres connect options from the configured parameters
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let ssl_mode = match self.ssl_mode.as_str() {
            "disable" => PgSslMode::Disable,
            "allow" => PgSslMode::Allow,
            "prefer" => PgSslMode::Prefer,
            "require" => PgSslMode::Require,
            "verify-ca" => PgSslMode::VerifyCa,
            "verify-full" => PgSslMode::VerifyFull,
            other => {
                return Err(ConfigError::Message(format!(
                    "unknown database.ssl_mode '{other}'"
                )))
            }
        };

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.name)
            .username(&self.user)
            .password(&self.password)
            .ssl_mode(ssl_mode))
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MODARTE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("database.host", "localhost")?
            .set_default("database.port", 5432)?
            .set_default("database.name", "postgres")?
            .set_default("database.user", "postgres")?
            .set_default("database.password", "")?
            .set_default("database.ssl_mode", "require")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("migration.source_path", "modarte.db")?
            .set_default("dashboard.low_stock_threshold", 5)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MODARTE prefix)
            .add_source(
                Environment::with_prefix("MODARTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn database_config(ssl_mode: &str) -> DatabaseConfig {
        DatabaseConfig {
            host: "db.example.com".into(),
            port: 5432,
            name: "postgres".into(),
            user: "postgres".into(),
            password: "secret".into(),
            ssl_mode: ssl_mode.into(),
            max_connections: 10,
            min_connections: 2,
        }
    }

    #[test]
    fn test_connect_options_accepts_known_ssl_modes() {
        for mode in ["disable", "allow", "prefer", "require", "verify-ca", "verify-full"] {
            assert!(database_config(mode).connect_options().is_ok());
        }
    }

    #[test]
    fn test_connect_options_rejects_unknown_ssl_mode() {
        assert!(database_config("mandatory").connect_options().is_err());
    }
}
