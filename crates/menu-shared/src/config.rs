//! Configuration management

use std::path::PathBuf;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::*;
use crate::error::AppError;
use crate::types::StalePositionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub ordering: OrderingSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OrderingSettings {
    /// Deadline for one reposition, including waiting for the scope lock.
    pub operation_timeout_ms: u64,
    /// Passed to PostgreSQL as `lock_timeout` inside the reposition transaction.
    pub lock_timeout_ms: u64,
    pub stale_position: StalePositionPolicy,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LogSettings {
    /// When set, logs are also written to a daily rolling file here.
    pub directory: Option<PathBuf>,
    pub file_prefix: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        Self::load_from("config", &env)
    }

    /// Layers `<dir>/default` and `<dir>/<env>` over the built-in defaults,
    /// then `MENU__SECTION__KEY` environment variables on top.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = Self::with_defaults(Config::builder())?
            .set_override("app.env", env)?
            .add_source(File::with_name(&format!("{}/default", dir)).required(false))
            .add_source(File::with_name(&format!("{}/{}", dir, env)).required(false))
            .add_source(
                Environment::with_prefix("MENU")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        builder
            .set_default("app.env", "development")?
            .set_default("app.host", DEFAULT_HOST)?
            .set_default("app.port", DEFAULT_PORT as i64)?
            .set_default("app.name", DEFAULT_APP_NAME)?
            .set_default("database.url", "postgres://postgres@localhost/menu")?
            .set_default("database.max_connections", DEFAULT_MAX_CONNECTIONS as i64)?
            .set_default("database.min_connections", DEFAULT_MIN_CONNECTIONS as i64)?
            .set_default("database.acquire_timeout_secs", DEFAULT_ACQUIRE_TIMEOUT_SECS as i64)?
            .set_default("storage.backend", "postgres")?
            .set_default("ordering.operation_timeout_ms", DEFAULT_OPERATION_TIMEOUT_MS as i64)?
            .set_default("ordering.lock_timeout_ms", DEFAULT_LOCK_TIMEOUT_MS as i64)?
            .set_default("ordering.stale_position", StalePositionPolicy::default().as_str())
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.max_connections == 0 {
            return Err(AppError::InvalidConfig(
                "database.max_connections must be at least 1".into(),
            ));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::InvalidConfig(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                self.database.min_connections, self.database.max_connections
            )));
        }
        if self.ordering.operation_timeout_ms == 0 {
            return Err(AppError::InvalidConfig(
                "ordering.operation_timeout_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl OrderingSettings {
    pub fn operation_timeout(&self) -> Duration {
        Duration::from_millis(self.operation_timeout_ms)
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

impl Default for OrderingSettings {
    fn default() -> Self {
        Self {
            operation_timeout_ms: DEFAULT_OPERATION_TIMEOUT_MS,
            lock_timeout_ms: DEFAULT_LOCK_TIMEOUT_MS,
            stale_position: StalePositionPolicy::default(),
        }
    }
}

impl DatabaseSettings {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_files() {
        let config = AppConfig::load_from("does-not-exist", "test").expect("load defaults");
        assert_eq!(config.app.env, "test");
        assert_eq!(config.app.name, DEFAULT_APP_NAME);
        assert_eq!(config.ordering.stale_position, StalePositionPolicy::Reread);
        assert_eq!(
            config.ordering.operation_timeout(),
            Duration::from_millis(DEFAULT_OPERATION_TIMEOUT_MS)
        );
    }

    #[test]
    fn rejects_inverted_pool_bounds() {
        let mut config = AppConfig::load_from("does-not-exist", "test").expect("load defaults");
        config.database.min_connections = 20;
        config.database.max_connections = 5;
        assert!(matches!(config.validate(), Err(AppError::InvalidConfig(_))));
    }
}
