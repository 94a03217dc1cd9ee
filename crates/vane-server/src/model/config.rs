//! Configuration management for Vane
//!
//! Settings come from `conf/application.yml`, then `VANE_*` environment
//! variables, then command line overrides.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use config::{Config, ConfigError, Environment, File};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::startup::logging::LoggingConfig;

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

const DB_URL: &str = "db.url";
const DB_BOOTSTRAP: &str = "db.bootstrap";
const LOG_LEVEL: &str = "log.level";

/// Command line options shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigArgs {
    /// Configuration file
    #[arg(short = 'c', long = "config", global = true)]
    pub config_file: Option<PathBuf>,
    #[arg(long = "db-url", env = "DATABASE_URL", global = true)]
    pub database_url: Option<String>,
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
    /// Create the schema and default namespace before running the command
    #[arg(long = "bootstrap", global = true)]
    pub bootstrap: bool,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new(args: &ConfigArgs) -> Result<Self, ConfigError> {
        let file = args
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        // The default file is optional; an explicitly named one is not.
        let mut builder = Config::builder()
            .add_source(File::from(file).required(args.config_file.is_some()))
            .add_source(
                Environment::with_prefix("vane")
                    .prefix_separator("_")
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(v) = &args.database_url {
            builder = builder.set_override(DB_URL, v.as_str())?;
        }
        if let Some(v) = &args.log_level {
            builder = builder.set_override(LOG_LEVEL, v.as_str())?;
        }
        if args.bootstrap {
            builder = builder.set_override(DB_BOOTSTRAP, true)?;
        }

        Ok(Configuration {
            config: builder.build()?,
        })
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub fn database_url(&self) -> Result<String, ConfigError> {
        self.config.get_string(DB_URL)
    }

    /// Whether to create the schema on startup
    pub fn db_bootstrap(&self) -> bool {
        self.config.get_bool(DB_BOOTSTRAP).unwrap_or(false)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.config
            .get_int("db.pool.maxConnections")
            .unwrap_or(10) as u32
    }

    pub fn db_min_connections(&self) -> u32 {
        self.config
            .get_int("db.pool.minConnections")
            .unwrap_or(1) as u32
    }

    pub fn db_connect_timeout(&self) -> u64 {
        self.config
            .get_int("db.pool.connectTimeout")
            .unwrap_or(30) as u64
    }

    pub fn db_acquire_timeout(&self) -> u64 {
        self.config
            .get_int("db.pool.acquireTimeout")
            .unwrap_or(8) as u64
    }

    pub fn db_idle_timeout(&self) -> u64 {
        self.config
            .get_int("db.pool.idleTimeout")
            .unwrap_or(600) as u64
    }

    pub fn db_sqlx_logging(&self) -> bool {
        self.config.get_bool("db.sqlxLogging").unwrap_or(false)
    }

    pub fn connect_options(&self) -> Result<ConnectOptions, ConfigError> {
        let mut opt = ConnectOptions::new(self.database_url()?);

        opt.max_connections(self.db_max_connections())
            .min_connections(self.db_min_connections())
            .connect_timeout(Duration::from_secs(self.db_connect_timeout()))
            .acquire_timeout(Duration::from_secs(self.db_acquire_timeout()))
            .idle_timeout(Duration::from_secs(self.db_idle_timeout()))
            .sqlx_logging(self.db_sqlx_logging())
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Ok(opt)
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let opt = self.connect_options()?;

        tracing::info!(
            max_connections = self.db_max_connections(),
            min_connections = self.db_min_connections(),
            connect_timeout = self.db_connect_timeout(),
            idle_timeout = self.db_idle_timeout(),
            sqlx_logging = self.db_sqlx_logging(),
            "Database connection pool configured"
        );

        let database_connection = Database::connect(opt)
            .await
            .context("failed to connect to database")?;

        Ok(database_connection)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn log_level(&self) -> String {
        self.config
            .get_string(LOG_LEVEL)
            .unwrap_or("info".to_string())
    }

    pub fn log_dir(&self) -> Option<String> {
        self.config.get_string("log.dir").ok()
    }

    pub fn log_console(&self) -> bool {
        self.config.get_bool("log.console").unwrap_or(true)
    }

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(self.log_dir(), self.log_console(), self.log_level())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(pairs: &[(&str, &str)]) -> Configuration {
        let mut builder = Config::builder();
        for (key, value) in pairs {
            builder = builder.set_override(*key, *value).unwrap();
        }
        Configuration::from_config(builder.build().unwrap())
    }

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert!(config.database_url().is_err());
        assert!(!config.db_bootstrap());
        assert_eq!(config.db_max_connections(), 10);
        assert_eq!(config.db_min_connections(), 1);
        assert_eq!(config.db_idle_timeout(), 600);
        assert!(!config.db_sqlx_logging());
        assert_eq!(config.log_level(), "info");
        assert!(config.log_dir().is_none());
        assert!(config.log_console());
    }

    #[test]
    fn test_values_from_config() {
        let config = configuration(&[
            ("db.url", "sqlite::memory:"),
            ("db.bootstrap", "true"),
            ("db.pool.maxConnections", "4"),
            ("log.level", "debug"),
            ("log.dir", "/tmp/vane-logs"),
        ]);

        assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
        assert!(config.db_bootstrap());
        assert_eq!(config.db_max_connections(), 4);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.log_dir().as_deref(), Some("/tmp/vane-logs"));
    }

    #[test]
    fn test_connect_options() {
        let config =
            configuration(&[("db.url", "sqlite::memory:"), ("db.pool.maxConnections", "1")]);

        let opt = config.connect_options().unwrap();
        assert_eq!(opt.get_url(), "sqlite::memory:");
        assert_eq!(opt.get_max_connections(), Some(1));
    }

    #[test]
    fn test_command_line_overrides() {
        let args = ConfigArgs {
            config_file: None,
            database_url: Some("sqlite::memory:".to_string()),
            log_level: Some("warn".to_string()),
            bootstrap: true,
        };

        let config = Configuration::new(&args).unwrap();
        assert_eq!(config.database_url().unwrap(), "sqlite::memory:");
        assert_eq!(config.log_level(), "warn");
        assert!(config.db_bootstrap());
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let args = ConfigArgs {
            config_file: Some(PathBuf::from("does/not/exist.yml")),
            ..Default::default()
        };

        assert!(Configuration::new(&args).is_err());
    }
}
