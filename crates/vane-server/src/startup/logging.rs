//! Console and rolling-file logging.
//!
//! | Log File          | Component                 | Target Prefixes    |
//! |-------------------|---------------------------|--------------------|
//! | vane.log          | Root logger (all events)  | (all)              |
//! | persistence.log   | Storage and resets        | vane_persistence   |
//! | server.log        | Server operations         | vane_server        |
//!
//! Files are only written when a log directory is configured (`log.dir`).

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

struct ComponentLogDef {
    file_name: &'static str,
    targets: &'static [&'static str],
}

const ROOT_LOG_FILE: &str = "vane.log";

const COMPONENT_LOGS: &[ComponentLogDef] = &[
    ComponentLogDef {
        file_name: "persistence.log",
        targets: &["vane_persistence", "sea_orm", "sqlx"],
    },
    ComponentLogDef {
        file_name: "server.log",
        targets: &["vane_server", "vane"],
    },
];

/// Log rotation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogRotation {
    Daily,
    Hourly,
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Rolling files are written here; `None` disables file logging
    pub log_dir: Option<PathBuf>,
    pub console_output: bool,
    /// Default filter directive, used when `RUST_LOG` is unset
    pub level: String,
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            console_output: true,
            level: "info".to_string(),
            rotation: LogRotation::Daily,
        }
    }
}

impl LoggingConfig {
    pub fn from_config(log_dir: Option<String>, console_output: bool, level: String) -> Self {
        Self {
            log_dir: log_dir.filter(|d| !d.is_empty()).map(PathBuf::from),
            console_output,
            level,
            rotation: LogRotation::Daily,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Keeps the non-blocking file writers alive.
///
/// Dropping it flushes buffered output, so hold it for the life of the process.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Console and root file honour `RUST_LOG` (falling back to the configured
/// level); component files capture everything from their targets.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if config.console_output {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_filter(config.env_filter());
        layers.push(Box::new(console_layer));
    }

    if let Some(log_dir) = &config.log_dir {
        std::fs::create_dir_all(log_dir)?;

        let root_appender =
            RollingFileAppender::new(config.rotation.into(), log_dir, ROOT_LOG_FILE);
        let (root_nb, root_guard) = tracing_appender::non_blocking(root_appender);
        guards.push(root_guard);

        let root_layer = fmt::layer()
            .with_writer(root_nb)
            .with_target(true)
            .with_thread_names(true)
            .with_ansi(false)
            .with_filter(config.env_filter());
        layers.push(Box::new(root_layer));

        for component in COMPONENT_LOGS {
            let appender =
                RollingFileAppender::new(config.rotation.into(), log_dir, component.file_name);
            let (nb, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);

            let mut targets = Targets::new();
            for target in component.targets {
                targets = targets.with_target(*target, LevelFilter::TRACE);
            }

            let layer = fmt::layer()
                .with_writer(nb)
                .with_target(true)
                .with_ansi(false)
                .with_filter(targets);
            layers.push(Box::new(layer));
        }
    }

    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    if let Some(log_dir) = &config.log_dir {
        tracing::info!(
            log_dir = %log_dir.display(),
            component_files = COMPONENT_LOGS.len(),
            "File logging initialized"
        );
    }

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}
