//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for the host.
//!
//! Output goes to the console (compact or JSON) and, optionally, to rolling log
//! files written by a non-blocking background worker. The usual source of the
//! configuration is the `Logging` section of `appsettings.json`, applied with
//! [`LoggerBuilder::settings`]; `RUST_LOG` still works when no explicit filter
//! is configured.
//!
//! ## Example
//!
//! ```rust
//! use apphost_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder()
//!     .name("apphost")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use apphost_domain::settings::LoggingSettings;
use private::Sealed;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

/// Maps a level name to a filter.
///
/// Both the tracing names (`trace`, `debug`, `info`, `warn`, `error`, `off`) and
/// the names commonly found in `appsettings.json` files (`Information`,
/// `Warning`, `Critical`, `None`) are accepted, case-insensitively.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for an unknown name.
pub fn parse_level(name: &str) -> Result<LevelFilter, LoggerError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" | "information" => Ok(LevelFilter::INFO),
        "warn" | "warning" => Ok(LevelFilter::WARN),
        "error" | "critical" => Ok(LevelFilter::ERROR),
        "off" | "none" => Ok(LevelFilter::OFF),
        _ => Err(LoggerError::InvalidConfiguration {
            message: format!("Unknown log level '{name}'").into(),
            context: Some("Logging.Level".into()),
        }),
    }
}

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    path: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    env_filter: Option<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            path: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            env_filter: None,
        }
    }
}

#[derive(Debug)]
pub struct NoName;
#[derive(Debug)]
pub struct WithName(String);

mod private {
    pub trait Sealed {}
}
impl Sealed for NoName {}
impl Sealed for WithName {}

/// A builder for configuring and initializing the global tracing subscriber.
///
/// A name is mandatory: it prefixes rolling log files and names the subscriber.
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = NoName> {
    config: LoggerConfig,
    name: N,
}

impl LoggerBuilder<NoName> {
    /// Sets the name of the logger.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<WithName> {
        LoggerBuilder { config: self.config, name: WithName(name.into()) }
    }
}

impl LoggerBuilder<WithName> {
    /// Applies the `Logging` section of the settings document.
    ///
    /// Values already set on the builder are overwritten.
    ///
    /// # Errors
    /// Returns [`LoggerError::InvalidConfiguration`] if `Level` is not a known level name.
    pub fn settings(mut self, settings: &LoggingSettings) -> Result<Self, LoggerError> {
        self.config.level = parse_level(&settings.level)?;
        self.config.console = settings.console;
        self.config.json = settings.json;
        self.config.path.clone_from(&settings.directory);
        self.config.env_filter.clone_from(&settings.filter);
        Ok(self)
    }

    /// Configures the minimum log level to be emitted.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Adds an explicit env filter (e.g., `apphost=debug,apphost_kernel=trace`).
    ///
    /// Without it the `RUST_LOG` variable is honored; an invalid filter makes
    /// [`LoggerBuilder::init`] fail.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn env_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.env_filter = Some(filter.into());
        self
    }

    /// Enables console logging.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Switches every output to JSON lines.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }

    /// Writes rolling log files into `path`.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.path = Some(path.into());
        self
    }

    /// Configures the log file rotation strategy.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    /// Configures maximum number of log files to keep.
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Consumes the builder and installs the global tracing subscriber.
    ///
    /// # Returns
    /// A [`Logger`] handle. Keep it alive for the lifetime of the process: it owns
    /// the [`WorkerGuard`] that flushes file output on drop.
    ///
    /// # Errors
    /// Returns [`LoggerError::Subscriber`] if a global subscriber has already been set.
    /// Returns [`LoggerError::InvalidConfiguration`] for invalid builder settings.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let LoggerBuilder { config, name: WithName(name) } = self;
        validate_config(&config, &name)?;

        let env_filter = build_env_filter(&config)?;
        let mut layers = Vec::new();

        if config.console {
            let console = layer().with_target(true);
            layers.push(if config.json {
                console.json().boxed()
            } else {
                console.compact().with_ansi(true).boxed()
            });
        }

        let guard = if let Some(path) = &config.path {
            fs::create_dir_all(path).map_err(|e| LoggerError::Internal {
                message: e.to_string().into(),
                context: Some(format!("Failed to create log directory: {}", path.display()).into()),
            })?;

            let appender = RollingFileAppender::builder()
                .rotation(config.rotation.clone())
                .filename_prefix(&name)
                .filename_suffix(LOG_FILE_SUFFIX)
                .max_log_files(config.max_files)
                .build(path)?;

            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file = layer().with_writer(writer).with_ansi(false);
            layers.push(if config.json { file.json().boxed() } else { file.boxed() });
            Some(guard)
        } else {
            None
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "No logging outputs enabled. Enable the console or set a directory."
                    .into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(env_filter).with(layers).try_init()?;
        tracing::debug!(logger = %name, level = %config.level, "Logging initialized");

        Ok(Logger { guard })
    }
}

/// A handle to the initialized logging system.
#[must_use = "Dropping this handle will stop background logging threads."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Returns a new [`LoggerBuilder`].
    ///
    /// ```rust
    /// use apphost_domain::settings::LoggingSettings;
    /// use apphost_logger::Logger;
    ///
    /// let settings = LoggingSettings { level: "Warning".to_owned(), ..LoggingSettings::default() };
    /// let _logger = Logger::builder().name("apphost").settings(&settings)?.init()?;
    /// # Ok::<(), apphost_logger::LoggerError>(())
    /// ```
    #[must_use = "The builder must be configured before it can be used to initialize the logger."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: NoName }
    }

    /// Returns the file worker guard, present only when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

fn validate_config(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }

    if config.path.is_some() && config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }

    Ok(())
}

fn build_env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    config.env_filter.as_ref().map_or_else(
        || Ok(builder.from_env_lossy()),
        |filter| {
            builder.parse(filter).map_err(|e| LoggerError::InvalidConfiguration {
                message: format!("Invalid env filter '{filter}': {e}").into(),
                context: Some("Logging.Filter".into()),
            })
        },
    )
}
