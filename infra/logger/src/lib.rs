//! # Logger
//!
//! Installs the global `tracing` subscriber of the HBnB server from the `[logging]` section of
//! its configuration.
//!
//! ```toml
//! [logging]
//! level = "info"
//! directives = "hbnb_storage=debug,tower_http=warn"
//!
//! [logging.file]
//! directory = "/var/log/hbnb"
//! rotation = "daily"
//! max_files = 7
//! format = "json"
//! ```
//!
//! `RUST_LOG` replaces `level` and `directives` when set. File lines go through a non-blocking
//! worker: keep the returned [`Logger`] alive until shutdown so buffered lines are flushed. The
//! `profiling` feature adds the `tokio-console` layer (needs `--cfg tokio_unstable`).
//!
//! ```rust
//! use hbnb_logger::{LogSettings, Logger};
//!
//! let _logger = Logger::init("hbnb-server", &LogSettings::default()).unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};

use serde::Deserialize;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const LOG_FILE_SUFFIX: &str = "log";

/// The `[logging]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogSettings {
    pub level: Level,
    /// Extra `EnvFilter` directives on top of `level`.
    pub directives: Option<String>,
    /// Compact colored output on stdout.
    pub console: bool,
    pub file: Option<FileSettings>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: Level::Info, directives: None, console: true, file: None }
    }
}

/// Rolling log file written next to the console output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub directory: PathBuf,
    pub rotation: RotationPolicy,
    /// Rotated files kept on disk.
    pub max_files: usize,
    pub format: FileFormat,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("logs"),
            rotation: RotationPolicy::Daily,
            max_files: 10,
            format: FileFormat::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        match level {
            Level::Off => Self::OFF,
            Level::Error => Self::ERROR,
            Level::Warn => Self::WARN,
            Level::Info => Self::INFO,
            Level::Debug => Self::DEBUG,
            Level::Trace => Self::TRACE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationPolicy {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl From<RotationPolicy> for Rotation {
    fn from(policy: RotationPolicy) -> Self {
        match policy {
            RotationPolicy::Minutely => Self::MINUTELY,
            RotationPolicy::Hourly => Self::HOURLY,
            RotationPolicy::Daily => Self::DAILY,
            RotationPolicy::Never => Self::NEVER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Text,
    Json,
}

/// Handle to the installed subscriber; owns the file writer's background worker.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Installs the global subscriber for `service`, which also prefixes the log files.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank service name, `max_files == 0`,
    ///   invalid directives or when neither the console nor a file is enabled.
    /// * [`LoggerError::Io`] / [`LoggerError::Appender`] when the log directory is unusable.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(service: &str, settings: &LogSettings) -> Result<Self, LoggerError> {
        validate(service, settings)?;
        let filter = env_filter(settings)?;
        let mut layers = Vec::new();

        #[cfg(all(feature = "profiling", tokio_unstable))]
        layers.push(console_subscriber::spawn().boxed());

        if settings.console {
            layers.push(layer().compact().with_ansi(true).boxed());
        }

        let guard = match &settings.file {
            Some(file) => {
                let (file_layer, guard) = file_layer(service, file)?;
                layers.push(file_layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(service, file = guard.is_some(), "Logging initialized");

        Ok(Self { guard })
    }

    #[must_use]
    pub const fn has_file_output(&self) -> bool {
        self.guard.is_some()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::info!("Logging system shutting down, flushing buffers...");
        }
    }
}

type BoxedLayer<S> = Box<dyn Layer<S> + Send + Sync>;

fn file_layer<S>(
    service: &str,
    file: &FileSettings,
) -> Result<(BoxedLayer<S>, WorkerGuard), LoggerError>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    std::fs::create_dir_all(&file.directory)
        .context(format!("Failed to create {}", file.directory.display()))?;

    let appender = RollingFileAppender::builder()
        .rotation(file.rotation.into())
        .filename_prefix(service)
        .filename_suffix(LOG_FILE_SUFFIX)
        .max_log_files(file.max_files)
        .build(&file.directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let plain = layer().with_writer(writer).with_ansi(false);
    let boxed = match file.format {
        FileFormat::Json => plain.json().boxed(),
        FileFormat::Text => plain.boxed(),
    };
    Ok((boxed, guard))
}

fn validate(service: &str, settings: &LogSettings) -> Result<(), LoggerError> {
    let invalid = |message: &'static str| {
        Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
    };
    if service.trim().is_empty() {
        return invalid("Service name cannot be empty");
    }
    match &settings.file {
        None if !settings.console => {
            invalid("No logging output enabled; enable the console or a log file")
        },
        Some(file) if file.max_files == 0 => invalid("max_files must be greater than zero"),
        _ => Ok(()),
    }
}

/// `level` plus `directives`, unless `RUST_LOG` holds a valid filter. The configured directives
/// are checked either way.
fn env_filter(settings: &LogSettings) -> Result<EnvFilter, LoggerError> {
    let directives = settings.directives.as_deref().unwrap_or_default();
    let configured = EnvFilter::builder()
        .with_default_directive(LevelFilter::from(settings.level).into())
        .parse(directives)
        .map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("Invalid directives '{directives}': {e}").into(),
            context: None,
        })?;

    Ok(EnvFilter::try_from_default_env().unwrap_or(configured))
}
