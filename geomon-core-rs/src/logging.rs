//! # Structured Logging
//!
//! This module installs the tracing subscriber used by GeoMon services and
//! provides structured logging of failures.

use std::sync::OnceLock;
use serde::{Serialize, Deserialize};
use tracing::{error, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, Registry};
use crate::context::FailureContext;
use crate::types::{Failure, Result, SimpleKind};

// Outcome of the one and only subscriber installation
static LOGGING_INIT: OnceLock<Result<()>> = OnceLock::new();

// Keeps the non-blocking file writer flushing until process exit
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// The log level or filter directive (trace, debug, info, warn, error)
    pub level: String,
    /// The service name, also used as the log file name
    pub service_name: String,
    /// Whether to output logs to a file
    pub file_output: bool,
    /// The directory to store log files in, required when `file_output` is set
    pub log_dir: Option<String>,
    /// Whether to use JSON formatting
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            service_name: "geomon-core".to_string(),
            file_output: false,
            log_dir: None,
            json_format: true,
        }
    }
}

impl LoggingConfig {
    /// Directory for file output, `None` when file output is off
    pub fn file_output_dir(&self) -> Result<Option<&str>> {
        match (self.file_output, self.log_dir.as_deref()) {
            (false, _) => Ok(None),
            (true, Some(log_dir)) => Ok(Some(log_dir)),
            (true, None) => Err(Failure::base(
                "logging.file_output is enabled but logging.log_dir is not set",
            )),
        }
    }
}

/// Initializes the structured logging system
///
/// `RUST_LOG` takes precedence over the configured level. Only the first call
/// installs a subscriber; concurrent and later calls wait for it and return
/// its outcome, ignoring their own configuration.
pub fn init_logging(config: Option<LoggingConfig>) -> Result<()> {
    LOGGING_INIT
        .get_or_init(|| install_subscriber(&config.unwrap_or_default()))
        .clone()
}

fn install_subscriber(config: &LoggingConfig) -> Result<()> {
    let log_dir = config.file_output_dir()?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_failure(SimpleKind::Base, || format!("parsing log level '{}'", config.level))?,
    };

    let json_layer = config.json_format.then(|| {
        fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_target(true)
            .with_span_list(true)
    });

    let text_layer = (!config.json_format).then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_thread_names(true)
    });

    let (file_layer, file_guard) = match log_dir {
        Some(log_dir) => {
            let file_appender = tracing_appender::rolling::daily(
                log_dir,
                format!("{}.log", config.service_name),
            );
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            (Some(fmt::layer().with_writer(non_blocking).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .with_failure(SimpleKind::Base, || "setting global subscriber")?;

    if let Some(guard) = file_guard {
        let _ = FILE_GUARD.set(guard);
    }

    tracing::info!(
        service = %config.service_name,
        level = %config.level,
        json = %config.json_format,
        log_dir = ?log_dir,
        "Structured logging initialized"
    );

    Ok(())
}

/// Returns true once a subscriber has been installed by [`init_logging`]
pub fn is_initialized() -> bool {
    matches!(LOGGING_INIT.get(), Some(Ok(())))
}

/// Convenience macro for logging a failure and handing it back
///
/// ```ignore
/// return Err(log_failure!(Failure::simple(SimpleKind::Connection, "timeout")));
/// ```
#[macro_export]
macro_rules! log_failure {
    ($failure:expr) => {{
        let failure = $failure;
        $crate::logging::log_structured_failure(&failure);
        failure
    }};
}

/// Logs a failure at the level matching its shape
///
/// Validation failures are caller mistakes and go out at `warn`; simple
/// failures are operational faults and go out at `error`.
pub fn log_structured_failure(failure: &Failure) {
    if failure.is_validation() {
        let fields = failure.to_field_map().unwrap_or_default();
        warn!(
            failure_kind = %failure.kind(),
            message = %failure.message(),
            records = failure.records().len(),
            fields = ?fields,
            "Validation failure"
        );
    } else {
        error!(
            failure_kind = %failure.kind(),
            message = %failure.message(),
            "Failure occurred"
        );
    }
}
