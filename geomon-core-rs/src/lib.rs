//! # GeoMon Core
//!
//! Core building blocks shared by the services of the GeoMon monitoring
//! platform.
//!
//! ## Features
//!
//! - A closed failure taxonomy with simple and validation-shaped kinds
//! - Field-level validation records projected into per-field error maps
//! - A filter contract and the analysis to data series filter
//! - Structured logging and layered configuration
//!

pub mod types;
pub mod context;
pub mod logging;
pub mod settings;
pub mod model;
pub mod filter;
pub mod filters;

// Re-export commonly used types
pub use types::{ErrorRecord, Failure, FailureKind, FieldMap, Result, SimpleKind, ValidationKind};
pub use context::FailureContext;
pub use logging::{init_logging, log_structured_failure, LoggingConfig};
pub use settings::{load_config, CoreConfig};
pub use model::{Analysis, DataSeries, DataSet, Id, Temporality};
pub use filter::Filter;
pub use filters::{AnalysisFilter, DataSeriesContext};

/// Initializes the core with default settings
pub fn init() -> Result<()> {
    init_logging(None)
}

/// Initializes the core with the given configuration
pub fn init_with_config(config: &CoreConfig) -> Result<()> {
    init_logging(Some(config.logging.clone()))
}
