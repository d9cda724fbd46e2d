//! # Settings
//!
//! Layered configuration for the core: an optional file, then environment
//! variables prefixed with `GEOMON` (`GEOMON_LOGGING__LEVEL=debug`). A `.env`
//! file in the working directory is loaded first when present.

use std::path::Path;
use serde::{Serialize, Deserialize};
use config::{Config, Environment, File};
use crate::context::FailureContext;
use crate::logging::LoggingConfig;
use crate::types::{Result, SimpleKind};

/// Prefix of the environment variables read by [`load_config`]
pub const ENV_PREFIX: &str = "GEOMON";

/// Top-level configuration of the core
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub logging: LoggingConfig,
}

/// Loads the configuration from `path` (if given) and the environment
///
/// The file format is picked from the extension. Missing sections and keys
/// fall back to their defaults.
pub fn load_config(path: Option<&Path>) -> Result<CoreConfig> {
    dotenv::dotenv().ok();

    let mut builder = Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(File::from(path).required(true));
    }

    let layered = builder
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_failure(SimpleKind::Base, || "loading configuration")?;

    let config: CoreConfig = layered
        .try_deserialize()
        .with_failure(SimpleKind::Base, || "parsing configuration")?;

    tracing::debug!(
        service = %config.logging.service_name,
        from_file = path.is_some(),
        "Configuration loaded"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use crate::types::FailureKind;

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\nservice_name = \"analysis-service\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.service_name, "analysis-service");
        assert!(config.logging.json_format);
    }

    #[test]
    fn test_missing_file_is_base_failure() {
        let err = load_config(Some(Path::new("/nonexistent/geomon.toml"))).unwrap_err();

        assert_eq!(err.kind(), FailureKind::Simple(SimpleKind::Base));
        assert!(err.message().starts_with("loading configuration"));
    }

    #[test]
    fn test_invalid_value_is_base_failure() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[logging]\nfile_output = \"sometimes\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(err.message().starts_with("parsing configuration"));
    }
}
