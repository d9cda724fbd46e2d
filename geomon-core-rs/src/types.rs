//! # Failure Taxonomy
//!
//! This module provides the closed set of failure kinds used throughout the
//! GeoMon platform and the single `Failure` value that carries them.
//!
//! A failure has one of two shapes:
//!
//! - **simple**: a kind and a message, for operational faults
//! - **validation**: a kind, a message and an ordered list of field-level
//!   [`ErrorRecord`]s, for input that failed domain rules

use std::collections::BTreeMap;
use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// A type alias for Result with the error type defaulting to `Failure`
pub type Result<T, E = Failure> = std::result::Result<T, E>;

/// Field path to message projection of a validation failure
pub type FieldMap = BTreeMap<String, String>;

/// Kinds of failure that carry only a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimpleKind {
    /// Uncategorized failure
    Base,
    /// Database connection or operation failure in the persistence layer
    DataManager,
    /// A connection check against a remote provider failed
    Connection,
    /// An URI is ill-formed
    Uri,
    /// A plugin could not be loaded
    Plugin,
    /// A schedule is inconsistent
    Schedule,
    /// A collector is inconsistent
    Collector,
    /// A collector filter is inconsistent
    Filter,
    /// An analysis is inconsistent
    Analysis,
    /// A service signal is invalid
    Signal,
    /// A service type is invalid
    ServiceType,
}

impl SimpleKind {
    /// Every simple kind, in declaration order
    pub const ALL: [SimpleKind; 11] = [
        SimpleKind::Base,
        SimpleKind::DataManager,
        SimpleKind::Connection,
        SimpleKind::Uri,
        SimpleKind::Plugin,
        SimpleKind::Schedule,
        SimpleKind::Collector,
        SimpleKind::Filter,
        SimpleKind::Analysis,
        SimpleKind::Signal,
        SimpleKind::ServiceType,
    ];

    /// Client-facing name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            SimpleKind::Base => "BaseError",
            SimpleKind::DataManager => "DataManagerError",
            SimpleKind::Connection => "ConnectionError",
            SimpleKind::Uri => "UriError",
            SimpleKind::Plugin => "PluginError",
            SimpleKind::Schedule => "ScheduleError",
            SimpleKind::Collector => "CollectorError",
            SimpleKind::Filter => "FilterError",
            SimpleKind::Analysis => "AnalysisError",
            SimpleKind::Signal => "SignalError",
            SimpleKind::ServiceType => "ServiceTypeError",
        }
    }
}

/// Kinds of failure that aggregate field-level records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationKind {
    /// Generic validation failure
    Validation,
    DataProvider,
    DataSeries,
    DataSet,
    Service,
    Project,
    User,
    DataSeriesSemantics,
    DataFormat,
}

impl ValidationKind {
    /// Every validation kind, in declaration order
    pub const ALL: [ValidationKind; 9] = [
        ValidationKind::Validation,
        ValidationKind::DataProvider,
        ValidationKind::DataSeries,
        ValidationKind::DataSet,
        ValidationKind::Service,
        ValidationKind::Project,
        ValidationKind::User,
        ValidationKind::DataSeriesSemantics,
        ValidationKind::DataFormat,
    ];

    /// Client-facing name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            ValidationKind::Validation => "ValidationError",
            ValidationKind::DataProvider => "DataProviderError",
            ValidationKind::DataSeries => "DataSeriesError",
            ValidationKind::DataSet => "DataSetError",
            ValidationKind::Service => "ServiceError",
            ValidationKind::Project => "ProjectError",
            ValidationKind::User => "UserError",
            ValidationKind::DataSeriesSemantics => "DataSeriesSemanticsError",
            ValidationKind::DataFormat => "DataFormatError",
        }
    }
}

/// The kind of a failure, tagged by shape
///
/// Serialized untagged: the variant names of the two inner enumerations are
/// disjoint, so `"Connection"` and `"DataSeries"` round-trip unambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FailureKind {
    Simple(SimpleKind),
    Validation(ValidationKind),
}

impl FailureKind {
    /// Client-facing name of the kind
    pub fn name(&self) -> &'static str {
        match self {
            FailureKind::Simple(kind) => kind.name(),
            FailureKind::Validation(kind) => kind.name(),
        }
    }

    /// Returns true for kinds that carry field-level records
    pub fn is_validation(&self) -> bool {
        matches!(self, FailureKind::Validation(_))
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<SimpleKind> for FailureKind {
    fn from(kind: SimpleKind) -> Self {
        FailureKind::Simple(kind)
    }
}

impl From<ValidationKind> for FailureKind {
    fn from(kind: ValidationKind) -> Self {
        FailureKind::Validation(kind)
    }
}

/// One field-level complaint inside a validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// The offending field, dot/bracket notation allowed
    pub path: String,
    /// The rule that failed, e.g. "required" or "unique"
    #[serde(rename = "type")]
    pub rule_type: String,
    /// Human-readable explanation
    pub message: String,
}

impl ErrorRecord {
    /// Creates a new record
    pub fn new<P, T, M>(path: P, rule_type: T, message: M) -> Self
    where
        P: Into<String>,
        T: Into<String>,
        M: Into<String>,
    {
        Self {
            path: path.into(),
            rule_type: rule_type.into(),
            message: message.into(),
        }
    }
}

/// Core failure type of the GeoMon platform
///
/// Fields are private: the kind and the records never change after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind}: {message}")]
pub struct Failure {
    kind: FailureKind,
    message: String,
    #[serde(rename = "errors", skip_serializing_if = "Vec::is_empty")]
    records: Vec<ErrorRecord>,
}

impl Failure {
    /// Creates a message-only failure
    pub fn simple<S: Into<String>>(kind: SimpleKind, message: S) -> Self {
        Self {
            kind: FailureKind::Simple(kind),
            message: message.into(),
            records: Vec::new(),
        }
    }

    /// Creates a validation failure
    ///
    /// When `message` is absent or empty it is derived from the records as
    /// `type: message` entries joined by `",\n"`.
    pub fn validation<I>(kind: ValidationKind, message: Option<String>, records: I) -> Self
    where
        I: IntoIterator<Item = ErrorRecord>,
    {
        let records: Vec<ErrorRecord> = records.into_iter().collect();
        let message = match message {
            Some(message) if !message.is_empty() => message,
            _ => derive_message(&records),
        };

        Self {
            kind: FailureKind::Validation(kind),
            message,
            records,
        }
    }

    /// Shorthand for an uncategorized failure
    pub fn base<S: Into<String>>(message: S) -> Self {
        Self::simple(SimpleKind::Base, message)
    }

    /// The kind of this failure
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// The summary message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field-level records, empty for simple kinds
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Returns true for validation-shaped failures
    pub fn is_validation(&self) -> bool {
        self.kind.is_validation()
    }

    /// Projects the records into a path to message map
    ///
    /// Returns `None` for simple kinds. A path that appears more than once
    /// keeps the message of its last record.
    pub fn to_field_map(&self) -> Option<FieldMap> {
        if !self.is_validation() {
            return None;
        }

        let mut output = FieldMap::new();
        for record in &self.records {
            output.insert(record.path.clone(), record.message.clone());
        }
        Some(output)
    }

    /// Builds the body a transport layer sends back to clients
    pub fn response_body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert("name".into(), self.kind.name().into());
        body.insert("message".into(), self.message.clone().into());

        if let Some(fields) = self.to_field_map() {
            let errors = fields
                .into_iter()
                .map(|(path, message)| (path, serde_json::Value::String(message)))
                .collect();
            body.insert("errors".into(), serde_json::Value::Object(errors));
        }

        serde_json::Value::Object(body)
    }
}

fn derive_message(records: &[ErrorRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}: {}", record.rule_type, record.message))
        .collect::<Vec<_>>()
        .join(",\n")
}
