/// Domain-specific error types for feedback analytics using thiserror
///
/// Aggregation and geometry never fail on bad data; they degrade to empty or
/// placeholder output. These errors cover the edges of the crate: parsing the
/// case feed, loading configuration, misusing the filter contract and writing
/// rendered output.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::filter::FilterDimension;

/// Main error type for feedback analytics operations
#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Case data error")]
    Data(#[from] DataError),

    #[error("Filter error")]
    Filter(#[from] FilterError),

    #[error("Configuration error")]
    Config(#[from] ConfigError),

    #[error("Render error")]
    Render(#[from] RenderError),
}

/// Errors raised while reading or normalizing case records
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Invalid timestamp '{value}'")]
    InvalidTimestamp { value: String },

    #[error("Case {case_id} is missing required field '{field}'")]
    MissingField { case_id: String, field: &'static str },

    #[error("Case {case_id} has unknown {field} value '{value}'")]
    UnknownEnumValue {
        case_id: String,
        field: &'static str,
        value: String,
    },

    #[error("Case feed parsing failed in {context}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read case feed {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Errors from the cross-filter contract
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Value for {actual:?} cannot be applied to the {expected:?} filter")]
    DimensionMismatch {
        expected: FilterDimension,
        actual: FilterDimension,
    },

    #[error("Unknown {dimension:?} filter value '{value}'")]
    UnknownValue {
        dimension: FilterDimension,
        value: String,
    },
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse configuration file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write configuration file {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize configuration")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Errors while producing chart output
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize dashboard")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for feedback analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
