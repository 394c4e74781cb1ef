use std::path::PathBuf;

use thiserror::Error;

/// Lookup failures on the parameter set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
    #[error("unknown parameter key: {0}")]
    KeyNotFound(String),
}

/// Failures raised by a randomness service outside of a query result.
///
/// A query that the service answers with "failed" is not an error here; it is
/// reported as [`crate::service::QueryOutcome::Failure`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The service refused to become ready
    #[error("service not ready: {0}")]
    NotReady(String),
    /// Network-level failure (connection, DNS, timeout)
    #[error("transport error: {0}")]
    Transport(String),
    /// The service answered with something we could not interpret
    #[error("protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
