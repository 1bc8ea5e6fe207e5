//! Error types for Halt

use thiserror::Error;

use crate::InstanceId;

/// Boxed error carried as the source of a failed stop request
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Halt error types
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A field on the path to the instance identifier is absent
    #[error("Alarm event is missing field: {path}")]
    MissingField {
        /// Dotted path of the first missing field
        path: &'static str,
    },

    /// The trigger event does not have the alarm event shape
    #[error("Malformed alarm event: {0}")]
    MalformedEvent(#[source] serde_json::Error),

    /// Instance identifier failed validation
    #[error("Invalid instance ID: {message}")]
    InvalidInstanceId {
        /// Error message
        message: String,
    },

    /// Required configuration value is not set
    #[error("Missing configuration: {name} is not set")]
    MissingConfig {
        /// Name of the environment variable
        name: &'static str,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// The stop request was rejected or could not be sent
    #[error("Failed to stop instance {instance_id}: {source}")]
    StopRequest {
        /// Instance the request named
        instance_id: InstanceId,
        /// Underlying failure, unchanged
        #[source]
        source: BoxError,
    },

    /// Response serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Wrap a backend failure for the given instance
    pub fn stop_request(instance_id: InstanceId, source: impl Into<BoxError>) -> Self {
        Self::StopRequest {
            instance_id,
            source: source.into(),
        }
    }
}

/// Result type alias for Halt operations
pub type Result<T> = std::result::Result<T, Error>;
