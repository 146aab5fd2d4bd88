//! Core error types for Questlog domain logic
//!
//! Validation, index and state errors are returned to the caller and leave
//! the state untouched. Deserialization and persistence errors are recovered
//! by the store and surfaced as warnings.

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Task index {index} out of range (list has {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    #[error("Deserialization error: {message}")]
    Deserialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Persistence read error: {message}")]
    PersistenceRead {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Persistence write error: {message}")]
    PersistenceWrite {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl CoreError {
    /// Create a validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a deserialization error with source
    pub fn deserialization_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Deserialization {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a read error with a message
    pub fn persistence_read(message: impl Into<String>) -> Self {
        Self::PersistenceRead {
            message: message.into(),
            source: None,
        }
    }

    /// Create a read error with source
    pub fn persistence_read_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::PersistenceRead {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a write error with a message
    pub fn persistence_write(message: impl Into<String>) -> Self {
        Self::PersistenceWrite {
            message: message.into(),
            source: None,
        }
    }

    /// Create a write error with source
    pub fn persistence_write_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::PersistenceWrite {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
