//! Error types for the Orbis application.

use thiserror::Error;

/// A shared error type for the entire Orbis application.
///
/// Remote failures, storage failures and the expected "nothing there" outcome
/// are kept apart so callers can decide what to display.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrbisError {
    /// The remote directory did not answer with a success status.
    ///
    /// `status` is `None` when the request never produced a response
    /// (connection refused, timeout, ...).
    #[error("Fetch failed{}: {message}", .status.map(|s| format!(" (HTTP {s})")).unwrap_or_default())]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Key-value storage error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The operation needs a logged-in user.
    #[error("Not logged in")]
    Unauthenticated,

    /// The caller abandoned the operation before it finished.
    #[error("Operation cancelled")]
    Cancelled,
}

impl OrbisError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Fetch error for a response with a non-success status.
    pub fn fetch(status: u16, message: impl Into<String>) -> Self {
        Self::Fetch {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a Fetch error for a request that produced no response.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Fetch {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a remote fetch failure
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    /// Returns the HTTP status carried by a fetch failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Fetch { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if this is a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for OrbisError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for OrbisError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for OrbisError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, OrbisError>`.
pub type Result<T> = std::result::Result<T, OrbisError>;
