//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tagcache
#[derive(Error, Debug)]
pub enum Error {
    /// Backing store operation error
    ///
    /// The message is the backend's own message, kept intact so callers can
    /// tell why a value was not cached.
    #[error("Backend error: {message}")]
    Backend {
        /// Description of the backend error
        message: String,
        /// Status code assigned by the backend, when it reports one
        code: Option<String>,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON serialization error
    #[error("Serialization error: {source}")]
    Serialization {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Operation attempted on a provider after `close()`
    #[error("Cache provider is closed")]
    Closed,

    /// Value factory passed to `get_or_set` failed
    #[error("Value factory failed: {0}")]
    Factory(Box<dyn std::error::Error + Send + Sync>),

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a backend error without a source
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Self::Backend {
            message: message.into(),
            code: None,
            source: None,
        }
    }

    /// Create a backend error with source
    pub fn backend_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Backend {
            message: message.into(),
            code: None,
            source: Some(Box::new(source)),
        }
    }

    /// Create a backend error carrying a backend-assigned status code
    pub fn backend_with_code<S: Into<String>, C: Into<String>>(message: S, code: C) -> Self {
        Self::Backend {
            message: message.into(),
            code: Some(code.into()),
            source: None,
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Wrap an error returned by a `get_or_set` factory
    pub fn factory<E: Into<Box<dyn std::error::Error + Send + Sync>>>(source: E) -> Self {
        Self::Factory(source.into())
    }
}

// Configuration error creation methods
impl Error {
    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Inspection
impl Error {
    /// Backend status code, if this is a backend error that carries one
    pub fn status_code(&self) -> Option<&str> {
        match self {
            Self::Backend { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Whether this error comes from the backing store
    pub fn is_backend(&self) -> bool {
        matches!(self, Self::Backend { .. })
    }

    /// Whether the provider was used after `close()`
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}
