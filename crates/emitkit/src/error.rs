//! Error types for the emitter
//!
//! Registration and envelope dispatch can fail with [`EmitterError::InvalidArgument`].
//! Errors returned by listeners are passed through unchanged as
//! [`EmitterError::Listener`]; the emitter never catches or isolates them.
//!
//! # Examples
//!
//! ```ignore
//! match emitter.dispatch("save", &path) {
//!     Ok(true) => println!("delivered"),
//!     Ok(false) => println!("nobody listening"),
//!     Err(EmitterError::Listener(e)) => eprintln!("listener failed: {}", e),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

/// Error produced by a listener callback
///
/// Anything convertible into a boxed error can be returned from a fallible
/// listener with `?` or `.into()`.
pub type ListenerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while registering listeners or dispatching events
#[derive(Debug, Error)]
pub enum EmitterError {
    /// Invalid argument passed to the emitter
    ///
    /// Raised synchronously when registering an unbound listener, or when an
    /// envelope handed to `dispatch_with_envelope` carries no usable `type`.
    /// Not retried; the call site has to be fixed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A listener failed during dispatch
    ///
    /// Carries the listener's own error. Listeners registered after the failing
    /// one were not invoked for that dispatch.
    #[error(transparent)]
    Listener(ListenerError),

    /// Invalid emitter configuration
    #[error("Invalid emitter configuration: {0}")]
    Config(String),

    /// Serialization error
    ///
    /// Wraps `serde_yaml::Error` for configuration parsing failures.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// IO error while reading a configuration file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EmitterError {
    /// Check if this error came from a listener
    pub fn is_listener_error(&self) -> bool {
        matches!(self, Self::Listener(_))
    }

    /// Recover the listener's original error, if this is one
    pub fn into_listener_error(self) -> Option<ListenerError> {
        match self {
            Self::Listener(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for emitter operations
pub type Result<T> = std::result::Result<T, EmitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("disk full")]
    struct DiskFull;

    #[test]
    fn test_listener_error_is_transparent() {
        let err = EmitterError::Listener(Box::new(DiskFull));

        assert_eq!(err.to_string(), "disk full");
        assert!(err.is_listener_error());
    }

    #[test]
    fn test_into_listener_error_recovers_original() {
        let err = EmitterError::Listener(Box::new(DiskFull));
        let original = err.into_listener_error().unwrap();

        assert!(original.downcast_ref::<DiskFull>().is_some());
    }

    #[test]
    fn test_invalid_argument_message() {
        let err = EmitterError::InvalidArgument("listener is not bound".to_string());

        assert_eq!(err.to_string(), "Invalid argument: listener is not bound");
        assert!(!err.is_listener_error());
        assert!(err.into_listener_error().is_none());
    }
}
