//! Error types for midmark library.

use std::fmt;
use std::io;
use thiserror::Error;

/// Result type alias for midmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while driving a pipe or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// A pipe method was invoked out of its required order.
    #[error("Illegal state: cannot {operation} while pipe is {state}")]
    IllegalState {
        /// The rejected operation (e.g. "parse")
        operation: &'static str,
        /// The pipe state at the time of the call
        state: String,
    },

    /// A block violates its child/role invariant.
    #[error("Structural error: {0}")]
    Structural(String),

    /// Opaque failure from the classification or parse collaborator.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error during rendering.
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Opaque error raised by an external collaborator (classifier or parse engine).
///
/// The pipe never inspects it; it is handed back to the caller unchanged.
pub struct EngineError(Box<dyn std::error::Error + Send + Sync>);

impl EngineError {
    /// Wrap any error coming out of an engine.
    pub fn new<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self(err.into())
    }

    /// Create an engine error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self(message.into().into())
    }

    /// Borrow the wrapped error.
    pub fn inner(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    /// Recover the wrapped error.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync> {
        self.0
    }
}

impl fmt::Debug for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EngineError").field(&self.0).finish()
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "External engine error: {}", self.0)
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::IllegalState {
            operation: "parse",
            state: "created".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Illegal state: cannot parse while pipe is created"
        );

        let err = Error::Structural("image block has no image_body".into());
        assert_eq!(
            err.to_string(),
            "Structural error: image block has no image_body"
        );
    }

    #[test]
    fn test_engine_error_is_transparent() {
        let err: Error = EngineError::msg("model crashed").into();
        assert!(matches!(err, Error::Engine(_)));
        assert_eq!(err.to_string(), "External engine error: model crashed");
    }

    #[test]
    fn test_engine_error_keeps_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "weights missing");
        let err = EngineError::new(io_err);
        let inner = err.into_inner();
        assert!(inner.downcast_ref::<io::Error>().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
