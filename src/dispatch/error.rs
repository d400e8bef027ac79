//! Error types for catalog command handlers.

use crate::error::CatalogError;

/// Error type for command handler operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HandlerError {
    /// No handler registered for this command name.
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    /// Payload decode / deserialization failed.
    #[error("decode failed: {0}")]
    DecodeFailed(String),
    /// Guard rejected the command (required fields missing).
    #[error("guard rejected command: {0}")]
    GuardRejected(String),
    /// The catalog rejected or failed the operation.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

impl HandlerError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::UnknownCommand(_) => 404,
            HandlerError::DecodeFailed(_) => 400,
            HandlerError::GuardRejected(_) => 422,
            HandlerError::Catalog(CatalogError::NotFound { .. }) => 404,
            HandlerError::Catalog(CatalogError::ConstraintViolation(_)) => 409,
            HandlerError::Catalog(CatalogError::StorageFailure(_)) => 500,
        }
    }

    /// A miss or a rejected write: an answer for the caller, not a fault.
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            HandlerError::Catalog(CatalogError::NotFound { .. })
                | HandlerError::Catalog(CatalogError::ConstraintViolation(_))
        )
    }
}
