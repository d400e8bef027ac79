//! Error taxonomy shared by the entity store and the catalog services.

use std::fmt;

use rusqlite::ErrorCode;

/// The result type used throughout the catalog.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// The kind of entity a lookup was aimed at, so failures name what was queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Book,
    User,
    Reservation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "book"),
            EntityKind::User => write!(f, "user"),
            EntityKind::Reservation => write!(f, "reservation"),
        }
    }
}

/// Errors produced by catalog operations.
///
/// `NotFound` and `ConstraintViolation` are expected outcomes; `StorageFailure`
/// aborts only the operation that hit it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// A keyed lookup had no match.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// Duplicate primary key, duplicate reservation, or a would-be orphan.
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// The underlying store is unreachable or corrupted.
    #[error("storage failure: {0}")]
    StorageFailure(String),
}

impl CatalogError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, CatalogError::ConstraintViolation(_))
    }
}

impl From<rusqlite::Error> for CatalogError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, msg)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                CatalogError::ConstraintViolation(
                    msg.clone().unwrap_or_else(|| failure.to_string()),
                )
            }
            _ => CatalogError::StorageFailure(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::StorageFailure(format!("fixture decode failed: {}", err))
    }
}
