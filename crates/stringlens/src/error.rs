use std::fmt;

/// Unified error type for the stringlens crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Request shape or parameter values were rejected.
    InvalidInput(String),
    /// A field was present but carried the wrong type.
    InvalidType(String),
    /// A free-text query yielded no recognisable filters.
    Unparseable(String),
    /// Filters were extracted but cannot be satisfied together.
    ConflictingFilters(String),
    /// A record with the same content hash is already stored.
    AlreadyExists(String),
    /// No record exists for the requested value.
    NotFound(String),
    /// Internal error.
    Internal(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            CoreError::InvalidType(msg) => write!(f, "invalid type: {msg}"),
            CoreError::Unparseable(msg) => write!(f, "unparseable query: {msg}"),
            CoreError::ConflictingFilters(msg) => write!(f, "conflicting filters: {msg}"),
            CoreError::AlreadyExists(msg) => write!(f, "already exists: {msg}"),
            CoreError::NotFound(msg) => write!(f, "not found: {msg}"),
            CoreError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;
