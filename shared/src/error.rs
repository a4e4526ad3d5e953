//! Error types for the calendar service.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur anywhere between the HTTP boundary and the database.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller input was malformed; never reaches storage.
    #[error("validation error: {field} - {message}")]
    Validation { field: String, message: String },

    /// Storage failure surfaced after an otherwise valid request.
    #[error("business error: {0}")]
    Business(String),

    /// Not found error
    #[error("{0}")]
    NotFound(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listener or socket failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Build a field-tagged validation error.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation { .. } => 400,
            Error::NotFound(_) => 404,
            Error::Business(_) => 503,
            _ => 500,
        }
    }

    /// Machine-readable kind reported in the `error` field of responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "validation_error",
            Error::NotFound(_) => "not_found",
            Error::Business(_) => "business_error",
            _ => "internal_server_error",
        }
    }

    /// Wrap a repository failure for the caller.
    ///
    /// Not-found and validation errors keep their kind; everything else
    /// becomes a [`Error::Business`] carrying the repository message.
    pub fn into_business(self) -> Self {
        match self {
            err @ (Error::NotFound(_) | Error::Validation { .. }) => err,
            other => Error::Business(other.to_string()),
        }
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::validation("date", "bad").status_code(), 400);
        assert_eq!(Error::NotFound("gone".into()).status_code(), 404);
        assert_eq!(Error::Business("db down".into()).status_code(), 503);
        assert_eq!(Error::Internal("boom".into()).status_code(), 500);
        assert_eq!(Error::Config("port".into()).status_code(), 500);
    }

    #[test]
    fn test_infrastructure_errors_are_internal() {
        let io = Error::from(std::io::Error::new(std::io::ErrorKind::AddrInUse, "port taken"));
        let errors = [
            io,
            Error::Database(sqlx::Error::PoolTimedOut),
            Error::Config("port".into()),
            Error::Internal("boom".into()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 500, "{err}");
            assert_eq!(err.kind(), "internal_server_error", "{err}");
        }
    }

    #[test]
    fn test_into_business_keeps_not_found() {
        let err = Error::NotFound("no event found with id: x".into()).into_business();
        assert!(matches!(err, Error::NotFound(_)));

        let err = Error::Database(sqlx::Error::RowNotFound).into_business();
        match err {
            Error::Business(msg) => assert!(msg.starts_with("Database error")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_validation_display() {
        let err = Error::validation("user_id", "can't be empty");
        assert_eq!(err.to_string(), "validation error: user_id - can't be empty");
    }
}
