use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid numeric input: {0}")]
    InvalidInput(String),

    #[error("Standard serving size cannot be zero")]
    DivisionByZero,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("No meal log found with id {0}")]
    NotFound(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}

// Every rusqlite failure (open, query, constraint violation) is a storage
// error from the caller's point of view.
impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::Storage(value.to_string())
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
