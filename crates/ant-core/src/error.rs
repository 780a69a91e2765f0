//! Error types for the simulation.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Already attached: {0}")]
    AlreadyAttached(String),

    #[error("Not attached: {0}")]
    NotAttached(String),

    #[error("Invalid grid dimension: {columns} columns x {rows} rows")]
    InvalidDimension { columns: i32, rows: i32 },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Duration out of range: {0}")]
    DurationOutOfRange(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<chrono::OutOfRangeError> for Error {
    fn from(err: chrono::OutOfRangeError) -> Self {
        Error::DurationOutOfRange(err.to_string())
    }
}
