//! Error types for the mediafind core library
//!
//! Errors are split into I/O failures (filesystem access during walks) and
//! validation failures (bad media kinds, extensions, or walk parameters).
//! Most filesystem failures never reach the caller: recursive walks record
//! them as diagnostics and classification treats them as "no match".

use thiserror::Error;

pub mod io;
pub mod validation;

pub use self::io::{IoError, IoErrorKind};
pub use self::validation::ValidationError;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the mediafind core library
#[derive(Error, Debug)]
pub enum Error {
    /// I/O related errors
    #[error(transparent)]
    Io(#[from] IoError),

    /// Validation related errors
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io(IoError::from_std(source))
    }
}

impl Error {
    /// Whether this error means the requested path does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind == IoErrorKind::FileNotFound)
    }
}
