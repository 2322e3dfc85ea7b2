//! Validation related error types

use thiserror::Error;

/// Validation and configuration errors
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Unknown media kind name
    #[error("Invalid media kind '{value}': expected audio, image or video")]
    InvalidMediaKind { value: String },

    /// Extension override that cannot be used as a file suffix
    #[error("Invalid extension '{value}': {reason}")]
    InvalidExtension { value: String, reason: String },

    /// Invalid input parameter
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter { parameter: String, reason: String },
}

impl ValidationError {
    /// Create an invalid media kind error
    pub fn invalid_media_kind(value: &str) -> Self {
        Self::InvalidMediaKind {
            value: value.to_string(),
        }
    }

    /// Create an invalid extension error
    pub fn invalid_extension(value: &str, reason: &str) -> Self {
        Self::InvalidExtension {
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: &str, reason: &str) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            reason: reason.to_string(),
        }
    }
}
