//! Error handling module for booking-rules
//!
//! Rejected selection actions are not errors (see `selection::ActionEffect`).
//! These types cover the boundary: parsing caller input and reading
//! scenario files.

use thiserror::Error;

/// Main error type for booking-rules
#[derive(Error, Debug)]
pub enum BookingError {
    /// IO errors (scenario files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Value outside the closed service/year enumerations
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scenario file errors (loading, structure)
    #[error("Scenario error: {0}")]
    Scenario(String),

    /// Scenario replay hit a rejected action
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for booking-rules operations
pub type Result<T> = std::result::Result<T, BookingError>;

impl BookingError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a scenario error
    pub fn scenario(msg: impl Into<String>) -> Self {
        Self::Scenario(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookingError::invalid_input("unknown year 2019");
        assert_eq!(err.to_string(), "Invalid input: unknown year 2019");

        let err = BookingError::validation("step 1 rejected");
        assert_eq!(err.to_string(), "Validation error: step 1 rejected");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: BookingError = json_err.into();
        assert!(matches!(err, BookingError::Json(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BookingError = io_err.into();
        assert!(matches!(err, BookingError::Io(_)));
    }
}
