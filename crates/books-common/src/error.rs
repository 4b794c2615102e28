//! Error types shared by the books workspace

use thiserror::Error;

/// Result type alias for shared utilities
pub type Result<T> = std::result::Result<T, BooksError>;

/// Main error type for shared utilities
#[derive(Error, Debug)]
pub enum BooksError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value for {name}: {value}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

impl BooksError {
    /// Create an invalid setting error for an environment variable or option
    pub fn invalid_setting(name: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidSetting {
            name,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_setting_message() {
        let err = BooksError::invalid_setting("LOG_LEVEL", "loud");
        assert_eq!(err.to_string(), "Invalid value for LOG_LEVEL: loud");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BooksError = io.into();
        assert!(matches!(err, BooksError::Io(_)));
    }
}
