use thiserror::Error;

#[derive(Error, Debug)]
pub enum CustomerError {
    #[error("{message}")]
    ValidationError { message: String },

    #[error("{message}")]
    NotFoundError { message: String },

    #[error("{message}")]
    ApplicationError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Application,
    MalformedPayload,
    Internal,
}

impl CustomerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn not_found(entity: &str) -> Self {
        Self::NotFoundError {
            message: format!("{} not found", entity),
        }
    }

    pub fn application(message: impl Into<String>) -> Self {
        Self::ApplicationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::ApplicationError { .. } => ErrorCategory::Application,
            Self::SerializationError(_) => ErrorCategory::MalformedPayload,
            Self::IoError(_) | Self::ConfigError { .. } => ErrorCategory::Internal,
        }
    }

    /// HTTP status the entrypoints answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation
            | ErrorCategory::Application
            | ErrorCategory::MalformedPayload => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::Internal => 500,
        }
    }

    /// Message safe to hand back to a caller. Internal failures are not leaked.
    pub fn public_message(&self) -> String {
        match self.category() {
            ErrorCategory::MalformedPayload => "Invalid JSON in request body".to_string(),
            ErrorCategory::Internal => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CustomerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_category() {
        assert_eq!(CustomerError::validation("bad").status_code(), 400);
        assert_eq!(CustomerError::not_found("Customer").status_code(), 404);
        assert_eq!(CustomerError::application("store down").status_code(), 400);

        let io = CustomerError::from(std::io::Error::other("disk"));
        assert_eq!(io.status_code(), 500);
        assert_eq!(io.public_message(), "Internal server error");
    }

    #[test]
    fn test_not_found_message() {
        let err = CustomerError::not_found("Customer");
        assert_eq!(err.to_string(), "Customer not found");
        assert_eq!(err.public_message(), "Customer not found");
    }

    #[test]
    fn test_malformed_json_is_client_error() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = CustomerError::from(parse_err);
        assert_eq!(err.category(), ErrorCategory::MalformedPayload);
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.public_message(), "Invalid JSON in request body");
    }
}
