use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Document error: {message}")]
    Document { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        Self::Document {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("max_tokens must be greater than 0");
        assert_eq!(
            error.to_string(),
            "Validation error: max_tokens must be greater than 0"
        );
    }

    #[test]
    fn test_configuration_error() {
        let error = DomainError::configuration("overlap must be less than budget");
        assert_eq!(
            error.to_string(),
            "Configuration error: overlap must be less than budget"
        );
    }

    #[test]
    fn test_document_error() {
        let error = DomainError::document("document is empty");
        assert_eq!(error.to_string(), "Document error: document is empty");
    }
}
