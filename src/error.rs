//! Errors returned by the portfolio API client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Could not reach the server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from the server: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of a rejected request
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        ApiError::Status {
            status: code,
            message: "nope".to_string(),
        }
    }

    #[test]
    fn test_status_message_is_displayed_verbatim() {
        assert_eq!(status(500).to_string(), "nope");
    }

    #[test]
    fn test_status_classification() {
        assert!(status(404).is_not_found());
        assert!(status(401).is_unauthorized());
        assert!(status(403).is_unauthorized());
        assert!(!status(500).is_unauthorized());
        assert!(ApiError::InvalidUrl("x".to_string()).status().is_none());
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err: ApiError = serde_json::from_str::<u32>("not json").unwrap_err().into();
        assert!(matches!(err, ApiError::Decode(_)));
        assert!(err.to_string().starts_with("Unexpected response"));
    }
}
