// models/src/errors.rs
use std::io;
pub use thiserror::Error;
use serde_json::Error as SerdeJsonError;
use tokio::task::JoinError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HospitalError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout error: {0}")]
    Timeout(String),
    /// The backend answered 401 or 403.
    #[error("Authentication error: {0}")]
    Unauthorized(String),
    #[error("Backend rejected request ({status}): {message}")]
    Backend { status: u16, message: String },
    #[error("Invalid data provided: {0}")]
    InvalidData(String),
    #[error("No such route: {0}")]
    RouteNotFound(String),
    #[error("Session error: {0}")]
    Session(String),
    #[error("An internal error occurred: {0}")]
    Internal(String),
}

pub type HospitalResult<T> = Result<T, HospitalError>;

impl HospitalError {
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, HospitalError::Unauthorized(_))
    }

    /// Message shown to the user after a failed write: the backend's own
    /// message when it sent one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            HospitalError::Backend { message, .. } | HospitalError::Unauthorized(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            _ => fallback.to_string(),
        }
    }
}

impl From<&str> for HospitalError {
    fn from(error: &str) -> Self {
        HospitalError::InvalidData(error.to_string())
    }
}

impl From<io::Error> for HospitalError {
    fn from(err: io::Error) -> Self {
        HospitalError::Io(err.to_string())
    }
}

impl From<SerdeJsonError> for HospitalError {
    fn from(err: SerdeJsonError) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            HospitalError::Deserialization(format!("JSON error: {}", err))
        } else {
            HospitalError::Serialization(format!("JSON error: {}", err))
        }
    }
}

impl From<reqwest::Error> for HospitalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return HospitalError::Timeout(err.to_string());
        }
        match err.status().map(|s| s.as_u16()) {
            Some(401) | Some(403) => HospitalError::Unauthorized(err.to_string()),
            Some(status) => HospitalError::Backend { status, message: err.to_string() },
            None if err.is_decode() => HospitalError::Deserialization(err.to_string()),
            None => HospitalError::Network(err.to_string()),
        }
    }
}

impl From<tokio::time::error::Elapsed> for HospitalError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        HospitalError::Timeout("operation timed out".into())
    }
}

impl From<JoinError> for HospitalError {
    fn from(err: JoinError) -> Self {
        HospitalError::Internal(format!("Task failed to join: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::HospitalError;

    #[test]
    fn backend_message_wins_over_fallback() {
        let err = HospitalError::Backend { status: 400, message: "Slot already booked".into() };
        assert_eq!(err.user_message("Update failed"), "Slot already booked");
    }

    #[test]
    fn network_failure_uses_fallback() {
        let err = HospitalError::Network("connection refused".into());
        assert_eq!(err.user_message("Update failed"), "Update failed");
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn empty_backend_message_uses_fallback() {
        let err = HospitalError::Backend { status: 500, message: String::new() };
        assert_eq!(err.user_message("Payment failed"), "Payment failed");
    }

    #[test]
    fn json_syntax_error_is_deserialization() {
        let err: HospitalError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, HospitalError::Deserialization(_)));
    }
}
