//! Failure outcomes of a single fetch.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    /// No response arrived: connection refused, DNS failure, timeout.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The provider answered with something other than 200.
    #[error("Provider returned status {status}: {body}")]
    Provider { status: u16, body: String },

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Delivery to paired device failed: {0}")]
    Delivery(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The local HTTP client could not be built (e.g. TLS backend setup).
    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),
}

impl FetchError {
    /// User-friendly error message for display on the host.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(_) => "Could not reach the weather service. Check your connection.".to_string(),
            Self::Provider { status: 401, .. } => "The weather service rejected the API key.".to_string(),
            Self::Provider { status: 429, .. } => "Too many requests to the weather service. Try again later.".to_string(),
            Self::Provider { status, .. } => format!("The weather service returned an error ({status})."),
            Self::MalformedPayload(_) => "The weather service sent an unreadable response.".to_string(),
            Self::Delivery(_) => "Could not deliver the update to the watch.".to_string(),
            Self::InvalidUrl(url) => format!("Invalid weather service URL: {url}"),
            Self::ClientSetup(_) => "Could not initialise the HTTP client on this machine.".to_string(),
        }
    }

    /// Whether a caller could reasonably try again. Nothing in this crate retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Provider { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = FetchError::Provider { status: 429, body: String::new() };
        assert!(err.user_message().contains("Too many requests"));

        let err = FetchError::Provider { status: 404, body: "city not found".into() };
        assert!(err.user_message().contains("404"));

        let err = FetchError::Transport("timed out".into());
        assert!(err.user_message().contains("connection"));
    }

    #[test]
    fn test_is_retryable() {
        assert!(FetchError::Transport("reset".into()).is_retryable());
        assert!(FetchError::Provider { status: 503, body: String::new() }.is_retryable());
        assert!(FetchError::Provider { status: 429, body: String::new() }.is_retryable());
        assert!(!FetchError::Provider { status: 404, body: String::new() }.is_retryable());
        assert!(!FetchError::MalformedPayload("eof".into()).is_retryable());
        assert!(!FetchError::Delivery("closed".into()).is_retryable());
        assert!(!FetchError::ClientSetup("no tls backend".into()).is_retryable());
    }

    #[test]
    fn test_client_setup_is_not_a_connection_problem() {
        let err = FetchError::ClientSetup("no tls backend".into());
        assert!(!err.user_message().contains("connection"));
        assert!(err.to_string().contains("HTTP client setup failed"));
    }

    #[test]
    fn test_json_error_is_malformed_payload() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        assert!(matches!(FetchError::from(err), FetchError::MalformedPayload(_)));
    }
}
