//! Error types for the analysis lifecycle.

use thiserror::Error;

/// Generic message used when a failed response carries no `error` field.
pub const GENERIC_ANALYSIS_FAILURE: &str = "Analysis failed";

/// Submission rejected locally, before any request is built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter code to analyze")]
    EmptyCode,
}

/// Errors that can occur while talking to the analysis backend.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("network error: {source}")]
    Network {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("request timed out")]
    Timeout,
    #[error("{message}")]
    Analysis { status: u16, message: String },
    #[error("invalid analysis response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Wrap a transport-level failure.
    pub fn network<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ClientError::Network {
            source: Box::new(source),
        }
    }

    /// Message shown to the user in the error pane.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Network { .. } => {
                "Network error: unable to reach the analysis service".to_string()
            }
            ClientError::Timeout => "The analysis request timed out".to_string(),
            ClientError::Analysis { message, .. } => message.clone(),
            ClientError::InvalidResponse(_) => "Received an invalid analysis response".to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::network(e)
        }
    }
}

/// Non-fatal chart failures. Logged and skipped by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("charting backend is not available")]
    Unavailable,
    #[error("malformed series: {0}")]
    MalformedSeries(String),
    #[error("chart backend failed: {0}")]
    Backend(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_message_is_verbatim() {
        let err = ClientError::Analysis {
            status: 500,
            message: "Execution timeout".to_string(),
        };
        assert_eq!(err.user_message(), "Execution timeout");
        assert_eq!(err.to_string(), "Execution timeout");
    }

    #[test]
    fn test_network_error_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = ClientError::network(io);
        assert!(err.to_string().contains("refused"));
        assert!(std::error::Error::source(&err).is_some());
        assert!(!err.user_message().contains("refused"));
    }
}
