//! Error types for the genmedia crate

use thiserror::Error;

/// Result type for genmedia operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for genmedia operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local file or subprocess I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API returned an error response
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },

    /// Authentication error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The provider rejected the call with a rate-limit status
    #[error("Rate limit exceeded. Please retry after {retry_after_secs} seconds")]
    RateLimit {
        /// Seconds to wait before retrying
        retry_after_secs: u64,
    },

    /// The credential environment variable is not set
    #[error("{0} is not set")]
    MissingCredential(String),

    /// A generation spec failed validation
    #[error("Invalid spec: {0}")]
    InvalidSpec(String),

    /// The model answered, but the answer is unusable
    #[error("Unexpected response format: {0}")]
    UnexpectedResponse(String),

    /// The model reported that it did not follow the instructions
    #[error("AI determined that the prompt instructions were not followed (check=false)")]
    NotCompliant,

    /// A long-running operation finished with an error object
    #[error("Video generation failed: {0}")]
    OperationFailed(String),

    /// A long-running operation did not finish in time
    #[error("Video generation timed out after {secs} seconds")]
    OperationTimeout {
        /// Poll timeout in seconds
        secs: u64,
    },

    /// External transcoder failure
    #[error("Transcode error: {0}")]
    Transcode(String),

    /// A result reached the materializer without its required fields
    #[error("Invalid generation result: {0}")]
    Contract(String),

    /// The bounded retry loop gave up
    #[error("Failed to generate {what} after {attempts} attempts: {last}")]
    RetriesExhausted {
        /// What was being generated
        what: &'static str,
        /// Number of attempts made
        attempts: u32,
        /// The error of the final attempt
        last: Box<Error>,
    },

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status code carried by this error, if any
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api { status_code, .. } => Some(*status_code),
            Error::RateLimit { .. } => Some(429),
            Error::Auth(_) => Some(401),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the generation executor may try again after this error.
    ///
    /// Client errors other than 429 are final, as are configuration and
    /// contract errors. Everything raised while dispatching, parsing or
    /// validating a response is retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::MissingCredential(_)
            | Error::InvalidSpec(_)
            | Error::Contract(_)
            | Error::RetriesExhausted { .. } => false,
            _ => !matches!(
                self.status_code(),
                Some(code) if (400..500).contains(&code) && code != 429
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_final_except_rate_limit() {
        let bad_request = Error::Api {
            status_code: 400,
            message: "bad".to_string(),
        };
        assert!(!bad_request.is_retryable());
        assert!(!Error::Auth("nope".to_string()).is_retryable());
        assert!(Error::RateLimit { retry_after_secs: 60 }.is_retryable());
    }

    #[test]
    fn test_server_and_content_errors_are_retried() {
        let unavailable = Error::Api {
            status_code: 503,
            message: "overloaded".to_string(),
        };
        assert!(unavailable.is_retryable());
        assert!(Error::NotCompliant.is_retryable());
        assert!(Error::OperationTimeout { secs: 600 }.is_retryable());
        assert!(Error::UnexpectedResponse("x".to_string()).is_retryable());
    }

    #[test]
    fn test_fatal_errors() {
        assert!(!Error::MissingCredential("GEMINI_API_KEY".to_string()).is_retryable());
        assert!(!Error::InvalidSpec("mode".to_string()).is_retryable());
        assert!(!Error::Contract("mime".to_string()).is_retryable());
    }
}
