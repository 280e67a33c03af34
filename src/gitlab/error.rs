/// Classification of API errors for retry logic
#[derive(Debug, Clone, PartialEq)]
pub enum ApiRetryableError {
    /// Errors that should be retried (5xx server errors, network issues)
    Retryable(String),
    /// Rate limiting errors (429) - retryable with backoff
    RateLimit,
    /// Client errors that should not be retried (4xx except 429)
    NonRetryable(String),
}

impl ApiRetryableError {
    /// Classify a non-success HTTP response by its status code
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let code = status.as_u16();
        let detailed_error = format!("GitLab API error - Status: {}, Message: {}", code, body);

        match code {
            429 => {
                tracing::debug!("Rate limit (429) detected for GitLab API request");
                Self::RateLimit
            }
            400..=499 => {
                tracing::debug!("Non-retryable client error ({}): {}", code, detailed_error);
                Self::NonRetryable(detailed_error)
            }
            500..=599 => {
                tracing::debug!("Server error ({}) - will retry: {}", code, detailed_error);
                Self::Retryable(detailed_error)
            }
            _ => {
                tracing::debug!(
                    "Unexpected status code ({}) - treating as non-retryable: {}",
                    code,
                    detailed_error
                );
                Self::NonRetryable(detailed_error)
            }
        }
    }

    /// Convert a transport-level reqwest error to a retry category
    pub fn from_reqwest_error(error: reqwest::Error) -> Self {
        tracing::debug!("Raw reqwest error: {:?}", error);

        if let Some(status) = error.status() {
            return Self::from_status(status, &error.to_string());
        }

        if error.is_timeout() || error.is_connect() || error.is_request() {
            let error_msg = format!("HTTP transport error: {}", error);
            tracing::debug!("Transport error - will retry: {}", error_msg);
            Self::Retryable(error_msg)
        } else if error.is_decode() {
            let error_msg = format!("JSON parsing error: {}", error);
            tracing::debug!("Decode error - not retryable: {}", error_msg);
            Self::NonRetryable(error_msg)
        } else {
            let error_msg = format!("Unknown error type: {}", error);
            tracing::debug!(
                "Unknown error type - treating as non-retryable: {}",
                error_msg
            );
            Self::NonRetryable(error_msg)
        }
    }
}

impl std::fmt::Display for ApiRetryableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Retryable(msg) => write!(f, "Retryable error: {}", msg),
            Self::RateLimit => write!(f, "Rate limit error"),
            Self::NonRetryable(msg) => write!(f, "Non-retryable error: {}", msg),
        }
    }
}

impl std::error::Error for ApiRetryableError {}
