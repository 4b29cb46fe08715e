/// All errors that can occur while fetching feeds, parsing schedules or
/// persisting preferences.
#[derive(thiserror::Error, Debug)]
pub enum MatchdayError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode json from {url}: {source}")]
    Json {
        url: String,
        source: serde_json::Error,
    },

    /// A kickoff timestamp was missing an offset or could not be parsed.
    #[error("invalid kickoff time {raw:?}: {source}")]
    InvalidKickoff {
        raw: String,
        source: chrono::ParseError,
    },

    /// Reading or writing the preference store failed.
    #[error("preference store i/o failed: {0}")]
    Store(#[from] std::io::Error),

    /// The preference store file is not a JSON object of strings.
    #[error("preference store is malformed: {0}")]
    StoreFormat(#[from] serde_json::Error),
}

impl MatchdayError {
    /// Whether another attempt at the same request could succeed.
    ///
    /// Transport failures and 5xx/429 responses are retryable; client
    /// errors and undecodable bodies are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            MatchdayError::Http { .. } | MatchdayError::ResponseBody { .. } => true,
            MatchdayError::UnexpectedStatus { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchdayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_retryability() {
        let server = MatchdayError::UnexpectedStatus {
            url: "https://example.test".to_owned(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        let missing = MatchdayError::UnexpectedStatus {
            url: "https://example.test".to_owned(),
            status: reqwest::StatusCode::NOT_FOUND,
        };
        assert!(server.is_retryable());
        assert!(!missing.is_retryable());
    }

    #[test]
    fn test_kickoff_error_message_includes_input() {
        let source = chrono::DateTime::parse_from_rfc3339("nope").unwrap_err();
        let err = MatchdayError::InvalidKickoff {
            raw: "nope".to_owned(),
            source,
        };
        assert!(err.to_string().contains("\"nope\""));
    }
}
