use thiserror::Error;

/// Failure modes of the transport and decode capabilities
///
/// Backends and decoders signal failure by returning one of these; the
/// pipeline captures it into a [`Fault`](crate::Fault) and never lets it reach
/// the caller directly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HttpError {
    /// Network-related errors (connection refused, DNS, TLS, etc.)
    #[error("Network error: {0}")]
    Network(String),
    /// Body could not be parsed or serialized
    #[error("Parse error: {0}")]
    Parse(String),
    /// Unsupported HTTP method
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
    /// The transport did not answer within the configured limit
    #[error("Request timed out after {0}ms")]
    Timeout(u128),
    /// Other errors
    #[error("Error: {0}")]
    Other(String),
}

impl HttpError {
    /// Stable name of the failure kind, used as the problem `type`
    pub fn kind(&self) -> &'static str {
        match self {
            HttpError::Network(_) => "NetworkError",
            HttpError::Parse(_) => "ParseError",
            HttpError::UnsupportedMethod(_) => "UnsupportedMethodError",
            HttpError::Timeout(_) => "TimeoutError",
            HttpError::Other(_) => "Error",
        }
    }

    /// The message without the kind prefix
    pub fn message(&self) -> String {
        match self {
            HttpError::Network(msg) | HttpError::Parse(msg) | HttpError::Other(msg) => {
                msg.clone()
            }
            HttpError::UnsupportedMethod(method) => format!("unsupported method {method}"),
            HttpError::Timeout(ms) => format!("no response within {ms}ms"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_kind() {
        let err = HttpError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert_eq!(err.kind(), "NetworkError");
        assert_eq!(err.message(), "connection refused");

        let err = HttpError::Timeout(1500);
        assert_eq!(err.to_string(), "Request timed out after 1500ms");
        assert_eq!(err.kind(), "TimeoutError");
    }
}
