use std::io;

use thiserror::Error;

use crate::http::HttpError;

/// Errors of the `rest-either` binary
///
/// The library itself never returns these; request outcomes are always
/// an [`Either`](crate::Either). They cover what can go wrong around a
/// request: bad arguments, a client that cannot be built, broken stdout.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// HTTP client setup errors
    #[error(transparent)]
    Http(#[from] HttpError),
    /// CLI argument parsing errors
    #[error(transparent)]
    Cli(#[from] CliError),
    /// I/O errors (writing the response)
    #[error("I/O error: {0}")]
    Io(String),
    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// CLI argument parsing and validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CliError {
    #[error("Invalid base URL '{0}'. URLs must include protocol (http:// or https://)")]
    InvalidBaseUrl(String),
    #[error("Invalid header format '{0}'. Headers must be in 'key:value' format")]
    InvalidHeaderFormat(String),
    #[error("Invalid parameter '{0}'. Parameters must be 'key:value' (header) or 'key=value' (data)")]
    InvalidParamFormat(String),
    #[error("Unsupported HTTP method: '{0}'. Supported methods: GET, POST, PUT, DELETE, PATCH")]
    UnsupportedMethod(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl AppError {
    /// Provides a helpful suggestion for how to fix the error
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            AppError::Cli(CliError::InvalidBaseUrl(_)) => {
                Some("Example: rest-either --base-url https://api.example.com get users")
            }
            AppError::Cli(CliError::InvalidHeaderFormat(_)) => {
                Some("Example: --header Accept:application/json")
            }
            AppError::Cli(CliError::InvalidParamFormat(_)) => {
                Some("Example: rest-either post users name=john X-Request-Id:42")
            }
            AppError::Config(_) => Some("Check REST_EITHER_BASE_URL and REST_EITHER_AUTH"),
            _ => None,
        }
    }
}
