//! client config
//!
//! Everything a [`RestClient`](crate::RestClient) needs besides its
//! transport. The config is consumed at construction and never changes
//! afterwards.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::KeyValuePairs;

/// A credential that becomes known some time after construction
pub type CredentialFuture = Pin<Box<dyn Future<Output = String> + Send + 'static>>;

/// Value of the `Authorization` header
pub enum Authorization {
    /// Known up front
    Ready(String),
    /// Resolved once, on first use, by whichever call gets there first
    Deferred(CredentialFuture),
}

impl Authorization {
    pub fn deferred<F>(credential: F) -> Self
    where
        F: Future<Output = String> + Send + 'static,
    {
        Authorization::Deferred(Box::pin(credential))
    }
}

impl Default for Authorization {
    fn default() -> Self {
        Authorization::Ready(String::new())
    }
}

impl fmt::Debug for Authorization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the credential itself
        match self {
            Authorization::Ready(token) if token.is_empty() => f.write_str("Ready(<none>)"),
            Authorization::Ready(_) => f.write_str("Ready(<redacted>)"),
            Authorization::Deferred(_) => f.write_str("Deferred(<pending>)"),
        }
    }
}

impl From<String> for Authorization {
    fn from(token: String) -> Self {
        Authorization::Ready(token)
    }
}

impl From<&str> for Authorization {
    fn from(token: &str) -> Self {
        Authorization::Ready(token.to_string())
    }
}

/// REST client config.
#[derive(Debug, Default)]
pub struct ClientConfig {
    /// prefix for every route
    pub base_url: String,
    pub authorization: Authorization,
    /// sent with every request, later entries win over earlier ones
    pub custom_headers: KeyValuePairs,
    /// upper bound for a single transport call
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// create new config with no credential and no extra headers.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// set a credential known up front.
    pub fn with_authorization(mut self, authorization: impl Into<Authorization>) -> Self {
        self.authorization = authorization.into();
        self
    }

    /// set a credential resolved asynchronously.
    pub fn with_deferred_authorization<F>(mut self, credential: F) -> Self
    where
        F: Future<Output = String> + Send + 'static,
    {
        self.authorization = Authorization::deferred(credential);
        self
    }

    /// add a custom header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_headers.push((name.into(), value.into()));
        self
    }

    /// add several custom headers.
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.custom_headers.extend(headers);
        self
    }

    /// set transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("http://localhost")
            .with_authorization("Bearer 12345")
            .with_header("X-Tenant", "acme")
            .with_headers(vec![("X-Trace".to_string(), "1".to_string())])
            .with_timeout(Duration::from_secs(3));

        assert_eq!(config.base_url, "http://localhost");
        assert!(matches!(config.authorization, Authorization::Ready(ref t) if t == "Bearer 12345"));
        assert_eq!(
            config.custom_headers,
            vec![
                ("X-Tenant".to_string(), "acme".to_string()),
                ("X-Trace".to_string(), "1".to_string())
            ]
        );
        assert_eq!(config.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = ClientConfig::new("").with_authorization("Bearer secret");
        assert!(!format!("{config:?}").contains("secret"));

        let deferred = ClientConfig::new("").with_deferred_authorization(async { "x".to_string() });
        assert!(format!("{deferred:?}").contains("Deferred"));
    }
}
