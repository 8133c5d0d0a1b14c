use crate::http::utils::encode_query;
use ::http::{HeaderMap, HeaderName, HeaderValue, Method};
use tracing::warn;

/// Builder for constructing HTTP requests with a fluent API
///
/// Header insertion replaces any earlier value of the same name, so the
/// order of calls decides precedence.
///
/// # Examples
///
/// ```
/// use rest_either::http::RequestBuilder;
/// use http::Method;
///
/// let request = RequestBuilder::new("https://api.example.com/users", Method::POST)
///     .header("Content-Type", "application/json")
///     .header("content-type", "application/merge-patch+json")
///     .body(r#"{"name":"Alice"}"#)
///     .build();
///
/// assert_eq!(request.headers["content-type"], "application/merge-patch+json");
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    url: String,
    method: Method,
    headers: HeaderMap,
    body: Option<String>,
}

impl RequestBuilder {
    pub fn new(url: impl Into<String>, method: Method) -> Self {
        Self {
            url: url.into(),
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a header, replacing any previous value under the same name
    ///
    /// Names or values that are not valid HTTP tokens are skipped.
    pub fn header(mut self, key: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let (key, value) = (key.as_ref(), value.as_ref());
        match (key.parse::<HeaderName>(), value.parse::<HeaderValue>()) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => warn!(header = key, "skipping invalid header"),
        }
        self
    }

    /// Merge a header map, replacing same-named entries
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        for (name, value) in headers {
            if let Some(name) = name {
                self.headers.insert(name, value);
            }
        }
        self
    }

    /// Add headers from key/value pairs in order
    pub fn headers_from_pairs<K, V>(self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .into_iter()
            .fold(self, |builder, (key, value)| builder.header(key, value))
    }

    /// Append url-encoded query parameters
    pub fn query(mut self, params: &[(String, String)]) -> Self {
        if !params.is_empty() {
            let separator = if self.url.contains('?') { '&' } else { '?' };
            self.url = format!("{}{}{}", self.url, separator, encode_query(params));
        }
        self
    }

    /// Set an already serialized body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn build(self) -> HttpRequest {
        HttpRequest {
            url: self.url,
            method: self.method,
            body: self.body,
            headers: self.headers,
        }
    }
}

/// Represents an HTTP request with URL, method, body, and headers
#[derive(Debug, PartialEq, Clone)]
pub struct HttpRequest {
    /// Fully qualified target URL, query included
    pub url: String,
    /// HTTP method to use
    pub method: Method,
    /// Optional request body
    pub body: Option<String>,
    /// HTTP headers to send
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// Create a request builder
    pub fn builder(url: impl Into<String>, method: Method) -> RequestBuilder {
        RequestBuilder::new(url, method)
    }

    /// Header value as a string, if present and printable
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_request_construction() {
        let req = HttpRequest::builder("http://example.com", Method::POST)
            .header("x-test", "1")
            .body("body")
            .build();
        assert_eq!(req.url, "http://example.com");
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.body, Some("body".to_string()));
        assert_eq!(req.header("x-test"), Some("1"));
        assert_eq!(req.header("x-missing"), None);
    }

    #[test]
    fn test_empty_header_value_is_kept() {
        let req = HttpRequest::builder("http://example.com", Method::GET)
            .header("Authorization", "")
            .build();
        assert!(req.headers.contains_key("authorization"));
        assert_eq!(req.header("authorization"), Some(""));
    }

    #[test]
    fn test_later_headers_override_earlier() {
        let mut overrides = HeaderMap::new();
        overrides.insert("authorization", "Bearer override".parse().unwrap());

        let req = HttpRequest::builder("http://example.com", Method::GET)
            .header("Content-Type", "application/json")
            .header("Authorization", "Bearer first")
            .headers_from_pairs([("content-type", "text/plain"), ("X-Trace", "abc")])
            .headers(overrides)
            .build();

        assert_eq!(req.header("content-type"), Some("text/plain"));
        assert_eq!(req.header("authorization"), Some("Bearer override"));
        assert_eq!(req.header("x-trace"), Some("abc"));
        assert_eq!(req.headers.len(), 3);
    }

    #[test]
    fn test_invalid_headers_are_skipped() {
        let req = HttpRequest::builder("http://example.com", Method::GET)
            .header("bad header", "x")
            .header("x-ok", "fine")
            .build();
        assert_eq!(req.headers.len(), 1);
    }

    #[test]
    fn test_query_is_encoded() {
        let params = vec![
            ("q".to_string(), "bar baz".to_string()),
            ("filter".to_string(), "a&b".to_string()),
        ];
        let req = HttpRequest::builder("http://example.com/search", Method::GET)
            .query(&params)
            .query(&[("page".to_string(), "2".to_string())])
            .build();
        assert_eq!(
            req.url,
            "http://example.com/search?q=bar%20baz&filter=a%26b&page=2"
        );
    }
}
