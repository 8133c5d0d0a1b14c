use crate::http::error::HttpError;
use ::http::{HeaderMap, StatusCode};

/// A buffered response as returned by an [`HttpBackend`](crate::http::HttpBackend)
///
/// # Examples
///
/// ```
/// use rest_either::http::HttpResponse;
/// use http::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("content-type", "application/problem+json".parse().unwrap());
///
/// let response = HttpResponse {
///     status: 404,
///     headers,
///     body: r#"{"title": "Not Found"}"#.to_string(),
/// };
///
/// assert!(!response.is_success());
/// assert!(response.is_json());
/// assert_eq!(response.status_text(), "Not Found");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code (200, 404, 500, etc.)
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as string
    pub body: String,
}

impl HttpResponse {
    /// Returns true if the response status indicates success (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for 204 No Content
    pub fn is_no_content(&self) -> bool {
        self.status == StatusCode::NO_CONTENT.as_u16()
    }

    /// Canonical reason phrase for the status, empty if unknown
    pub fn status_text(&self) -> &'static str {
        StatusCode::from_u16(self.status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("")
    }

    /// Returns the Content-Type header value, if present
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
    }

    /// Returns true if the Content-Type names a JSON media type
    ///
    /// Covers `application/json`, `text/json` and structured `+json`
    /// suffixes such as `application/problem+json`.
    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| {
                let essence = ct.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
                essence == "application/json" || essence == "text/json" || essence.ends_with("+json")
            })
            .unwrap_or(false)
    }

    /// Parse the response body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_str(&self.body)
            .map_err(|e| HttpError::Parse(format!("Failed to parse JSON response: {e}")))
    }

    /// Get the response body as a string reference
    pub fn text(&self) -> &str {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&'static str>, body: &str) -> HttpResponse {
        let mut headers = HeaderMap::new();
        if let Some(ct) = content_type {
            headers.insert("content-type", ::http::HeaderValue::from_static(ct));
        }
        HttpResponse {
            status,
            headers,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_status_classes() {
        assert!(response(200, None, "").is_success());
        assert!(response(204, None, "").is_success());
        assert!(response(204, None, "").is_no_content());
        assert!(!response(200, None, "").is_no_content());
        assert!(!response(302, None, "").is_success());

        assert!(!response(404, None, "").is_success());
        assert!(!response(503, None, "").is_success());
    }

    #[test]
    fn test_status_text() {
        assert_eq!(response(401, None, "").status_text(), "Unauthorized");
        assert_eq!(response(500, None, "").status_text(), "Internal Server Error");
        assert_eq!(response(599, None, "").status_text(), "");
    }

    #[test]
    fn test_is_json_media_types() {
        assert!(response(200, Some("application/json"), "{}").is_json());
        assert!(response(200, Some("application/json; charset=utf-8"), "{}").is_json());
        assert!(response(200, Some("text/json"), "{}").is_json());
        assert!(response(400, Some("application/problem+json"), "{}").is_json());
        assert!(response(200, Some("Application/JSON"), "{}").is_json());
        assert!(!response(200, Some("text/html"), "<html></html>").is_json());
        assert!(!response(200, Some("text/plain"), "{}").is_json());
        assert!(!response(200, None, "{}").is_json());
    }

    #[test]
    fn test_json_parsing() {
        #[derive(serde::Deserialize, PartialEq, Debug)]
        struct Payload {
            data: String,
        }

        let parsed: Payload = response(200, None, r#"{"data": "response"}"#).json().unwrap();
        assert_eq!(parsed, Payload { data: "response".to_string() });

        let invalid: Result<Payload, _> = response(200, None, "invalid json").json();
        assert!(matches!(invalid, Err(HttpError::Parse(_))));
    }
}
