use crate::http::error::HttpError;
use ::http::Method;

/// Parse a verb name into one of the methods the client issues
///
/// # Examples
///
/// ```
/// use rest_either::http::parse_method;
/// use http::Method;
///
/// assert_eq!(parse_method("GET").unwrap(), Method::GET);
/// assert_eq!(parse_method("patch").unwrap(), Method::PATCH);
/// assert!(parse_method("HEAD").is_err());
/// ```
pub fn parse_method(s: &str) -> Result<Method, HttpError> {
    match s.to_uppercase().as_str() {
        "GET" => Ok(Method::GET),
        "POST" => Ok(Method::POST),
        "PUT" => Ok(Method::PUT),
        "DELETE" => Ok(Method::DELETE),
        "PATCH" => Ok(Method::PATCH),
        _ => Err(HttpError::UnsupportedMethod(s.to_string())),
    }
}

/// Join a base URL and a route with exactly one slash between them
pub fn build_url(base_url: &str, route: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        route.trim_start_matches('/')
    )
}

/// Encode pairs as `application/x-www-form-urlencoded` query text
pub fn encode_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
