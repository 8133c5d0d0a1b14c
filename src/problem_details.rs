use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::guard::Fault;
use crate::optional::Optional;

/// Keys an object must carry to be recognised as problem details
const REQUIRED_KEYS: [&str; 5] = ["type", "title", "status", "detail", "instance"];

const ERRORS_KEY: &str = "errors";

pub const DEFAULT_TYPE: &str = "Error";
pub const DEFAULT_TITLE: &str = "An unknown error occurred";
pub const DEFAULT_STATUS: u16 = 500;

/// RFC 7807 problem details, the single failure shape of this crate
///
/// Every field has a default, so partial records are built with struct
/// update syntax:
///
/// ```
/// use rest_either::ProblemDetails;
///
/// let not_found = ProblemDetails {
///     status: 404,
///     title: "Not Found".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(not_found.problem_type, "Error");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemDetails {
    /// Error category URI or tag
    #[serde(rename = "type")]
    pub problem_type: String,
    /// Short human-readable summary
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Occurrence-specific explanation
    pub detail: String,
    /// The failing request or resource
    pub instance: String,
    /// Extension: individual error messages
    pub errors: Vec<String>,
    /// Any other members of a server body, such as `traceId`
    #[serde(flatten)]
    pub extensions: Map<String, Value>,
}

impl Default for ProblemDetails {
    fn default() -> Self {
        Self {
            problem_type: DEFAULT_TYPE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            status: DEFAULT_STATUS,
            detail: String::new(),
            instance: String::new(),
            errors: Vec::new(),
            extensions: Map::new(),
        }
    }
}

impl ProblemDetails {
    /// Problem for a request that never produced a response
    pub fn from_fault(fault: &Fault, instance: &str) -> Self {
        Self {
            problem_type: fault.name.clone(),
            title: fault.message.clone(),
            status: DEFAULT_STATUS,
            detail: fault.trace.clone(),
            instance: instance.to_string(),
            ..Default::default()
        }
    }

    /// Problem for a response whose body could not be decoded
    pub fn from_decode_fault(fault: &Fault, status: u16, status_text: &str, instance: &str) -> Self {
        Self {
            title: status_text.to_string(),
            status,
            detail: fault.message.clone(),
            instance: instance.to_string(),
            ..Default::default()
        }
    }

    /// Take a decoded body verbatim if it has the problem-details shape
    ///
    /// Field values are read leniently: a `null` keeps the field default and
    /// any non-string value is kept as its JSON text. The same goes for
    /// `errors` entries. Members outside the record land in `extensions`
    /// untouched.
    pub fn from_value(value: &Value) -> Optional<Self> {
        if !is_problem_details(value) {
            return Optional::None;
        }
        let defaults = ProblemDetails::default();
        let text = |key: &str, fallback: String| match &value[key] {
            Value::Null => fallback,
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let status = match &value["status"] {
            Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        let entry = |item: &Value| match item {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let errors = match &value[ERRORS_KEY] {
            Value::Null => Vec::new(),
            Value::Array(items) => items.iter().map(entry).collect(),
            other => vec![entry(other)],
        };
        let extensions = value
            .as_object()
            .map(|map| {
                map.iter()
                    .filter(|(key, _)| !REQUIRED_KEYS.contains(&key.as_str()) && key.as_str() != ERRORS_KEY)
                    .map(|(key, member)| (key.clone(), member.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Optional::Some(Self {
            problem_type: text("type", defaults.problem_type),
            title: text("title", defaults.title),
            status: status.unwrap_or(DEFAULT_STATUS),
            detail: text("detail", defaults.detail),
            instance: text("instance", defaults.instance),
            errors,
            extensions,
        })
    }
}

/// Structural check for the problem-details shape
///
/// True iff `value` is an object holding all of `type`, `title`, `status`,
/// `detail` and `instance`, whatever their values. `errors` is optional.
pub fn is_problem_details(value: &Value) -> bool {
    match value {
        Value::Object(map) => REQUIRED_KEYS.iter().all(|key| map.contains_key(*key)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_problem() -> Value {
        json!({
            "type": "https://tools.ietf.org/html/rfc7231#section-6.5.1",
            "title": "One or more validation errors occurred.",
            "status": 400,
            "detail": "See the errors property for details.",
            "instance": "/api/todos/9",
            "errors": ["You cannot edit Completed Todos"]
        })
    }

    #[test]
    fn test_defaults() {
        let problem = ProblemDetails::default();
        assert_eq!(problem.problem_type, "Error");
        assert_eq!(problem.title, "An unknown error occurred");
        assert_eq!(problem.status, 500);
        assert!(problem.detail.is_empty());
        assert!(problem.instance.is_empty());
        assert!(problem.errors.is_empty());
        assert!(problem.extensions.is_empty());
    }

    #[test]
    fn test_is_problem_details_accepts_full_shape() {
        assert!(is_problem_details(&validation_problem()));
    }

    #[test]
    fn test_is_problem_details_without_errors_or_with_extras() {
        let mut value = validation_problem();
        value.as_object_mut().unwrap().remove("errors");
        assert!(is_problem_details(&value));

        value["traceId"] = json!("abc");
        assert!(is_problem_details(&value));

        let nulls = json!({"type": null, "title": null, "status": null, "detail": null, "instance": null});
        assert!(is_problem_details(&nulls));
    }

    #[test]
    fn test_is_problem_details_rejects_other_values() {
        assert!(!is_problem_details(&Value::Null));
        assert!(!is_problem_details(&json!(42)));
        assert!(!is_problem_details(&json!("type title status detail instance")));
        assert!(!is_problem_details(&json!([validation_problem()])));

        for key in REQUIRED_KEYS {
            let mut value = validation_problem();
            value.as_object_mut().unwrap().remove(key);
            assert!(!is_problem_details(&value), "missing {key} should not match");
        }
    }

    #[test]
    fn test_from_value_keeps_body_verbatim() {
        let problem = ProblemDetails::from_value(&validation_problem()).if_none(Default::default);
        assert_eq!(
            problem,
            ProblemDetails {
                problem_type: "https://tools.ietf.org/html/rfc7231#section-6.5.1".to_string(),
                title: "One or more validation errors occurred.".to_string(),
                status: 400,
                detail: "See the errors property for details.".to_string(),
                instance: "/api/todos/9".to_string(),
                errors: vec!["You cannot edit Completed Todos".to_string()],
                extensions: Map::new(),
            }
        );
    }

    #[test]
    fn test_from_value_keeps_extension_members() {
        let mut value = validation_problem();
        value["traceId"] = json!("00-abc-01");
        value["retryAfter"] = json!({"seconds": 30});

        let problem = ProblemDetails::from_value(&value).if_none(Default::default);
        assert_eq!(problem.extensions.len(), 2);
        assert_eq!(problem.extensions["traceId"], "00-abc-01");
        assert_eq!(problem.extensions["retryAfter"], json!({"seconds": 30}));

        let wire = serde_json::to_value(&problem).unwrap();
        assert_eq!(wire, value);
    }

    #[test]
    fn test_from_value_is_lenient_about_field_types() {
        let value = json!({
            "type": null,
            "title": 7,
            "status": "404",
            "detail": "d",
            "instance": "",
            "errors": ["a", 1, "b"]
        });
        let problem = ProblemDetails::from_value(&value).if_none(Default::default);
        assert_eq!(problem.problem_type, "Error");
        assert_eq!(problem.title, "7");
        assert_eq!(problem.status, 404);
        assert_eq!(
            problem.errors,
            vec!["a".to_string(), "1".to_string(), "b".to_string()]
        );
        assert!(problem.extensions.is_empty());

        let keyed = json!({
            "type": "t", "title": "t", "status": 400, "detail": "", "instance": "",
            "errors": {"name": ["required"]}
        });
        let problem = ProblemDetails::from_value(&keyed).if_none(Default::default);
        assert_eq!(problem.errors, vec![r#"{"name":["required"]}"#.to_string()]);

        let value = json!({"type": "t", "title": "t", "status": 70000, "detail": "", "instance": ""});
        assert_eq!(ProblemDetails::from_value(&value).map(|p| p.status), Optional::Some(500));
    }

    #[test]
    fn test_from_value_rejects_non_conforming() {
        assert!(ProblemDetails::from_value(&json!({"message": "nope"})).is_none());
    }

    #[test]
    fn test_serde_wire_shape() {
        let problem = ProblemDetails {
            problem_type: "about:blank".to_string(),
            ..Default::default()
        };
        let wire = serde_json::to_value(&problem).unwrap();
        assert_eq!(wire["type"], "about:blank");
        assert_eq!(wire["errors"], json!([]));
        assert!(is_problem_details(&wire));

        let partial: ProblemDetails = serde_json::from_value(json!({"title": "t"})).unwrap();
        assert_eq!(partial.status, 500);
        assert_eq!(partial.title, "t");
    }

    #[test]
    fn test_fault_mappings() {
        let fault = Fault::new("NetworkError", "connection refused").with_trace("caused by: os error 111");
        let problem = ProblemDetails::from_fault(&fault, "http://localhost/pass");
        assert_eq!(problem.problem_type, "NetworkError");
        assert_eq!(problem.title, "connection refused");
        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail, "caused by: os error 111");
        assert_eq!(problem.instance, "http://localhost/pass");

        let fault = Fault::new("SyntaxError", "expected value");
        let problem = ProblemDetails::from_decode_fault(&fault, 502, "Bad Gateway", "http://localhost/x");
        assert_eq!(problem.problem_type, "Error");
        assert_eq!(problem.title, "Bad Gateway");
        assert_eq!(problem.status, 502);
        assert_eq!(problem.detail, "expected value");
    }
}
