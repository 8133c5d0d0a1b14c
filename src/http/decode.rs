use serde_json::Value;

use crate::http::{error::HttpError, response::HttpResponse};

/// The body-decode capability
///
/// Turns a buffered response into a JSON value. Failures are reported as
/// `HttpError`; the pipeline guards every call, so a decoder may also panic
/// without taking the caller down.
pub trait BodyDecoder {
    fn decode(&self, response: &HttpResponse) -> Result<Value, HttpError>;
}

impl<F> BodyDecoder for F
where
    F: Fn(&HttpResponse) -> Result<Value, HttpError>,
{
    fn decode(&self, response: &HttpResponse) -> Result<Value, HttpError> {
        self(response)
    }
}

/// Decodes by declared content type
///
/// JSON media types are parsed as JSON. Anything else, including a response
/// without a content type, is kept as a JSON string holding the raw text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentTypeDecoder;

impl BodyDecoder for ContentTypeDecoder {
    fn decode(&self, response: &HttpResponse) -> Result<Value, HttpError> {
        if response.is_json() {
            response.json()
        } else {
            Ok(Value::String(response.text().to_string()))
        }
    }
}
