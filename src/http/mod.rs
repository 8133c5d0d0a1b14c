pub mod backend;
pub mod client;
pub mod decode;
pub mod error;
pub mod request;
pub mod response;
pub mod utils;

pub use backend::{HttpBackend, ReqwestBackend, Timeout};
pub use client::{Outcome, RestClient};
pub use decode::{BodyDecoder, ContentTypeDecoder};
pub use error::HttpError;
pub use request::{HttpRequest, RequestBuilder};
pub use response::HttpResponse;
pub use utils::{build_url, encode_query, parse_method};
