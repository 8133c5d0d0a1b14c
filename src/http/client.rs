use std::panic::AssertUnwindSafe;

use ::http::{HeaderMap, Method};
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};
use tracing::{debug, error, warn};

use crate::config::{Authorization, ClientConfig, CredentialFuture};
use crate::either::Either;
use crate::guard::{guard, guard_async, Fault};
use crate::http::{
    backend::{HttpBackend, Timeout},
    decode::{BodyDecoder, ContentTypeDecoder},
    request::HttpRequest,
    response::HttpResponse,
    utils::build_url,
};
use crate::optional::Optional;
use crate::problem_details::ProblemDetails;
use crate::KeyValuePairs;

/// Result of every client call
///
/// The right arm holds the decoded payload, absent only for `204 No Content`.
pub type Outcome<T> = Either<ProblemDetails, Optional<T>>;

/// One-shot readiness gate around the `Authorization` value
struct Credential {
    value: OnceCell<String>,
    pending: Mutex<Option<CredentialFuture>>,
}

impl Credential {
    fn new(authorization: Authorization) -> Self {
        match authorization {
            Authorization::Ready(token) => Self {
                value: OnceCell::new_with(Some(token)),
                pending: Mutex::new(None),
            },
            Authorization::Deferred(future) => Self {
                value: OnceCell::new(),
                pending: Mutex::new(Some(future)),
            },
        }
    }

    fn get(&self) -> Optional<&str> {
        self.value.get().map(String::as_str).into()
    }

    /// Every caller waits on the same cell; the first one drives the future.
    ///
    /// The future stays in the mutex until it completes, so a cancelled
    /// caller leaves it for the next one to resume.
    async fn resolve(&self) -> &str {
        self.value
            .get_or_init(|| async {
                let mut pending = self.pending.lock().await;
                let token = match pending.as_mut() {
                    Some(future) => match AssertUnwindSafe(future).catch_unwind().await {
                        Ok(token) => token,
                        Err(_) => {
                            error!("credential source panicked, continuing without authorization");
                            String::new()
                        }
                    },
                    None => String::new(),
                };
                *pending = None;
                debug!("authorization resolved");
                token
            })
            .await
    }
}

/// REST client that never fails with an error or a panic
///
/// Every call resolves to an [`Outcome`]: a [`ProblemDetails`] on the left
/// for transport failures, non-2xx statuses and undecodable bodies, or the
/// decoded payload on the right.
///
/// # Examples
///
/// ```no_run
/// use rest_either::{ClientConfig, RestClient};
/// use rest_either::http::ReqwestBackend;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ClientConfig::new("https://api.example.com").with_authorization("Bearer 12345");
/// let client = RestClient::new(config, ReqwestBackend::new()?);
///
/// let outcome = client.get::<serde_json::Value>("users", &[]).await;
/// match outcome.into_result() {
///     Ok(payload) => println!("payload: {payload:?}"),
///     Err(problem) => println!("{}: {}", problem.status, problem.title),
/// }
/// # Ok(())
/// # }
/// ```
pub struct RestClient<B, D = ContentTypeDecoder> {
    backend: Timeout<B>,
    decoder: D,
    base_url: String,
    custom_headers: KeyValuePairs,
    credential: Credential,
}

impl<B: HttpBackend + Send + Sync> RestClient<B> {
    pub fn new(config: ClientConfig, backend: B) -> Self {
        Self::with_decoder(config, backend, ContentTypeDecoder)
    }
}

impl<B, D> RestClient<B, D>
where
    B: HttpBackend + Send + Sync,
    D: BodyDecoder,
{
    pub fn with_decoder(config: ClientConfig, backend: B, decoder: D) -> Self {
        Self {
            backend: Timeout::new(backend, config.timeout),
            decoder,
            base_url: config.base_url,
            custom_headers: config.custom_headers,
            credential: Credential::new(config.authorization),
        }
    }

    /// True once the authorization value is known
    pub fn is_ready(&self) -> bool {
        self.credential.get().is_some()
    }

    /// Wait until the authorization value has resolved
    pub async fn ready(&self) {
        self.credential.resolve().await;
    }

    pub async fn get<T: DeserializeOwned>(&self, route: &str, query: &[(String, String)]) -> Outcome<T> {
        self.execute(Method::GET, route, query, None, HeaderMap::new())
            .await
    }

    pub async fn post<P, T>(&self, route: &str, body: &P) -> Outcome<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_with_body(Method::POST, route, body).await
    }

    pub async fn put<P, T>(&self, route: &str, body: &P) -> Outcome<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_with_body(Method::PUT, route, body).await
    }

    pub async fn patch<P, T>(&self, route: &str, body: &P) -> Outcome<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_with_body(Method::PATCH, route, body).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, route: &str) -> Outcome<T> {
        self.execute(Method::DELETE, route, &[], None, HeaderMap::new())
            .await
    }

    pub async fn delete_with_body<P, T>(&self, route: &str, body: &P) -> Outcome<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.execute_with_body(Method::DELETE, route, body).await
    }

    async fn execute_with_body<P, T>(&self, method: Method, route: &str, body: &P) -> Outcome<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.ready().await;
        match guard(|| serde_json::to_value(body)) {
            Either::Right(value) => {
                self.execute(method, route, &[], Some(value), HeaderMap::new())
                    .await
            }
            Either::Left(fault) => {
                let url = build_url(&self.base_url, route);
                warn!(%method, %url, error = %fault, "request body could not be serialized");
                Either::Left(ProblemDetails::from_fault(&fault, &url))
            }
        }
    }

    /// Run one request through the whole pipeline
    ///
    /// Headers are applied in order `Content-Type`, `Authorization`, the
    /// configured custom headers, then `headers`; a later entry replaces an
    /// earlier one with the same name.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        route: &str,
        query: &[(String, String)],
        body: Option<Value>,
        headers: HeaderMap,
    ) -> Outcome<T> {
        let authorization = self.credential.resolve().await;

        let mut builder = HttpRequest::builder(build_url(&self.base_url, route), method)
            .query(query)
            .header("Content-Type", "application/json")
            .header("Authorization", authorization)
            .headers_from_pairs(self.custom_headers.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .headers(headers);
        if let Some(value) = body {
            builder = builder.body(value.to_string());
        }
        let request = builder.build();
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = match guard_async(self.backend.send(&request)).await {
            Either::Right(response) => response,
            Either::Left(fault) => {
                warn!(url = %request.url, error = %fault, "transport failed");
                return Either::Left(ProblemDetails::from_fault(&fault, &request.url));
            }
        };
        debug!(url = %request.url, status = response.status, "response received");

        self.classify(&response, &request.url)
    }

    fn classify<T: DeserializeOwned>(&self, response: &HttpResponse, instance: &str) -> Outcome<T> {
        if response.is_no_content() {
            return Either::Right(Optional::None);
        }

        let decoded = guard(|| self.decoder.decode(response))
            .map_left(|fault| decode_problem(&fault, response, instance));

        if response.is_success() {
            return match decoded {
                Either::Right(value) => guard(|| serde_json::from_value::<T>(value))
                    .map(Optional::Some)
                    .map_left(|fault| decode_problem(&fault, response, instance)),
                Either::Left(problem) => Either::Left(problem),
            };
        }

        let problem = decoded
            .fold(Optional::Some, |body| ProblemDetails::from_value(&body))
            .if_none(|| {
                debug!(status = response.status, "error body is not problem details, using defaults");
                ProblemDetails::default()
            });
        Either::Left(problem)
    }
}

fn decode_problem(fault: &Fault, response: &HttpResponse, instance: &str) -> ProblemDetails {
    warn!(status = response.status, url = instance, error = %fault, "response body could not be decoded");
    ProblemDetails::from_decode_fault(fault, response.status, response.status_text(), instance)
}
