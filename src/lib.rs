//! # rest-either
//!
//! An HTTP client that never fails with an error or a panic. Every call
//! resolves to an [`Either`]: a [`ProblemDetails`] on the left when anything
//! went wrong, or the decoded payload on the right.
//!
//! Failures are normalized in a fixed order of precedence:
//!
//! 1. the transport failed (connection refused, timeout, panic in a backend);
//! 2. the server answered non-2xx with an RFC 7807 problem body, which is
//!    passed through;
//! 3. the server answered non-2xx with anything else, which becomes the
//!    default problem;
//! 4. `204 No Content` is a success with an absent payload;
//! 5. a 2xx body that decodes is a success, one that doesn't is a problem.
//!
//! ```no_run
//! use rest_either::{ClientConfig, Either, Optional, RestClient};
//! use rest_either::http::ReqwestBackend;
//!
//! # async fn example() -> Result<(), rest_either::http::HttpError> {
//! let config = ClientConfig::new("https://api.example.com")
//!     .with_deferred_authorization(async { "Bearer 12345".to_string() });
//! let client = RestClient::new(config, ReqwestBackend::new()?);
//!
//! match client.get::<serde_json::Value>("todos/9", &[]).await {
//!     Either::Right(Optional::Some(todo)) => println!("{todo}"),
//!     Either::Right(Optional::None) => println!("nothing"),
//!     Either::Left(problem) => eprintln!("{} {}", problem.status, problem.title),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod either;
pub mod error;
pub mod guard;
pub mod http;
pub mod logging;
pub mod optional;
pub mod printer;
pub mod problem_details;

pub use config::{Authorization, ClientConfig};
pub use either::Either;
pub use guard::{guard, guard_async, Fault};
pub use http::{Outcome, RestClient};
pub use optional::Optional;
pub use problem_details::{is_problem_details, ProblemDetails};

use std::future::Future;
use std::time::Duration;

use ::http::{HeaderMap, HeaderName, HeaderValue, Method};
use crate::error::{AppError, CliError};
use crate::http::{parse_method, HttpBackend, ReqwestBackend};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;

pub type KeyValuePairs = Vec<(String, String)>;

pub type HeaderDataTuple = (KeyValuePairs, KeyValuePairs);

#[derive(Parser, Debug)]
#[command(name = "rest-either")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Prefix for every route
    #[arg(long, env = "REST_EITHER_BASE_URL")]
    pub base_url: String,
    /// Value of the Authorization header
    #[arg(long, env = "REST_EITHER_AUTH", hide_env_values = true)]
    pub auth: Option<String>,
    /// Header sent with the request, as key:value (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,
    /// Give up on the server after this many seconds
    #[arg(long)]
    pub timeout: Option<f64>,
    /// Log each pipeline step to stderr
    #[arg(short, long)]
    pub verbose: bool,
    /// GET, POST, PUT, PATCH or DELETE
    pub method: String,
    /// Route appended to the base URL
    pub route: String,
    /// Headers (key:value) and data (key=value); data is the query for GET
    /// and the JSON body otherwise
    #[arg(value_parser, trailing_var_arg = true)]
    pub params: Vec<String>,
}

/// A request as described on the command line
#[derive(Debug, PartialEq)]
pub struct CliRequest {
    pub method: Method,
    pub route: String,
    pub query: KeyValuePairs,
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

/// Validates and splits parameters into headers and data
///
/// Whichever of `:` or `=` comes first decides the kind, so `a=b:c` is data
/// and `Accept:text/x=y` is a header.
pub fn validate_params(params: &[String]) -> Result<HeaderDataTuple, CliError> {
    let mut headers = Vec::new();
    let mut data = Vec::new();

    for param in params {
        let colon = param.find(':');
        let equals = param.find('=');
        let is_header = match (colon, equals) {
            (Some(c), Some(e)) => c < e,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => return Err(CliError::InvalidParamFormat(param.clone())),
        };

        if is_header {
            headers.push(parse_header(param)?);
        } else if let Some((k, v)) = param.split_once('=') {
            let key = k.trim();
            if key.is_empty() {
                return Err(CliError::InvalidParamFormat(param.clone()));
            }
            data.push((key.to_string(), v.trim().to_string()));
        }
    }

    Ok((headers, data))
}

/// Parses a single `key:value` header
pub fn parse_header(param: &str) -> Result<(String, String), CliError> {
    let (k, v) = param
        .split_once(':')
        .ok_or_else(|| CliError::InvalidHeaderFormat(param.to_string()))?;
    let key = k.trim();
    if key.is_empty() || key.contains(' ') {
        return Err(CliError::InvalidHeaderFormat(param.to_string()));
    }
    Ok((key.to_string(), v.trim().to_string()))
}

/// Validates the base URL; unlike routes it must carry a scheme and host
pub fn validate_base_url(url: &str) -> Result<String, CliError> {
    let trimmed = url.trim();
    let host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"));
    match host {
        Some(rest) if !rest.trim_matches('/').is_empty() => Ok(trimmed.to_string()),
        _ => Err(CliError::InvalidBaseUrl(url.to_string())),
    }
}

fn parse_timeout(seconds: Option<f64>) -> Result<Option<Duration>, AppError> {
    seconds
        .map(|secs| {
            Duration::try_from_secs_f64(secs)
                .map_err(|e| AppError::Config(format!("timeout {secs}: {e}")))
        })
        .transpose()
}

/// Builds the client config from global options
pub fn build_config(cli: &Cli) -> Result<ClientConfig, AppError> {
    let mut config = ClientConfig::new(validate_base_url(&cli.base_url)?);
    if let Some(auth) = &cli.auth {
        config = config.with_authorization(auth.as_str());
    }
    for header in &cli.headers {
        let (name, value) = parse_header(header)?;
        config = config.with_header(name, value);
    }
    if let Some(timeout) = parse_timeout(cli.timeout)? {
        config = config.with_timeout(timeout);
    }
    Ok(config)
}

fn header_map(pairs: KeyValuePairs) -> Result<HeaderMap, CliError> {
    let mut headers = HeaderMap::new();
    for (key, value) in pairs {
        let name = key
            .parse::<HeaderName>()
            .map_err(|_| CliError::InvalidHeaderFormat(format!("{key}:{value}")))?;
        let value = value
            .parse::<HeaderValue>()
            .map_err(|_| CliError::InvalidHeaderFormat(format!("{key}:{value}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Turns the positional arguments into a request
pub fn prepare_request(cli: &Cli) -> Result<CliRequest, CliError> {
    let method =
        parse_method(&cli.method).map_err(|_| CliError::UnsupportedMethod(cli.method.clone()))?;
    let (headers, data) = validate_params(&cli.params)?;

    let (query, body) = if method == Method::GET {
        (data, None)
    } else if data.is_empty() {
        (Vec::new(), None)
    } else {
        let object = data
            .into_iter()
            .map(|(k, v)| (k, Value::String(v)))
            .collect();
        (Vec::new(), Some(Value::Object(object)))
    };

    Ok(CliRequest {
        method,
        route: cli.route.clone(),
        query,
        body,
        headers: header_map(headers)?,
    })
}

pub async fn with_spinner<F: Future>(message: &str, future: F) -> F::Output {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    // Try to set a fancy template, fall back to simple spinner if it fails
    let style_result = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner} {msg}");
    match style_result {
        Ok(style) => pb.set_style(style),
        Err(_) => pb.set_style(ProgressStyle::default_spinner()),
    }

    let output = future.await;
    pb.finish_and_clear();
    output
}

pub async fn send_request<B>(client: &RestClient<B>, request: CliRequest) -> Outcome<Value>
where
    B: HttpBackend + Send + Sync,
{
    client
        .execute(
            request.method,
            &request.route,
            &request.query,
            request.body,
            request.headers,
        )
        .await
}

/// Runs the command line and prints the outcome
///
/// Returns whether the outcome was a success.
pub async fn run(cli: Cli) -> Result<bool, AppError> {
    let config = build_config(&cli)?;
    let request = prepare_request(&cli)?;
    let client = RestClient::new(config, ReqwestBackend::new()?);

    let message = format!("{} {}", request.method, request.route);
    let outcome = with_spinner(&message, send_request(&client, request)).await;
    printer::print_outcome(&outcome)?;
    Ok(outcome.is_right())
}
