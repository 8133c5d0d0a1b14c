use std::any::Any;
use std::error::Error as StdError;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::FutureExt;
use thiserror::Error;
use tracing::warn;

use crate::either::Either;
use crate::http::HttpError;

/// A captured failure
///
/// Everything a guarded operation can fail with ends up here: returned
/// errors, decode errors and panics alike.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{name}: {message}")]
pub struct Fault {
    /// Kind of failure, e.g. `NetworkError` or `Panic`
    pub name: String,
    pub message: String,
    /// Rendered cause chain, empty when there is none
    pub trace: String,
}

impl Fault {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            trace: String::new(),
        }
    }

    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = trace.into();
        self
    }

    /// Capture an arbitrary error, keeping its `source()` chain as the trace
    pub fn from_error<E: StdError>(err: &E) -> Self {
        let mut causes = Vec::new();
        let mut current = err.source();
        while let Some(cause) = current {
            causes.push(format!("caused by: {cause}"));
            current = cause.source();
        }
        Fault::new("Error", err.to_string()).with_trace(causes.join("\n"))
    }

    fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "unknown panic".to_string()
        };
        Fault::new("Panic", message)
    }
}

impl From<HttpError> for Fault {
    fn from(err: HttpError) -> Self {
        Fault::new(err.kind(), err.message())
    }
}

impl From<serde_json::Error> for Fault {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        let name = match err.classify() {
            Category::Syntax | Category::Eof => "SyntaxError",
            Category::Data => "DataError",
            Category::Io => "IoError",
        };
        let trace = if err.line() > 0 {
            format!("at line {}, column {}", err.line(), err.column())
        } else {
            String::new()
        };
        Fault::new(name, err.to_string()).with_trace(trace)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::new("Error", message)
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::new("Error", message)
    }
}

/// Run a fallible operation, turning every failure into a left value
///
/// Both an `Err` return and a panic inside `f` are captured; nothing
/// escapes this call.
///
/// # Examples
///
/// ```
/// use rest_either::{guard, Fault};
///
/// let ok = guard(|| Ok::<_, Fault>(42));
/// assert!(ok.is_right());
///
/// let failed = guard(|| Err::<i32, _>("x"));
/// assert_eq!(failed.if_right(|_| unreachable!()).message, "x");
/// ```
pub fn guard<T, E, F>(f: F) -> Either<Fault, T>
where
    F: FnOnce() -> Result<T, E>,
    E: Into<Fault>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Either::Right(value),
        Ok(Err(err)) => Either::Left(err.into()),
        Err(payload) => {
            let fault = Fault::from_panic(payload);
            warn!(message = %fault.message, "guarded operation panicked");
            Either::Left(fault)
        }
    }
}

/// Asynchronous counterpart of [`guard`]
///
/// Resolves only once `fut` has settled.
pub async fn guard_async<T, E, Fut>(fut: Fut) -> Either<Fault, T>
where
    Fut: Future<Output = Result<T, E>>,
    E: Into<Fault>,
{
    match AssertUnwindSafe(fut).catch_unwind().await {
        Ok(Ok(value)) => Either::Right(value),
        Ok(Err(err)) => Either::Left(err.into()),
        Err(payload) => {
            let fault = Fault::from_panic(payload);
            warn!(message = %fault.message, "guarded future panicked");
            Either::Left(fault)
        }
    }
}
