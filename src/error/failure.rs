//! Any failure that can reach the translator.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::http_error::HttpError;

/// Boxed error used for failures that carry no HTTP classification.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A panic raised by a request handler, captured as an error value.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct HandlerPanic(pub String);

impl HandlerPanic {
    /// Extract a readable message from a panic payload.
    pub fn from_payload(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "handler panicked".to_string()
        };
        Self(message)
    }
}

/// A failure surfaced while handling a request.
///
/// Any `std::error::Error` converts into a `Failure`, so handlers returning
/// `Result<_, Failure>` can use `?` freely. Conversion classifies by shape:
/// an [`HttpError`], even one travelling inside a boxed error, becomes
/// [`Failure::Classified`]; anything else is [`Failure::Unclassified`].
///
/// `Failure` must not implement `std::error::Error`: the blanket `From`
/// impl overlaps with `From<T> for T` otherwise.
pub enum Failure {
    /// Carries a known HTTP status.
    Classified(HttpError),
    /// Anything else. Rendered as 500.
    Unclassified(BoxError),
}

impl Failure {
    /// Wrap an arbitrary error, or a plain message, as a failure.
    pub fn unclassified(error: impl Into<BoxError>) -> Self {
        Self::classify(error.into())
    }

    /// Build the failure that stands in for a panicked handler.
    pub fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        Self::Unclassified(Box::new(HandlerPanic::from_payload(payload)))
    }

    fn classify(error: BoxError) -> Self {
        match error.downcast::<HttpError>() {
            Ok(http) => Self::Classified(*http),
            Err(other) => Self::Unclassified(other),
        }
    }

    pub fn as_http_error(&self) -> Option<&HttpError> {
        match self {
            Self::Classified(http) => Some(http),
            Self::Unclassified(_) => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, Self::Classified(_))
    }

    /// Status the translator will answer with absent a callback.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Classified(http) => http.status(),
            Self::Unclassified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl<E> From<E> for Failure
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(error: E) -> Self {
        Self::classify(Box::new(error))
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classified(http) => f.debug_tuple("Classified").field(http).finish(),
            Self::Unclassified(error) => f.debug_tuple("Unclassified").field(error).finish(),
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classified(http) => fmt::Display::fmt(http, f),
            Self::Unclassified(error) => fmt::Display::fmt(error, f),
        }
    }
}

/// Marks a response as carrying a failure still waiting for translation.
#[derive(Clone, Debug)]
pub(crate) struct PendingFailure(pub(crate) Arc<Failure>);

impl IntoResponse for Failure {
    /// Forwards the failure to the translator.
    ///
    /// The returned response has the failure's status and an empty body; the
    /// error handler layer replaces it with the rendered body.
    fn into_response(self) -> Response {
        let mut response = self.status().into_response();
        response
            .extensions_mut()
            .insert(PendingFailure(Arc::new(self)));
        response
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        Failure::Classified(self).into_response()
    }
}
