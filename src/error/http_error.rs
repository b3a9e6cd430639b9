//! Classified HTTP failures.
//!
//! An [`HttpError`] carries everything the translator needs to render a
//! response: a status code, a short name, an optional message and an
//! optional fully custom body. The fixed catalog of standard failures lives
//! in [`HttpErrorKind`].

use std::fmt;

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::Value;

/// The catalog of standard failures, each mapped to a fixed status and name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpErrorKind {
    BadRequest,
    Unauthorized,
    PaymentRequired,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    ProxyAuthenticationRequired,
    RequestTimeout,
    Conflict,
    Gone,
    LengthRequired,
    PreconditionFailed,
    PayloadTooLarge,
    UriTooLong,
    InternalServer,
}

impl HttpErrorKind {
    /// Every entry of the catalog, in status order.
    pub const ALL: [HttpErrorKind; 16] = [
        HttpErrorKind::BadRequest,
        HttpErrorKind::Unauthorized,
        HttpErrorKind::PaymentRequired,
        HttpErrorKind::Forbidden,
        HttpErrorKind::NotFound,
        HttpErrorKind::MethodNotAllowed,
        HttpErrorKind::NotAcceptable,
        HttpErrorKind::ProxyAuthenticationRequired,
        HttpErrorKind::RequestTimeout,
        HttpErrorKind::Conflict,
        HttpErrorKind::Gone,
        HttpErrorKind::LengthRequired,
        HttpErrorKind::PreconditionFailed,
        HttpErrorKind::PayloadTooLarge,
        HttpErrorKind::UriTooLong,
        HttpErrorKind::InternalServer,
    ];

    pub fn status(self) -> StatusCode {
        match self {
            HttpErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HttpErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            HttpErrorKind::PaymentRequired => StatusCode::PAYMENT_REQUIRED,
            HttpErrorKind::Forbidden => StatusCode::FORBIDDEN,
            HttpErrorKind::NotFound => StatusCode::NOT_FOUND,
            HttpErrorKind::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpErrorKind::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            HttpErrorKind::ProxyAuthenticationRequired => {
                StatusCode::PROXY_AUTHENTICATION_REQUIRED
            }
            HttpErrorKind::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            HttpErrorKind::Conflict => StatusCode::CONFLICT,
            HttpErrorKind::Gone => StatusCode::GONE,
            HttpErrorKind::LengthRequired => StatusCode::LENGTH_REQUIRED,
            HttpErrorKind::PreconditionFailed => StatusCode::PRECONDITION_FAILED,
            HttpErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            HttpErrorKind::UriTooLong => StatusCode::URI_TOO_LONG,
            HttpErrorKind::InternalServer => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Human-readable name emitted in the `name` field of the response body.
    pub fn name(self) -> &'static str {
        match self {
            HttpErrorKind::BadRequest => "Bad Request",
            HttpErrorKind::Unauthorized => "Unauthorized",
            HttpErrorKind::PaymentRequired => "Payment Required",
            HttpErrorKind::Forbidden => "Forbidden",
            HttpErrorKind::NotFound => "Not Found",
            HttpErrorKind::MethodNotAllowed => "Method Not Allowed",
            HttpErrorKind::NotAcceptable => "Not Acceptable",
            HttpErrorKind::ProxyAuthenticationRequired => "Proxy Authentication Required",
            HttpErrorKind::RequestTimeout => "Request Timeout",
            HttpErrorKind::Conflict => "Conflict",
            HttpErrorKind::Gone => "Gone",
            HttpErrorKind::LengthRequired => "Length Required",
            HttpErrorKind::PreconditionFailed => "Precondition Failed",
            HttpErrorKind::PayloadTooLarge => "Payload Too Large",
            HttpErrorKind::UriTooLong => "URI Too Long",
            HttpErrorKind::InternalServer => "Internal Server",
        }
    }

    /// Build the failure for this kind with the given message.
    pub fn with_message(self, message: impl Into<String>) -> HttpError {
        HttpError::new(self.status(), self.name(), message)
    }
}

/// A failure classified with an HTTP status.
///
/// Immutable once built: fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpError {
    status: StatusCode,
    name: String,
    message: String,
    custom_response: Option<Value>,
}

impl HttpError {
    /// Create a failure with an explicit status, name and message.
    ///
    /// An empty message is treated as absent.
    pub fn new(status: StatusCode, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            name: name.into(),
            message: message.into(),
            custom_response: None,
        }
    }

    /// Create a failure whose response body is entirely caller-defined.
    ///
    /// `name` and `message` are left empty; the body is emitted verbatim.
    pub fn custom(status: StatusCode, response: impl Into<Value>) -> Self {
        Self {
            status,
            name: String::new(),
            message: String::new(),
            custom_response: Some(response.into()),
        }
    }

    /// Like [`HttpError::custom`] but accepts any serializable payload.
    ///
    /// The payload's shape is not checked.
    pub fn try_custom<T: Serialize + ?Sized>(
        status: StatusCode,
        response: &T,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::custom(status, serde_json::to_value(response)?))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The detail message, `None` when it was left empty.
    pub fn message(&self) -> Option<&str> {
        if self.message.is_empty() {
            None
        } else {
            Some(&self.message)
        }
    }

    pub fn custom_response(&self) -> Option<&Value> {
        self.custom_response.as_ref()
    }

    /// The catalog entry matching this failure's status and name, if any.
    pub fn kind(&self) -> Option<HttpErrorKind> {
        HttpErrorKind::ALL
            .into_iter()
            .find(|kind| kind.status() == self.status && kind.name() == self.name)
    }
}

impl From<HttpErrorKind> for HttpError {
    fn from(kind: HttpErrorKind) -> Self {
        kind.with_message(String::new())
    }
}

macro_rules! catalog_constructors {
    ($($(#[$doc:meta])* $fn_name:ident => $kind:ident),* $(,)?) => {
        impl HttpError {
            $(
                $(#[$doc])*
                pub fn $fn_name(message: impl Into<String>) -> Self {
                    HttpErrorKind::$kind.with_message(message)
                }
            )*
        }
    };
}

catalog_constructors! {
    /// 400 Bad Request.
    bad_request => BadRequest,
    /// 401 Unauthorized.
    unauthorized => Unauthorized,
    /// 402 Payment Required.
    payment_required => PaymentRequired,
    /// 403 Forbidden.
    forbidden => Forbidden,
    /// 404 Not Found.
    not_found => NotFound,
    /// 405 Method Not Allowed.
    method_not_allowed => MethodNotAllowed,
    /// 406 Not Acceptable.
    not_acceptable => NotAcceptable,
    /// 407 Proxy Authentication Required.
    proxy_authentication_required => ProxyAuthenticationRequired,
    /// 408 Request Timeout.
    request_timeout => RequestTimeout,
    /// 409 Conflict.
    conflict => Conflict,
    /// 410 Gone.
    gone => Gone,
    /// 411 Length Required.
    length_required => LengthRequired,
    /// 412 Precondition Failed.
    precondition_failed => PreconditionFailed,
    /// 413 Payload Too Large.
    payload_too_large => PayloadTooLarge,
    /// 414 URI Too Long.
    uri_too_long => UriTooLong,
    /// 500, named "Internal Server".
    internal_server => InternalServer,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.status.as_u16())?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        if let Some(message) = self.message() {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for HttpError {}
