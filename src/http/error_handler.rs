//! Centralized failure translation.
//!
//! # Responsibilities
//! - Spot responses carrying a pending [`Failure`]
//! - Give the optional user callback first pick
//! - Render the failure into the fixed JSON shapes
//!
//! # Design Decisions
//! - Implemented as a `tower` layer so it wraps routes and the fallback alike
//! - Responses without a pending failure pass through untouched
//! - Only unclassified failures are logged

use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::future::{BoxFuture, FutureExt};
use serde::Serialize;
use tower::{Layer, Service};

use crate::error::failure::PendingFailure;
use crate::error::{BoxError, Failure};
use crate::http::context::RequestContext;

/// Prefix put in front of the message of every unclassified failure.
pub const UNCLASSIFIED_PREFIX: &str = "Something went wrong : ";

/// Pre-processing hook run before the standard translation.
///
/// Returning `Some(response)` sends that response and skips translation.
pub type ErrorCallback =
    Arc<dyn Fn(Arc<Failure>, RequestContext) -> BoxFuture<'static, Option<Response>> + Send + Sync>;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StandardBody<'a> {
    status_code: u16,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
    path: &'a str,
    method: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UnclassifiedBody<'a> {
    status_code: u16,
    message: String,
    path: &'a str,
    method: &'a str,
}

/// Render `failure` for the request described by `ctx`.
///
/// Apart from the diagnostic record written for unclassified failures, the
/// result depends only on the failure and the request's path and method.
pub fn translate(failure: &Failure, ctx: &RequestContext) -> Response {
    match failure {
        Failure::Unclassified(error) => {
            tracing::error!(
                path = %ctx.path(),
                method = %ctx.method(),
                error = ?error,
                "Unclassified failure while handling request"
            );
            let body = UnclassifiedBody {
                status_code: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
                message: format!("{UNCLASSIFIED_PREFIX}{error}"),
                path: ctx.path(),
                method: ctx.method(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        Failure::Classified(http) => match http.custom_response() {
            Some(custom) => (http.status(), Json(custom)).into_response(),
            None => {
                let body = StandardBody {
                    status_code: http.status().as_u16(),
                    name: http.name(),
                    message: http.message(),
                    path: ctx.path(),
                    method: ctx.method(),
                };
                (http.status(), Json(body)).into_response()
            }
        },
    }
}

/// Create the translator layer with no callback.
///
/// Install it outermost (after routes and fallback) so it sees every
/// response:
///
/// ```rust,no_run
/// use axum::{routing::get, Router};
/// use http_error_layer::{catcher, error_handler, not_found_handler, HttpError};
///
/// let app: Router = Router::new()
///     .route("/widgets/{id}", get(catcher(|_req| async {
///         Err::<(), _>(HttpError::not_found(""))
///     })))
///     .fallback_service(not_found_handler())
///     .layer(error_handler());
/// ```
pub fn error_handler() -> ErrorHandlerLayer {
    ErrorHandlerLayer::new()
}

/// Layer that installs [`ErrorHandler`].
#[derive(Clone, Default)]
pub struct ErrorHandlerLayer {
    callback: Option<ErrorCallback>,
}

impl ErrorHandlerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` before translating each failure.
    pub fn with_callback<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(Arc<Failure>, RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Response>> + Send + 'static,
    {
        self.callback = Some(Arc::new(move |failure, ctx| callback(failure, ctx).boxed()));
        self
    }
}

impl<S> Layer<S> for ErrorHandlerLayer {
    type Service = ErrorHandler<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ErrorHandler {
            inner,
            callback: self.callback.clone(),
        }
    }
}

/// Service translating pending failures produced by the wrapped service.
#[derive(Clone)]
pub struct ErrorHandler<S> {
    inner: S,
    callback: Option<ErrorCallback>,
}

impl<S, B> Service<Request> for ErrorHandler<S>
where
    S: Service<Request, Response = axum::http::Response<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: HttpBody<Data = Bytes> + Send + 'static,
    B::Error: Into<BoxError>,
{
    type Response = Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Response, S::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let ctx = RequestContext::from_request(&req);
        let callback = self.callback.clone();

        // Keep the service that was driven to readiness.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let mut response = inner.call(req).await?;

            let Some(PendingFailure(failure)) = response.extensions_mut().remove::<PendingFailure>()
            else {
                return Ok(response.map(Body::new));
            };

            Ok(handle_failure(callback.as_ref(), failure, ctx).await)
        })
    }
}

async fn handle_failure(
    callback: Option<&ErrorCallback>,
    failure: Arc<Failure>,
    ctx: RequestContext,
) -> Response {
    if let Some(callback) = callback {
        if let Some(response) = callback(failure.clone(), ctx.clone()).await {
            tracing::debug!(
                path = %ctx.path(),
                method = %ctx.method(),
                "Failure handled by callback"
            );
            return response;
        }
    }

    translate(&failure, &ctx)
}
