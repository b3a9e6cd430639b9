//! Fallback for requests no route matched.

use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};
use tower::Service;

use crate::error::{HttpError, HttpErrorKind};
use crate::http::context::RequestContext;

/// Hook run before the "Not Found" failure is raised.
///
/// Returning `Some(response)` sends that response instead.
pub type NotFoundCallback =
    Arc<dyn Fn(RequestContext) -> BoxFuture<'static, Option<Response>> + Send + Sync>;

/// Create the fallback service with no callback.
///
/// Register it with `Router::fallback_service` for unknown paths. axum answers
/// a known path with an unrouted method by itself, with an empty 405, so
/// register [`NotFoundHandler::into_handler`] with
/// `Router::method_not_allowed_fallback` too, after the routes:
///
/// ```rust,no_run
/// use axum::{routing::get, Router};
/// use http_error_layer::{error_handler, not_found_handler};
///
/// let not_found = not_found_handler();
/// let app: Router = Router::new()
///     .route("/widgets/{id}", get(|| async { "widget" }))
///     .method_not_allowed_fallback(not_found.clone().into_handler())
///     .fallback_service(not_found)
///     .layer(error_handler());
/// ```
pub fn not_found_handler() -> NotFoundHandler {
    NotFoundHandler::default()
}

/// Fallback service raising a "Not Found" failure.
#[derive(Clone, Default)]
pub struct NotFoundHandler {
    callback: Option<NotFoundCallback>,
}

impl NotFoundHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback<F, Fut>(mut self, callback: F) -> Self
    where
        F: Fn(RequestContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Option<Response>> + Send + 'static,
    {
        self.callback = Some(Arc::new(move |ctx| callback(ctx).boxed()));
        self
    }

    /// The same signal as an axum handler, for
    /// `Router::method_not_allowed_fallback`.
    pub fn into_handler(
        self,
    ) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static {
        move |req: Request| respond(self.callback.clone(), req).boxed()
    }
}

async fn respond(callback: Option<NotFoundCallback>, req: Request) -> Response {
    let ctx = RequestContext::from_request(&req);

    if let Some(callback) = callback {
        if let Some(response) = callback(ctx.clone()).await {
            return response;
        }
    }

    tracing::debug!(path = %ctx.path(), method = %ctx.method(), "No route matched");
    HttpError::from(HttpErrorKind::NotFound).into_response()
}

impl Service<Request> for NotFoundHandler {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request) -> Self::Future {
        respond(self.callback.clone(), req).map(Ok).boxed()
    }
}
