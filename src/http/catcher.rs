//! Async boundary adapter.
//!
//! Funnels everything a handler can fail with into the translator: an `Err`
//! from its future, a panic while building the future, or a panic while
//! polling it.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use futures_util::future::{BoxFuture, FutureExt};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::Failure;

/// Wrap a fallible request handler.
///
/// The returned closure is itself an axum handler. On success the handler's
/// own response is sent unchanged; on failure the error is forwarded, as is,
/// to the error handler layer. Panics become unclassified failures.
pub fn catcher<F, Fut, T, E>(
    handler: F,
) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    F: Fn(Request) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: IntoResponse + Send + 'static,
    E: Into<Failure> + Send + 'static,
{
    move |req: Request| {
        let handler = handler.clone();
        async move {
            let outcome = AssertUnwindSafe(async move { handler(req).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(value)) => value.into_response(),
                Ok(Err(error)) => Into::<Failure>::into(error).into_response(),
                Err(payload) => Failure::from_panic(payload).into_response(),
            }
        }
        .boxed()
    }
}

/// Panic interception for whole routers.
///
/// Layer it below [`crate::http::error_handler::ErrorHandlerLayer`] so the
/// resulting failure gets translated.
pub fn catch_panics() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(panic_response as fn(Box<dyn Any + Send + 'static>) -> Response)
}

fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    Failure::from_panic(payload).into_response()
}
