//! End-to-end tests of the failure layer inside an axum router.

use std::io;
use std::sync::Arc;

use axum::{
    extract::Request,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::json;

use http_error_layer::{
    catch_panics, catcher, error_handler, not_found_handler, Failure, HttpError, RequestContext,
};

mod common;

fn app() -> Router {
    let not_found = not_found_handler();
    Router::new()
        .route(
            "/widgets/{id}",
            get(catcher(|_req: Request| async {
                tokio::task::yield_now().await;
                Err::<(), _>(HttpError::not_found(""))
            })),
        )
        .route(
            "/health",
            get(catcher(|_req: Request| async {
                Err::<(), _>(io::Error::new(io::ErrorKind::Other, "db down"))
            })),
        )
        .route(
            "/orders",
            post(catcher(|_req: Request| async {
                Err::<(), _>(HttpError::custom(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "errors": ["quantity must be positive"] }),
                ))
            })),
        )
        .route(
            "/ok",
            get(catcher(|_req: Request| async { Ok::<_, Failure>("fine") })),
        )
        .route(
            "/boom",
            get(|| async {
                if true {
                    panic!("plain handler blew up");
                }
                "unreachable"
            }),
        )
        .route(
            "/empty",
            get(catcher(|_req: Request| async {
                Err::<(), _>(HttpError::custom(StatusCode::BAD_REQUEST, json!(null)))
            })),
        )
        .method_not_allowed_fallback(not_found.clone().into_handler())
        .fallback_service(not_found)
        .layer(catch_panics())
        .layer(error_handler())
}

#[tokio::test]
async fn test_async_not_found_from_handler() {
    let (status, body) = common::send(app(), Method::GET, "/widgets/9").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "statusCode": 404,
            "name": "Not Found",
            "path": "/widgets/9",
            "method": "GET",
        })
    );
}

#[tokio::test]
async fn test_unmatched_route() {
    let (status, body) = common::send(app(), Method::POST, "/unknown").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "statusCode": 404,
            "name": "Not Found",
            "path": "/unknown",
            "method": "POST",
        })
    );
}

#[tokio::test]
async fn test_wrong_method_on_known_path() {
    let (status, body) = common::send(app(), Method::POST, "/widgets/9").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({
            "statusCode": 404,
            "name": "Not Found",
            "path": "/widgets/9",
            "method": "POST",
        })
    );
}

#[tokio::test]
async fn test_unclassified_failure_is_logged() {
    let (logs, _guard) = common::capture_logs();

    let (status, body) = common::send(app(), Method::GET, "/health").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({
            "statusCode": 500,
            "message": "Something went wrong : db down",
            "path": "/health",
            "method": "GET",
        })
    );

    let output = logs.contents();
    assert!(output.contains("ERROR"), "no error record in: {output}");
    assert!(output.contains("db down"), "original message missing in: {output}");
}

#[tokio::test]
async fn test_custom_response_is_verbatim() {
    let (status, body) = common::send(app(), Method::POST, "/orders").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, json!({ "errors": ["quantity must be positive"] }));
}

#[tokio::test]
async fn test_null_custom_response_is_sent_as_is() {
    let (status, body) = common::send_raw(app(), Method::GET, "/empty").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, b"null");
}

#[tokio::test]
async fn test_panic_is_logged_once() {
    let (logs, _guard) = common::capture_logs();

    let (status, _) = common::send(app(), Method::GET, "/boom").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let output = logs.contents();
    assert_eq!(output.lines().count(), 1, "expected one record in: {output}");
    assert!(output.contains("plain handler blew up"));
}

#[tokio::test]
async fn test_success_is_untouched() {
    let (status, body) = common::send_raw(app(), Method::GET, "/ok").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"fine");
}

#[tokio::test]
async fn test_panic_in_plain_handler() {
    let (status, body) = common::send(app(), Method::GET, "/boom").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "Something went wrong : plain handler blew up");
    assert_eq!(body["path"], "/boom");
}

#[tokio::test]
async fn test_callback_short_circuits_translation() {
    let app = Router::new()
        .route(
            "/widgets/{id}",
            get(catcher(|_req: Request| async {
                Err::<(), _>(HttpError::conflict("stale version"))
            })),
        )
        .layer(error_handler().with_callback(
            |failure: Arc<Failure>, ctx: RequestContext| async move {
                (failure.status() == StatusCode::CONFLICT).then(|| {
                    (StatusCode::OK, format!("retry {}", ctx.path())).into_response()
                })
            },
        ));

    let (status, body) = common::send_raw(app, Method::GET, "/widgets/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"retry /widgets/3");
}

#[tokio::test]
async fn test_callback_declining_keeps_standard_shape() {
    let app = Router::new()
        .route(
            "/widgets/{id}",
            get(catcher(|_req: Request| async {
                Err::<(), _>(HttpError::conflict("stale version"))
            })),
        )
        .layer(error_handler().with_callback(|_failure, _ctx| async { None }));

    let (status, body) = common::send(app, Method::GET, "/widgets/3").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["name"], "Conflict");
    assert_eq!(body["message"], "stale version");
}

#[tokio::test]
async fn test_not_found_callback() {
    let app = Router::new()
        .fallback_service(not_found_handler().with_callback(|ctx: RequestContext| async move {
            ctx.path()
                .starts_with("/v1/")
                .then(|| (StatusCode::GONE, "v1 is retired").into_response())
        }))
        .layer(error_handler());

    let (status, body) = common::send_raw(app.clone(), Method::GET, "/v1/widgets").await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(body, b"v1 is retired");

    let (status, body) = common::send(app, Method::DELETE, "/v2/widgets").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["method"], "DELETE");
    assert_eq!(body["path"], "/v2/widgets");
}

#[tokio::test]
async fn test_nested_router_reports_full_path() {
    let api = Router::new().route(
        "/widgets/{id}",
        get(catcher(|_req: Request| async {
            Err::<(), _>(HttpError::forbidden("read only"))
        })),
    );
    let app = Router::new().nest("/api", api).layer(error_handler());

    let (status, body) = common::send(app, Method::GET, "/api/widgets/1").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["path"], "/api/widgets/1");
}

#[tokio::test]
async fn test_same_failure_same_response() {
    let first = common::send(app(), Method::GET, "/widgets/9").await;
    let second = common::send(app(), Method::GET, "/widgets/9").await;
    assert_eq!(first, second);
}
