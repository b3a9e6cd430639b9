//! Demo server wiring the failure layer into an axum router.
//!
//! ```text
//! GET /health            → 200 "ok"
//! GET /widgets/{id}      → 200 widget, 400 on a bad id, 404 for id 9
//! GET /widgets/{id}/sku  → 500 (unclassified failure)
//! GET /legacy            → 410 with a custom body
//! anything else          → 404 from the fallback, wrong methods included
//! ```

use std::path::PathBuf;

use axum::{
    extract::{Path, Request},
    http::StatusCode,
    routing::get,
    Json, RequestExt, Router,
};
use clap::Parser;
use serde::Serialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use http_error_layer::config::{load_config, ServerConfig};
use http_error_layer::observability::init_logging;
use http_error_layer::{catch_panics, catcher, error_handler, not_found_handler, Failure, HttpError};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Serialize)]
struct Widget {
    id: u32,
    name: String,
}

async fn widget(mut req: Request) -> Result<Json<Widget>, HttpError> {
    let Path(id) = req
        .extract_parts::<Path<u32>>()
        .await
        .map_err(|rejection| HttpError::bad_request(rejection.body_text()))?;

    if id == 9 {
        return Err(HttpError::not_found(""));
    }

    Ok(Json(Widget {
        id,
        name: format!("widget-{id}"),
    }))
}

async fn widget_sku(_req: Request) -> Result<String, Failure> {
    let sku: u64 = "not-a-number".parse()?;
    Ok(sku.to_string())
}

async fn legacy(_req: Request) -> Result<(), HttpError> {
    Err(HttpError::custom(
        StatusCode::GONE,
        json!({ "error": "moved", "see": "/widgets" }),
    ))
}

fn app() -> Router {
    let not_found = not_found_handler();
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/widgets/{id}", get(catcher(widget)))
        .route("/widgets/{id}/sku", get(catcher(widget_sku)))
        .route("/legacy", get(catcher(legacy)))
        .method_not_allowed_fallback(not_found.clone().into_handler())
        .fallback_service(not_found)
        .layer(catch_panics())
        .layer(error_handler())
        .layer(TraceLayer::new_for_http())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    init_logging(&config.observability)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
    }
    tracing::info!("Shutdown signal received");
}
