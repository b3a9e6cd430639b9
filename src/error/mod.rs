//! Failure values.
//!
//! # Data Flow
//! ```text
//! handler detects a problem
//!     → http_error.rs (HttpError from the catalog, or a custom body)
//!     → failure.rs (Failure: classified or unclassified)
//!     → IntoResponse marks the response as carrying a pending failure
//!     → http::error_handler renders it
//! ```

pub mod failure;
pub mod http_error;

pub use failure::{BoxError, Failure, HandlerPanic};
pub use http_error::{HttpError, HttpErrorKind};
