//! Failure normalization for axum request pipelines.
//!
//! Handlers signal failures as [`HttpError`] values (or any error, which
//! becomes an unclassified [`Failure`]); one layer turns every failure into
//! a uniform JSON response.
//!
//! - [`catcher`] wraps a fallible handler and forwards its errors and panics
//! - [`error_handler`] translates forwarded failures into responses
//! - [`not_found_handler`] raises "Not Found" when no route matched

pub mod config;
pub mod error;
pub mod http;
pub mod observability;

pub use error::{Failure, HttpError, HttpErrorKind};
pub use http::{
    catch_panics, catcher, error_handler, not_found_handler, translate, ErrorHandlerLayer,
    NotFoundHandler, RequestContext,
};
