//! Failure handling for axum pipelines.
//!
//! # Data Flow
//! ```text
//! request
//!     → route handler wrapped by catcher.rs (Err / panic → pending failure)
//!     → or not_found.rs when no route matched (Not Found → pending failure)
//!     → error_handler.rs (callback, then translation to JSON)
//!     → response
//! ```
//!
//! # Design Decisions
//! - A failure travels to the translator inside the response extensions,
//!   which plays the role of forwarding to the next stage
//! - context.rs snapshots path and method before the request is consumed

pub mod catcher;
pub mod context;
pub mod error_handler;
pub mod not_found;

pub use catcher::{catch_panics, catcher};
pub use context::RequestContext;
pub use error_handler::{error_handler, translate, ErrorCallback, ErrorHandler, ErrorHandlerLayer};
pub use not_found::{not_found_handler, NotFoundCallback, NotFoundHandler};
