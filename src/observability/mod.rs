//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http::error_handler (unclassified failures, callback short-circuits)
//! http::catcher (panics)
//!     → tracing events
//!     → logging.rs subscriber (fmt or JSON to stdout)
//! ```

pub mod logging;

pub use logging::init_logging;
