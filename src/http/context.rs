//! Request details handed to callbacks and to the translator.

use axum::extract::{OriginalUri, Request};
use axum::http::{HeaderMap, Method, Uri};

/// An owned snapshot of the parts of a request the translator reports on.
///
/// Taken before the request is handed to the inner service, so it outlives
/// the request itself.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
}

impl RequestContext {
    /// Capture the context of `req`.
    ///
    /// Inside nested routers the URI seen by the handler has the mount prefix
    /// stripped; the original URI is preferred when axum recorded it.
    pub fn from_request(req: &Request) -> Self {
        let uri = req
            .extensions()
            .get::<OriginalUri>()
            .map(|original| original.0.clone())
            .unwrap_or_else(|| req.uri().clone());

        Self {
            method: req.method().clone(),
            uri,
            headers: req.headers().clone(),
        }
    }

    /// Request path, without the query string.
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn method(&self) -> &str {
        self.method.as_str()
    }
}
