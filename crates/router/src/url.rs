//! Full-URL reconstruction from request parts.

use axum::extract::OriginalUri;
use axum::http::header;
use axum::http::request::Parts;

/// Reconstruct the absolute URL of a request.
///
/// Scheme comes from `X-Forwarded-Proto` when a proxy set it, otherwise
/// `http`; host (and port) from the `Host` header; path and query from the
/// original URI as received, before any router nesting rewrote it.
pub fn full_url(parts: &Parts) -> String {
    let scheme = parts
        .headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("http");

    let host = parts
        .headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let path_and_query = parts
        .extensions
        .get::<OriginalUri>()
        .map(|o| &o.0)
        .unwrap_or(&parts.uri)
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    format!("{scheme}://{host}{path_and_query}")
}
