//! Per-request context handed to action handlers.

use axum::http::request::Parts;
use axum::http::{HeaderMap, Method};

use crate::url;

/// Identity injected by an upstream authorization gate.
///
/// The gate decides what goes in here (claims, roles, a user record); this
/// crate only carries it from the request extensions to the handler.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity(pub serde_json::Value);

/// Request context for an action handler.
///
/// The convention layer owns argument marshaling, so handlers usually only
/// need this for the identity or the reconstructed full URL.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    matched_path: Option<String>,
    full_url: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    identity: Option<Identity>,
}

impl RequestContext {
    pub(crate) fn from_parts(parts: &Parts, query: Vec<(String, String)>) -> Self {
        Self {
            method: parts.method.clone(),
            matched_path: parts
                .extensions
                .get::<axum::extract::MatchedPath>()
                .map(|p| p.as_str().to_string()),
            full_url: url::full_url(parts),
            query,
            headers: parts.headers.clone(),
            identity: parts.extensions.get::<Identity>().cloned(),
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The route template this request matched, when known.
    pub fn matched_path(&self) -> Option<&str> {
        self.matched_path.as_deref()
    }

    /// The reconstructed absolute URL of this request.
    pub fn full_url(&self) -> &str {
        &self.full_url
    }

    /// Parsed query-string pairs, in request order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// First query-string value for `name`, if present.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Identity injected by the authorization gate, if any ran.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }
}
