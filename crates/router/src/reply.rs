//! Handler signature and outcome types.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use apiwire_core::ArgValue;

use crate::context::RequestContext;

/// What an action handler resolves to on success.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionReply {
    /// 200 with a JSON body.
    Json(serde_json::Value),
    /// 200 with a plain-text body.
    Text(String),
    /// A bare status code, no body.
    Status(StatusCode),
    /// An explicit status with a JSON body (e.g. 201 on create).
    WithStatus(StatusCode, serde_json::Value),
}

impl ActionReply {
    pub fn json(value: serde_json::Value) -> Self {
        Self::Json(value)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn status(status: StatusCode) -> Self {
        Self::Status(status)
    }

    pub fn with_status(status: StatusCode, value: serde_json::Value) -> Self {
        Self::WithStatus(status, value)
    }
}

impl IntoResponse for ActionReply {
    fn into_response(self) -> Response {
        match self {
            Self::Json(v) => (StatusCode::OK, Json(v)).into_response(),
            Self::Text(s) => (StatusCode::OK, s).into_response(),
            Self::Status(s) => s.into_response(),
            Self::WithStatus(s, v) => (s, Json(v)).into_response(),
        }
    }
}

/// A failed action.
///
/// Always rendered as a 500 with the message in the JSON error body; handlers
/// that want a specific status return an [`ActionReply::WithStatus`] instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// The boxed future an action handler returns.
pub type ActionFuture = Pin<Box<dyn Future<Output = Result<ActionReply, ActionError>> + Send>>;

/// A registered action handler: context plus coerced arguments in.
pub type ActionFn = Arc<dyn Fn(RequestContext, Vec<ArgValue>) -> ActionFuture + Send + Sync>;

/// Box an async closure into an [`ActionFn`].
pub fn action<F, Fut>(f: F) -> ActionFn
where
    F: Fn(RequestContext, Vec<ArgValue>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<ActionReply, ActionError>> + Send + 'static,
{
    Arc::new(move |ctx, args| Box::pin(f(ctx, args)))
}
