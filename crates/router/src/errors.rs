//! JSON error bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use apiwire_core::CoerceError;

use crate::reply::ActionError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// A parameter failed coercion: 400 naming the parameter and the mismatch.
pub fn coerce_error_to_response(param: &str, err: &CoerceError) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "invalid_parameter",
        format!("parameter '{param}': {err}"),
    )
}

/// The schema's handler failed: logged, then a generic 500.
pub fn handler_error_to_response(route: &str, err: &ActionError) -> axum::response::Response {
    tracing::error!(route = %route, error = %err, "action handler failed");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "handler_error", &err.message)
}
