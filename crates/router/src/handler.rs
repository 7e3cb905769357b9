//! Generated per-action dispatch.
//!
//! Registration compiles each action into a [`CompiledAction`] (parameter
//! bindings with their coercers resolved); [`dispatch`] is the single request
//! path shared by every generated route.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::{FromRequestParts, Path, Query};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};

use apiwire_core::{ArgValue, Coercer, ParamSource, RawParam};

use crate::context::RequestContext;
use crate::errors::{coerce_error_to_response, handler_error_to_response, json_error};
use crate::reply::ActionFn;

/// Request bodies beyond this are rejected rather than buffered.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// One parameter binding: where to read, what to call it, how to coerce.
pub(crate) struct Binding {
    pub name: String,
    pub source: ParamSource,
    pub coercer: Coercer,
}

/// An action after convention decoding, ready to serve requests.
pub(crate) struct CompiledAction {
    pub route: String,
    pub bindings: Vec<Binding>,
    pub handler: ActionFn,
}

pub(crate) async fn dispatch(action: Arc<CompiledAction>, req: Request<Body>) -> Response {
    let (mut parts, body) = req.into_parts();

    // Percent-decoded path parameters; routes without any simply have none.
    let path_params: HashMap<String, String> =
        match Path::<HashMap<String, String>>::from_request_parts(&mut parts, &()).await {
            Ok(Path(params)) => params,
            Err(_) => HashMap::new(),
        };

    let query: Vec<(String, String)> =
        match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(_) => {
                return json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_query",
                    "malformed query string",
                );
            }
        };

    let body_raw = if action
        .bindings
        .iter()
        .any(|b| b.source == ParamSource::Body)
    {
        match read_body(body).await {
            Ok(raw) => raw,
            Err(response) => return response,
        }
    } else {
        RawParam::Absent
    };

    let mut args: Vec<ArgValue> = Vec::with_capacity(action.bindings.len());
    for binding in &action.bindings {
        let raw = match binding.source {
            ParamSource::Route | ParamSource::PathRest => path_params
                .get(&binding.name)
                .map(|v| RawParam::Text(v.clone()))
                .unwrap_or(RawParam::Absent),
            ParamSource::Query => query
                .iter()
                .find(|(k, _)| k == &binding.name)
                .map(|(_, v)| RawParam::Text(v.clone()))
                .unwrap_or(RawParam::Absent),
            ParamSource::Body => body_raw.clone(),
        };
        match (binding.coercer)(raw) {
            Ok(value) => args.push(value),
            Err(err) => return coerce_error_to_response(&binding.name, &err),
        }
    }

    let ctx = RequestContext::from_parts(&parts, query);
    match (action.handler)(ctx, args).await {
        Ok(reply) => reply.into_response(),
        Err(err) => handler_error_to_response(&action.route, &err),
    }
}

async fn read_body(body: Body) -> Result<RawParam, Response> {
    let bytes = to_bytes(body, BODY_LIMIT).await.map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            "unable to read request body",
        )
    })?;

    if bytes.is_empty() {
        return Ok(RawParam::Absent);
    }

    // JSON bodies arrive structured; anything else is treated as text.
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&bytes) {
        return Ok(RawParam::Json(value));
    }

    String::from_utf8(bytes.to_vec()).map(RawParam::Text).map_err(|_| {
        json_error(
            StatusCode::BAD_REQUEST,
            "invalid_body",
            "request body is neither JSON nor UTF-8 text",
        )
    })
}
