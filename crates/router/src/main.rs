use std::sync::Arc;

use axum::Router;
use axum::http::{StatusCode, header};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use apiwire_core::{ApiSchema, ArgValue, ConventionError};
use apiwire_router::{
    ActionError, ActionReply, Identity, RequestContext, SecuredRouter, action,
    errors::json_error, gate, register_api,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    apiwire_observability::init();

    let token = std::env::var("API_TOKEN").unwrap_or_else(|_| {
        tracing::warn!("API_TOKEN not set; using insecure dev default");
        "dev-token".to_string()
    });

    let app = build_app(token)?;

    let bind = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_app(token: String) -> Result<Router, ConventionError> {
    let expected: Arc<str> = token.into();
    let auth = gate(move |mut req| {
        let expected = expected.clone();
        async move {
            let presented = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim);

            match presented {
                Some(t) if t == &*expected => {
                    req.extensions_mut()
                        .insert(Identity(json!({ "subject": "demo-operator" })));
                    Ok(req)
                }
                _ => Err(json_error(
                    StatusCode::UNAUTHORIZED,
                    "unauthorized",
                    "missing or invalid bearer token",
                )),
            }
        }
    });

    let inventory = ApiSchema::new("inventory")
        .secure()
        .action("GET_item", ["route_id_int"], action(get_item))
        .action("GET_search", ["qs_q", "qs_limit_int"], action(search))
        .action("POST_create", ["body_payload_obj"], action(create_item));

    let ping = ApiSchema::new("ping").action("GET", ["qs_echo"], action(pong));

    let app = SecuredRouter::with_gate(Router::new(), auth);
    let app = register_api(app, &ping)?;
    let app = register_api(app, &inventory)?;
    Ok(app.into_router())
}

async fn pong(_ctx: RequestContext, args: Vec<ArgValue>) -> Result<ActionReply, ActionError> {
    let echo = args[0].as_str().unwrap_or("pong");
    Ok(ActionReply::json(json!({ "pong": echo })))
}

async fn get_item(ctx: RequestContext, args: Vec<ArgValue>) -> Result<ActionReply, ActionError> {
    let id = args[0].as_i64().unwrap_or_default();
    Ok(ActionReply::json(json!({
        "id": id,
        "requested_by": ctx.identity().map(|i| i.0.clone()),
        "url": ctx.full_url(),
    })))
}

async fn search(_ctx: RequestContext, args: Vec<ArgValue>) -> Result<ActionReply, ActionError> {
    let q = args[0].as_str().unwrap_or("");
    let limit = args[1].as_i64().unwrap_or(0);
    Ok(ActionReply::json(json!({
        "query": q,
        "limit": limit,
        "results": [],
    })))
}

async fn create_item(_ctx: RequestContext, args: Vec<ArgValue>) -> Result<ActionReply, ActionError> {
    let payload = args[0].as_json().cloned().unwrap_or(serde_json::Value::Null);
    let name = payload
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| ActionError::new("payload must include a name"))?;

    Ok(ActionReply::with_status(
        StatusCode::CREATED,
        json!({
            "id": Uuid::now_v7(),
            "name": name,
            "created_at": Utc::now(),
        }),
    ))
}
