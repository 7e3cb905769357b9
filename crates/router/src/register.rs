//! Schema registration: convention decoding to wired routes.

use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::routing::{self, MethodRouter};

use apiwire_core::{ApiSchema, ConventionError, HttpMethod, lookup_coercer};

use crate::handler::{Binding, CompiledAction, dispatch};
use crate::reply::ActionFn;
use crate::secure::SecuredRouter;

/// Register every action of `schema` on the router.
///
/// Routes land under `/api/<schema>`; secure schemas go through the router's
/// `safe_*` path. Convention errors (unknown method, source, or type) abort
/// registration before any route of the failing action is added.
pub fn register_api(
    mut app: SecuredRouter,
    schema: &ApiSchema<ActionFn>,
) -> Result<SecuredRouter, ConventionError> {
    for decl in schema.actions() {
        let parsed = decl.parse(schema.name())?;

        let mut bindings = Vec::with_capacity(parsed.params.len());
        for spec in &parsed.params {
            let coercer = lookup_coercer(&spec.type_suffix)
                .ok_or_else(|| ConventionError::UnknownType(spec.type_suffix.clone()))?;
            bindings.push(Binding {
                name: spec.name.clone(),
                source: spec.source,
                coercer,
            });
        }

        let compiled = Arc::new(CompiledAction {
            route: parsed.route.clone(),
            bindings,
            handler: decl.handler.clone(),
        });
        let handler = move |req: Request<Body>| {
            let compiled = compiled.clone();
            async move { dispatch(compiled, req).await }
        };

        let method_router: MethodRouter = match parsed.method {
            HttpMethod::Get => routing::get(handler),
            HttpMethod::Post => routing::post(handler),
            HttpMethod::Put => routing::put(handler),
            HttpMethod::Patch => routing::patch(handler),
            HttpMethod::Delete => routing::delete(handler),
            HttpMethod::Options => routing::options(handler),
        };

        tracing::debug!(
            method = %parsed.method,
            route = %parsed.route,
            secure = schema.is_secure(),
            "registered api action"
        );

        app = if schema.is_secure() {
            app.safe_route(&parsed.route, method_router)
        } else {
            app.route(&parsed.route, method_router)
        };
    }

    Ok(app)
}
