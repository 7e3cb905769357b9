//! Router wrapper carrying an optional authorization gate.
//!
//! Mirrors the plain verb registrars with `safe_*` variants that run the gate
//! before the handler. The gate's internal logic (token validation, identity
//! lookup) belongs to the caller; this module only wires it in front of the
//! routes that asked for it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::handler::Handler;
use axum::http::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{self, MethodRouter};

/// The boxed future an authorization gate returns.
pub type GateFuture = Pin<Box<dyn Future<Output = Result<Request<Body>, Response>> + Send>>;

/// An authorization gate: passes the request through (usually after injecting
/// an [`crate::Identity`] extension) or short-circuits with a response,
/// typically a 401.
pub type AuthGate = Arc<dyn Fn(Request<Body>) -> GateFuture + Send + Sync>;

/// Box an async closure into an [`AuthGate`].
pub fn gate<F, Fut>(f: F) -> AuthGate
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Request<Body>, Response>> + Send + 'static,
{
    Arc::new(move |req| Box::pin(f(req)))
}

/// An `axum::Router` plus an optional authorization gate.
///
/// With no gate configured, the `safe_*` registrars degrade to their plain
/// counterparts, so a schema marked secure still registers (ungated) in
/// setups without auth.
pub struct SecuredRouter {
    router: Router,
    gate: Option<AuthGate>,
}

impl std::fmt::Debug for SecuredRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecuredRouter")
            .field("router", &self.router)
            .field("gate", &self.gate.as_ref().map(|_| "AuthGate"))
            .finish()
    }
}

impl SecuredRouter {
    pub fn new(router: Router) -> Self {
        Self { router, gate: None }
    }

    pub fn with_gate(router: Router, gate: AuthGate) -> Self {
        Self {
            router,
            gate: Some(gate),
        }
    }

    pub fn has_gate(&self) -> bool {
        self.gate.is_some()
    }

    /// Unwrap into the underlying router for serving or further nesting.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Register a method router without the gate.
    pub fn route(mut self, path: &str, method_router: MethodRouter) -> Self {
        self.router = self.router.route(path, method_router);
        self
    }

    /// Register a method router behind the gate, when one is configured.
    pub fn safe_route(mut self, path: &str, method_router: MethodRouter) -> Self {
        let method_router = match &self.gate {
            Some(g) => {
                let g = g.clone();
                method_router.layer(middleware::from_fn(
                    move |req: Request<Body>, next: Next| {
                        let g = g.clone();
                        async move {
                            match g(req).await {
                                Ok(req) => next.run(req).await,
                                Err(response) => response,
                            }
                        }
                    },
                ))
            }
            None => method_router,
        };
        self.router = self.router.route(path, method_router);
        self
    }

    pub fn get<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, routing::get(handler))
    }

    pub fn post<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, routing::post(handler))
    }

    pub fn put<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, routing::put(handler))
    }

    pub fn patch<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, routing::patch(handler))
    }

    pub fn delete<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, routing::delete(handler))
    }

    pub fn options<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.route(path, routing::options(handler))
    }

    pub fn safe_get<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.safe_route(path, routing::get(handler))
    }

    pub fn safe_post<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.safe_route(path, routing::post(handler))
    }

    pub fn safe_put<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.safe_route(path, routing::put(handler))
    }

    pub fn safe_patch<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.safe_route(path, routing::patch(handler))
    }

    pub fn safe_delete<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.safe_route(path, routing::delete(handler))
    }

    pub fn safe_options<H, T>(self, path: &str, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        self.safe_route(path, routing::options(handler))
    }
}

impl From<Router> for SecuredRouter {
    fn from(router: Router) -> Self {
        Self::new(router)
    }
}
