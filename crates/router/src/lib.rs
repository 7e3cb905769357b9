//! `apiwire-router` — axum wiring for convention-decoded API schemas.
//!
//! [`register_api`] walks an [`apiwire_core::ApiSchema`], decodes each
//! action's naming conventions, and registers a generated handler that reads
//! and coerces the declared parameters before invoking the schema's handler.
//! [`SecuredRouter`] carries the optional authorization gate that secure
//! schemas are registered behind.

pub mod context;
pub mod errors;
mod handler;
pub mod register;
pub mod reply;
pub mod secure;
pub mod url;

pub use context::{Identity, RequestContext};
pub use register::register_api;
pub use reply::{ActionError, ActionFn, ActionFuture, ActionReply, action};
pub use secure::{AuthGate, GateFuture, SecuredRouter, gate};
