//! `apiwire-core` — convention decoding for declarative API schemas.
//!
//! This crate is **framework-agnostic**: it knows how to turn action ids like
//! `POST_create` and parameter tokens like `qs_page_int` into a method, a
//! route template, and per-parameter bindings, but it never touches a request.
//! The HTTP wiring lives in `apiwire-router`.

pub mod coerce;
pub mod convention;
pub mod error;
pub mod method;
pub mod schema;
pub mod value;

pub use coerce::{Coercer, lookup_coercer, register_coercer};
pub use convention::{ActionRoute, ParamSource, ParamSpec};
pub use error::ConventionError;
pub use method::HttpMethod;
pub use schema::{ActionDecl, ApiSchema};
pub use value::{ArgValue, CoerceError, RawParam};
