//! Registration-time error model.

use thiserror::Error;

/// Error raised while decoding schema naming conventions.
///
/// All of these surface synchronously during route registration; nothing here
/// happens per request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConventionError {
    /// The action id carries no recognizable HTTP method prefix.
    #[error("unable to detect HTTP method from action name: {0}")]
    UnknownMethod(String),

    /// A parameter token names a source prefix outside the known set.
    #[error("unknown source prefix: {0}")]
    UnknownSource(String),

    /// A parameter token names a type suffix with no registered coercer.
    #[error("unknown type suffix: {0}")]
    UnknownType(String),

    /// A parameter token is structurally invalid (empty, blank name, or more
    /// than three pieces).
    #[error("malformed parameter token: {0}")]
    MalformedParam(String),

    /// A wildcard (`path`) parameter was declared before other route
    /// parameters; it must come last since it swallows the rest of the path.
    #[error("wildcard parameter {0} must be the last route segment")]
    WildcardNotLast(String),

    /// `register_coercer` was called with an empty suffix.
    #[error("type suffix is required")]
    EmptySuffix,

    /// The schema has an empty name, which would produce `/api/` routes.
    #[error("schema name is required")]
    EmptySchemaName,
}
