//! Action-name and parameter-token parsing.
//!
//! An action id encodes the HTTP method and route segment (`GET_item`,
//! `POST_create`, or a bare `GET`). A parameter token encodes where the
//! argument is read from and how it is coerced (`source_name_type`, with
//! `route` and `string` as defaults).

use crate::coerce::lookup_coercer;
use crate::error::ConventionError;
use crate::method::HttpMethod;

/// Where a declared parameter is read from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamSource {
    /// A path segment (`/:name`). Prefixes: `route`, `param`.
    Route,
    /// A query-string entry. Prefixes: `querystring`, `qs`.
    Query,
    /// The request body. Prefix: `body`.
    Body,
    /// The trailing path remainder (`/*name`). Prefix: `path`.
    PathRest,
}

impl ParamSource {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "route" | "param" => Some(Self::Route),
            "querystring" | "qs" => Some(Self::Query),
            "body" => Some(Self::Body),
            "path" => Some(Self::PathRest),
            _ => None,
        }
    }
}

/// One parsed parameter declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub source: ParamSource,
    pub name: String,
    pub type_suffix: String,
}

impl ParamSpec {
    /// Parse a `source_name_type` token.
    ///
    /// One piece is just the name (source `route`, type `string`); two pieces
    /// are `source_name` (type `string`); three are the full form. Tokens
    /// with more pieces are rejected rather than guessed at.
    pub fn parse(token: &str) -> Result<Self, ConventionError> {
        let pieces: Vec<&str> = token.split('_').collect();
        let (prefix, name, suffix) = match pieces.as_slice() {
            [name] => ("route", *name, "string"),
            [prefix, name] => (*prefix, *name, "string"),
            [prefix, name, suffix] => (*prefix, *name, *suffix),
            _ => return Err(ConventionError::MalformedParam(token.to_string())),
        };

        if name.is_empty() {
            return Err(ConventionError::MalformedParam(token.to_string()));
        }

        let prefix = prefix.to_ascii_lowercase();
        let source = ParamSource::from_prefix(&prefix)
            .ok_or(ConventionError::UnknownSource(prefix))?;

        let type_suffix = suffix.to_ascii_lowercase();
        if lookup_coercer(&type_suffix).is_none() {
            return Err(ConventionError::UnknownType(type_suffix));
        }

        Ok(Self {
            source,
            name: name.to_string(),
            type_suffix,
        })
    }
}

/// A fully decoded action: method, route template, and parameter bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRoute {
    pub method: HttpMethod,
    /// Route template in axum syntax, e.g. `/api/inventory/item/:id`.
    pub route: String,
    pub params: Vec<ParamSpec>,
}

impl ActionRoute {
    /// Decode an action id plus its declared parameter tokens.
    ///
    /// Route parameters extend the template in declaration order; a `path`
    /// wildcard must come last since it swallows the rest of the path.
    pub fn parse(
        schema_name: &str,
        action_id: &str,
        param_tokens: &[impl AsRef<str>],
    ) -> Result<Self, ConventionError> {
        if schema_name.is_empty() {
            return Err(ConventionError::EmptySchemaName);
        }

        let mut route = format!("/api/{schema_name}");
        let method = match action_id.split_once('_') {
            Some((prefix, rest)) => {
                let method = HttpMethod::from_token(prefix)
                    .ok_or_else(|| ConventionError::UnknownMethod(action_id.to_string()))?;
                if rest.is_empty() {
                    return Err(ConventionError::UnknownMethod(action_id.to_string()));
                }
                route.push('/');
                route.push_str(rest);
                method
            }
            // A bare method name routes to the schema root.
            None => HttpMethod::from_token(action_id)
                .ok_or_else(|| ConventionError::UnknownMethod(action_id.to_string()))?,
        };

        let mut params = Vec::with_capacity(param_tokens.len());
        let mut wildcard: Option<String> = None;
        for token in param_tokens {
            let spec = ParamSpec::parse(token.as_ref())?;
            match spec.source {
                ParamSource::Route | ParamSource::PathRest => {
                    if let Some(w) = &wildcard {
                        return Err(ConventionError::WildcardNotLast(w.clone()));
                    }
                }
                ParamSource::Query | ParamSource::Body => {}
            }
            match spec.source {
                ParamSource::Route => {
                    route.push_str("/:");
                    route.push_str(&spec.name);
                }
                ParamSource::PathRest => {
                    route.push_str("/*");
                    route.push_str(&spec.name);
                    wildcard = Some(spec.name.clone());
                }
                ParamSource::Query | ParamSource::Body => {}
            }
            params.push(spec);
        }

        Ok(Self {
            method,
            route,
            params,
        })
    }
}
