//! Declarative API schema.
//!
//! A schema is a named, ordered list of action declarations. The handler type
//! is generic so this crate stays framework-agnostic; `apiwire-router`
//! instantiates it with its boxed async handler type.

use crate::convention::ActionRoute;
use crate::error::ConventionError;

/// One declared action: id, parameter tokens, and the handler value.
#[derive(Clone)]
pub struct ActionDecl<H> {
    pub id: String,
    pub params: Vec<String>,
    pub handler: H,
}

impl<H> ActionDecl<H> {
    /// Decode this declaration's naming conventions.
    pub fn parse(&self, schema_name: &str) -> Result<ActionRoute, ConventionError> {
        ActionRoute::parse(schema_name, &self.id, &self.params)
    }
}

/// A declarative API schema: name, security flag, and actions.
///
/// Routes derived from the schema live under `/api/<name>`. When `secure` is
/// set, the router registers every action behind its authorization gate.
#[derive(Clone)]
pub struct ApiSchema<H> {
    name: String,
    secure: bool,
    actions: Vec<ActionDecl<H>>,
}

impl<H> ApiSchema<H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            secure: false,
            actions: Vec::new(),
        }
    }

    /// Mark every action in this schema as requiring the authorization gate.
    pub fn secure(mut self) -> Self {
        self.secure = true;
        self
    }

    /// Declare an action.
    ///
    /// `id` encodes the method and route segment (`GET_item`); `params` are
    /// `source_name_type` tokens, in the order the handler expects its
    /// arguments.
    pub fn action<I, S>(mut self, id: impl Into<String>, params: I, handler: H) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actions.push(ActionDecl {
            id: id.into(),
            params: params.into_iter().map(Into::into).collect(),
            handler,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn actions(&self) -> &[ActionDecl<H>] {
        &self.actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convention::ParamSource;
    use crate::method::HttpMethod;

    #[test]
    fn builder_preserves_declaration_order() {
        let schema: ApiSchema<u8> = ApiSchema::new("demo")
            .action("GET_list", ["qs_page_int"], 0)
            .action("POST_create", ["body_payload_obj"], 1);

        assert_eq!(schema.name(), "demo");
        assert!(!schema.is_secure());
        assert_eq!(schema.actions().len(), 2);
        assert_eq!(schema.actions()[0].id, "GET_list");
        assert_eq!(schema.actions()[1].handler, 1);
    }

    #[test]
    fn declarations_parse_against_the_schema_name() {
        let schema: ApiSchema<()> =
            ApiSchema::new("demo").secure().action("GET_item", ["route_id_int"], ());

        assert!(schema.is_secure());
        let route = schema.actions()[0].parse(schema.name()).unwrap();
        assert_eq!(route.method, HttpMethod::Get);
        assert_eq!(route.route, "/api/demo/item/:id");
        assert_eq!(route.params[0].source, ParamSource::Route);
    }

    #[test]
    fn actions_with_no_params_accept_an_empty_list() {
        let schema: ApiSchema<()> = ApiSchema::new("demo").action("GET", [] as [&str; 0], ());
        let route = schema.actions()[0].parse(schema.name()).unwrap();
        assert_eq!(route.route, "/api/demo");
        assert!(route.params.is_empty());
    }
}
